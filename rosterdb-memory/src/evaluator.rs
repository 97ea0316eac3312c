//! Query evaluation against stored records.
//!
//! Evaluation runs on a record's fields only: `_id` is never a recognized path, so the
//! synthetic identity field would not change any outcome.

use bson::{Bson, Document};

use rosterdb_core::{
    error::{DocumentStoreError, DocumentStoreResult},
    query::{DIFFICULTY_PATH, Query, QueryVisitor},
    record::with_id,
};

const SCHEDULE: &str = "schedule_details";
const DAYS: &str = "days";
const START_TIME: &str = "start_time";
const END_TIME: &str = "end_time";

/// The meeting days of a record, or an empty slice if it has none.
pub(crate) fn days_of(fields: &Document) -> &[Bson] {
    schedule_of(fields)
        .and_then(|schedule| schedule.get(DAYS))
        .and_then(Bson::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn schedule_of(fields: &Document) -> Option<&Document> {
    fields.get(SCHEDULE).and_then(Bson::as_document)
}

/// A schedule time as a string; missing or non-string values read as `""`.
fn time_of<'a>(fields: &'a Document, key: &str) -> &'a str {
    schedule_of(fields)
        .and_then(|schedule| schedule.get(key))
        .and_then(Bson::as_str)
        .unwrap_or("")
}

pub(crate) struct RecordEvaluator<'a> {
    fields: &'a Document,
}

impl<'a> RecordEvaluator<'a> {
    pub fn new(fields: &'a Document) -> Self {
        Self { fields }
    }

    /// Returns `true` if every clause of `query` holds for this record.
    pub fn evaluate(&mut self, query: &Query) -> DocumentStoreResult<bool> {
        for clause in &query.clauses {
            if !self.visit_clause(clause)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Returns the matching records, in iteration order, with `_id` attached.
    pub fn filter_records<I>(records: I, query: &Query) -> Vec<Document>
    where
        I: IntoIterator<Item = (&'a String, &'a Document)>,
    {
        records
            .into_iter()
            .filter(|(_, fields)| {
                RecordEvaluator::new(fields)
                    .evaluate(query)
                    .unwrap_or(false)
            })
            .map(|(id, fields)| with_id(id, fields))
            .collect()
    }
}

impl<'a> QueryVisitor for RecordEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_days_in(&mut self, days: &[Bson]) -> Result<Self::Output, Self::Error> {
        let meets_on = days_of(self.fields);

        Ok(days.iter().any(|day| meets_on.contains(day)))
    }

    fn visit_start_time_gte(&mut self, bound: &str) -> Result<Self::Output, Self::Error> {
        // "HH:MM" is fixed width and zero padded, so string order is time order
        Ok(time_of(self.fields, START_TIME) >= bound)
    }

    fn visit_end_time_lte(&mut self, bound: &str) -> Result<Self::Output, Self::Error> {
        Ok(time_of(self.fields, END_TIME) <= bound)
    }

    fn visit_difficulty_exists(&mut self, should_exist: bool) -> Result<Self::Output, Self::Error> {
        let exists = matches!(self.fields.get(DIFFICULTY_PATH), Some(value) if *value != Bson::Null);

        Ok(exists == should_exist)
    }

    fn visit_difficulty_eq(&mut self, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(self.fields.get(DIFFICULTY_PATH).unwrap_or(&Bson::Null) == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use rosterdb_core::query::Filter;

    fn chess() -> Document {
        doc! {
            "schedule_details": {
                "days": ["Monday", "Friday"],
                "start_time": "15:15",
                "end_time": "16:45",
            },
            "difficulty_level": "Beginner",
        }
    }

    fn matches(fields: &Document, filter: Document) -> bool {
        let query = Query::parse(&filter).unwrap();
        RecordEvaluator::new(fields).evaluate(&query).unwrap()
    }

    #[test]
    fn days_in_needs_one_shared_day() {
        let fields = chess();
        assert!(matches(&fields, Query::builder().filter(Filter::days_in(["Tuesday", "Friday"])).build()));
        assert!(!matches(&fields, Query::builder().filter(Filter::days_in(["Sunday"])).build()));
        assert!(!matches(&fields, Query::builder().filter(Filter::days_in(Vec::<String>::new())).build()));
    }

    #[test]
    fn time_bounds_are_inclusive() {
        let fields = chess();
        assert!(matches(&fields, Query::builder().filter(Filter::starts_at_or_after("15:15")).build()));
        assert!(!matches(&fields, Query::builder().filter(Filter::starts_at_or_after("15:16")).build()));
        assert!(matches(&fields, Query::builder().filter(Filter::ends_at_or_before("16:45")).build()));
        assert!(!matches(&fields, Query::builder().filter(Filter::ends_at_or_before("16:44")).build()));
    }

    #[test]
    fn missing_schedule_reads_as_empty_times() {
        let fields = doc! { "description": "No schedule yet" };

        // "" sorts before any bound, so a start bound fails and an end bound passes
        assert!(!matches(&fields, Query::builder().filter(Filter::starts_at_or_after("06:00")).build()));
        assert!(matches(&fields, Query::builder().filter(Filter::ends_at_or_before("06:00")).build()));
        assert!(!matches(&fields, Query::builder().filter(Filter::days_in(["Monday"])).build()));
    }

    #[test]
    fn difficulty_exists_treats_null_as_absent() {
        assert!(matches(&chess(), doc! { "difficulty_level": { "$exists": true } }));
        assert!(!matches(&doc! {}, doc! { "difficulty_level": { "$exists": true } }));
        assert!(matches(&doc! { "difficulty_level": Bson::Null }, doc! { "difficulty_level": { "$exists": false } }));
    }

    #[test]
    fn difficulty_literal_is_equality() {
        assert!(matches(&chess(), doc! { "difficulty_level": "Beginner" }));
        assert!(!matches(&chess(), doc! { "difficulty_level": "Advanced" }));
        assert!(!matches(&doc! {}, doc! { "difficulty_level": "Beginner" }));
        assert!(matches(&doc! {}, doc! { "difficulty_level": Bson::Null }));
    }

    #[test]
    fn unrecognized_paths_always_match() {
        assert!(matches(&chess(), doc! { "_id": "Drama Club", "participants": "nobody" }));
    }

    #[test]
    fn filter_records_attaches_identity() {
        let records = vec![("Chess Club".to_string(), chess()), ("Quiet Room".to_string(), doc! {})];
        let query = Query::parse(&doc! { "difficulty_level": { "$exists": true } }).unwrap();

        let matched = RecordEvaluator::filter_records(records.iter().map(|(id, fields)| (id, fields)), &query);

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].get_str("_id").unwrap(), "Chess Club");
    }
}
