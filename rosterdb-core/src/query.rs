//! Query documents: the recognized field paths, their parsed form, and a builder.
//!
//! Collections accept queries as plain bson documents mapping a field path to either a
//! literal or an operator document. Only four paths are understood:
//!
//! | path                         | operator            | semantics                                   |
//! |------------------------------|---------------------|---------------------------------------------|
//! | `schedule_details.days`      | `$in`               | record days intersect the listed values     |
//! | `schedule_details.start_time`| `$gte`              | `"HH:MM"` string compare, missing is `""`    |
//! | `schedule_details.end_time`  | `$lte`              | `"HH:MM"` string compare, missing is `""`    |
//! | `difficulty_level`           | `$exists` / literal | presence-and-non-null, or equality          |
//!
//! Any other path, and any other operator on a recognized path, is dropped during parsing
//! and therefore always matches.
//!
//! ```ignore
//! use rosterdb_core::query::{Query, Filter};
//!
//! let filter = Query::builder()
//!     .filter(Filter::days_in(["Monday", "Friday"]))
//!     .filter(Filter::starts_at_or_after("15:00"))
//!     .build();
//! ```

use bson::{Bson, Document, doc};

use crate::{
    error::{DocumentStoreError, DocumentStoreResult},
    record::ID_FIELD,
};

/// Path of the meeting days array inside `schedule_details`.
pub const DAYS_PATH: &str = "schedule_details.days";
/// Path of the `"HH:MM"` start time inside `schedule_details`.
pub const START_TIME_PATH: &str = "schedule_details.start_time";
/// Path of the `"HH:MM"` end time inside `schedule_details`.
pub const END_TIME_PATH: &str = "schedule_details.end_time";
/// Path of the optional difficulty tag.
pub const DIFFICULTY_PATH: &str = "difficulty_level";

/// One recognized query clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Record days must share at least one value with the list.
    DaysIn(Vec<Bson>),
    /// Record start time must be at or after the bound.
    StartTimeGte(String),
    /// Record end time must be at or before the bound.
    EndTimeLte(String),
    /// Difficulty presence (non-null) must equal the flag.
    DifficultyExists(bool),
    /// Difficulty must equal the value. A missing field compares as null.
    DifficultyEq(Bson),
}

impl Clause {
    /// Returns the field path and condition this clause is written as.
    pub fn to_entry(&self) -> (&'static str, Bson) {
        match self {
            Clause::DaysIn(days) => (DAYS_PATH, Bson::Document(doc! { "$in": days.clone() })),
            Clause::StartTimeGte(bound) => (START_TIME_PATH, Bson::Document(doc! { "$gte": bound.as_str() })),
            Clause::EndTimeLte(bound) => (END_TIME_PATH, Bson::Document(doc! { "$lte": bound.as_str() })),
            Clause::DifficultyExists(flag) => (DIFFICULTY_PATH, Bson::Document(doc! { "$exists": *flag })),
            Clause::DifficultyEq(value) => (DIFFICULTY_PATH, value.clone()),
        }
    }
}

/// A parsed query: the recognized clauses of a query document, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub clauses: Vec<Clause>,
}

impl Query {
    /// Creates a query that matches every record.
    pub fn new() -> Self {
        Query { clauses: Vec::new() }
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    /// Returns `true` when no clause restricts the result.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Parses a query document.
    ///
    /// Unknown paths and unsupported operators are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidQuery`] when a recognized operator carries an
    /// operand of the wrong type: `$in` must be an array, `$gte`/`$lte` a string, and
    /// `$exists` a boolean.
    pub fn parse(filter: &Document) -> DocumentStoreResult<Self> {
        let mut clauses = Vec::with_capacity(filter.len());

        for (path, condition) in filter {
            let clause = match path.as_str() {
                DAYS_PATH => match operand(condition, "$in") {
                    Some(Bson::Array(days)) => Some(Clause::DaysIn(days.clone())),
                    Some(other) => return Err(invalid(path, "$in", "an array", other)),
                    None => None,
                },
                START_TIME_PATH => match operand(condition, "$gte") {
                    Some(Bson::String(bound)) => Some(Clause::StartTimeGte(bound.clone())),
                    Some(other) => return Err(invalid(path, "$gte", "a string", other)),
                    None => None,
                },
                END_TIME_PATH => match operand(condition, "$lte") {
                    Some(Bson::String(bound)) => Some(Clause::EndTimeLte(bound.clone())),
                    Some(other) => return Err(invalid(path, "$lte", "a string", other)),
                    None => None,
                },
                DIFFICULTY_PATH => match operand(condition, "$exists") {
                    Some(Bson::Boolean(flag)) => Some(Clause::DifficultyExists(*flag)),
                    Some(other) => return Err(invalid(path, "$exists", "a boolean", other)),
                    None => Some(Clause::DifficultyEq(condition.clone())),
                },
                _ => None,
            };

            clauses.extend(clause);
        }

        Ok(Query { clauses })
    }

    /// Writes this query back out as a query document.
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();

        for clause in &self.clauses {
            let (path, condition) = clause.to_entry();
            filter.insert(path, condition);
        }

        filter
    }
}

fn operand<'a>(condition: &'a Bson, op: &str) -> Option<&'a Bson> {
    condition.as_document().and_then(|operators| operators.get(op))
}

fn invalid(path: &str, op: &str, expected: &str, got: &Bson) -> DocumentStoreError {
    DocumentStoreError::InvalidQuery(path.to_string(), format!("{op} expects {expected}, got {got}"))
}

/// Helper for constructing query clauses.
///
/// # Example
///
/// ```ignore
/// use rosterdb_core::query::Filter;
///
/// let weekend = Filter::days_in(["Saturday", "Sunday"]);
/// let tagged = Filter::has_difficulty(true);
/// ```
pub struct Filter;

impl Filter {
    /// Matches records meeting on any of the given days.
    pub fn days_in<I, S>(days: I) -> Clause
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Clause::DaysIn(
            days.into_iter()
                .map(|day| Bson::String(day.into()))
                .collect()
        )
    }

    /// Matches records starting at or after `time` (`"HH:MM"`).
    pub fn starts_at_or_after(time: impl Into<String>) -> Clause {
        Clause::StartTimeGte(time.into())
    }

    /// Matches records ending at or before `time` (`"HH:MM"`).
    pub fn ends_at_or_before(time: impl Into<String>) -> Clause {
        Clause::EndTimeLte(time.into())
    }

    /// Matches records with exactly this difficulty level.
    pub fn difficulty(level: impl Into<Bson>) -> Clause {
        Clause::DifficultyEq(level.into())
    }

    /// Matches records whose difficulty level is (or is not) set.
    pub fn has_difficulty(flag: bool) -> Clause {
        Clause::DifficultyExists(flag)
    }
}

/// Fluent builder producing a query document.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    filter: Document,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder { filter: Document::new() }
    }

    /// Restricts the query to a single identity key.
    ///
    /// Only `find_one` and `update_one` honor this; `find` ignores `_id`.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.filter.insert(ID_FIELD, id.into());
        self
    }

    /// Adds a clause. A second clause on the same path replaces the first.
    pub fn filter(mut self, clause: Clause) -> Self {
        let (path, condition) = clause.to_entry();
        self.filter.insert(path, condition);
        self
    }

    /// Builds and returns the query document.
    pub fn build(self) -> Document {
        self.filter
    }
}

/// Dispatches parsed clauses to an evaluator.
pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_days_in(&mut self, days: &[Bson]) -> Result<Self::Output, Self::Error>;
    fn visit_start_time_gte(&mut self, bound: &str) -> Result<Self::Output, Self::Error>;
    fn visit_end_time_lte(&mut self, bound: &str) -> Result<Self::Output, Self::Error>;
    fn visit_difficulty_exists(&mut self, should_exist: bool) -> Result<Self::Output, Self::Error>;
    fn visit_difficulty_eq(&mut self, value: &Bson) -> Result<Self::Output, Self::Error>;

    fn visit_clause(&mut self, clause: &Clause) -> Result<Self::Output, Self::Error> {
        match clause {
            Clause::DaysIn(days) => self.visit_days_in(days),
            Clause::StartTimeGte(bound) => self.visit_start_time_gte(bound),
            Clause::EndTimeLte(bound) => self.visit_end_time_lte(bound),
            Clause::DifficultyExists(flag) => self.visit_difficulty_exists(*flag),
            Clause::DifficultyEq(value) => self.visit_difficulty_eq(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_recognized_clauses_in_order() {
        let query = Query::parse(&doc! {
            "difficulty_level": { "$exists": true },
            "schedule_details.days": { "$in": ["Monday"] },
            "schedule_details.start_time": { "$gte": "15:00" },
            "schedule_details.end_time": { "$lte": "17:00" },
        })
        .unwrap();

        assert_eq!(
            query.clauses,
            vec![
                Clause::DifficultyExists(true),
                Clause::DaysIn(vec![Bson::String("Monday".into())]),
                Clause::StartTimeGte("15:00".into()),
                Clause::EndTimeLte("17:00".into()),
            ]
        );
    }

    #[test]
    fn parse_drops_unknown_paths_and_operators() {
        let query = Query::parse(&doc! {
            "_id": "Chess Club",
            "participants": { "$in": ["a@x.edu"] },
            "schedule_details.days": "Monday",
            "schedule_details.start_time": { "$lte": "09:00" },
        })
        .unwrap();

        assert!(query.is_empty());
    }

    #[test]
    fn parse_treats_plain_difficulty_as_equality() {
        let query = Query::parse(&doc! { "difficulty_level": "Advanced" }).unwrap();
        assert_eq!(query.clauses, vec![Clause::DifficultyEq(Bson::String("Advanced".into()))]);
    }

    #[test]
    fn parse_rejects_mistyped_operands() {
        let cases = [
            doc! { "schedule_details.days": { "$in": "Monday" } },
            doc! { "schedule_details.start_time": { "$gte": 900 } },
            doc! { "schedule_details.end_time": { "$lte": Bson::Null } },
            doc! { "difficulty_level": { "$exists": 1 } },
        ];

        for filter in cases {
            assert!(
                matches!(Query::parse(&filter), Err(DocumentStoreError::InvalidQuery(..))),
                "expected rejection of {filter}"
            );
        }
    }

    #[test]
    fn builder_output_parses_back_to_the_same_clauses() {
        let filter = Query::builder()
            .filter(Filter::days_in(["Saturday", "Sunday"]))
            .filter(Filter::ends_at_or_before("17:00"))
            .filter(Filter::difficulty("Advanced"))
            .build();

        assert_eq!(
            filter,
            doc! {
                "schedule_details.days": { "$in": ["Saturday", "Sunday"] },
                "schedule_details.end_time": { "$lte": "17:00" },
                "difficulty_level": "Advanced",
            }
        );
        assert_eq!(Query::parse(&filter).unwrap().to_document(), filter);
    }

    #[test]
    fn builder_id_sets_identity_field() {
        assert_eq!(Query::builder().id("mchen").build(), doc! { "_id": "mchen" });
    }
}
