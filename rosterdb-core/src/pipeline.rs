//! Aggregation pipelines.
//!
//! Exactly one pipeline shape is recognized: a leading `$unwind` of
//! `$schedule_details.days`. It yields the sorted distinct meeting days. Stages after the
//! first are not inspected, so the usual `$group`/`$sort` tail is accepted and ignored.

use bson::{Bson, Document};

/// The `$unwind` argument that selects the distinct-days aggregation.
pub const UNWIND_DAYS: &str = "$schedule_details.days";

/// What a pipeline asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Distinct meeting days across all records, sorted, as `{"_id": day}`.
    DistinctDays,
    /// Anything else. Evaluates to no results.
    Unsupported,
}

impl Aggregation {
    pub fn from_pipeline(pipeline: &[Document]) -> Self {
        match pipeline.first().and_then(|stage| stage.get("$unwind")) {
            Some(Bson::String(path)) if path == UNWIND_DAYS => Aggregation::DistinctDays,
            _ => Aggregation::Unsupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn recognizes_leading_days_unwind() {
        let pipeline = [
            doc! { "$unwind": "$schedule_details.days" },
            doc! { "$group": { "_id": "$schedule_details.days" } },
            doc! { "$sort": { "_id": 1 } },
        ];
        assert_eq!(Aggregation::from_pipeline(&pipeline), Aggregation::DistinctDays);
    }

    #[test]
    fn everything_else_is_unsupported() {
        assert_eq!(Aggregation::from_pipeline(&[]), Aggregation::Unsupported);
        assert_eq!(
            Aggregation::from_pipeline(&[doc! { "$unwind": "$participants" }]),
            Aggregation::Unsupported
        );
        assert_eq!(
            Aggregation::from_pipeline(&[
                doc! { "$match": {} },
                doc! { "$unwind": "$schedule_details.days" },
            ]),
            Aggregation::Unsupported
        );
    }
}
