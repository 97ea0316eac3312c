//! In-memory collection implementation.
//!
//! Records are kept in an insertion-ordered map from identity key to field document.
//! Replacing a record keeps its original position, so enumeration order is the order
//! in which keys were first inserted.

use std::collections::BTreeSet;

use bson::{Bson, Document};
use indexmap::IndexMap;
use log::{debug, warn};

use rosterdb_core::{
    collection::{Collection, InsertOneResult, UpdateResult},
    error::{DocumentStoreError, DocumentStoreResult},
    pipeline::Aggregation,
    query::Query,
    record::{ID_FIELD, id_of, split_id, with_id},
    update::Update,
};

use crate::evaluator::{RecordEvaluator, days_of};

/// Identity key to record fields, in insertion order.
pub type RecordMap = IndexMap<String, Document>;

const DEFAULT_NAME: &str = "records";

/// An in-memory [`Collection`].
///
/// Each instance owns its own [`RecordMap`]; two collections never share records.
/// Every query scans all records.
///
/// # Example
///
/// ```ignore
/// use rosterdb_memory::InMemoryCollection;
/// use rosterdb_core::collection::Collection;
/// use bson::doc;
///
/// let mut activities = InMemoryCollection::new("activities");
/// activities.insert_one(doc! { "_id": "Chess Club", "participants": ["a@x.edu"] })?;
///
/// let record = activities.find_one(&doc! { "_id": "Chess Club" })?;
/// assert!(record.is_some());
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryCollection {
    name: String,
    records: RecordMap,
}

impl InMemoryCollection {
    /// Creates an empty collection with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: RecordMap::new(),
        }
    }

    /// Creates a builder for wrapping an existing [`RecordMap`].
    pub fn builder() -> InMemoryCollectionBuilder {
        InMemoryCollectionBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrows the underlying map.
    pub fn records(&self) -> &RecordMap {
        &self.records
    }

    /// Consumes the collection, returning the underlying map.
    pub fn into_records(self) -> RecordMap {
        self.records
    }
}

impl Collection for InMemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, query: &Document) -> DocumentStoreResult<Vec<Document>> {
        let query = Query::parse(query)?;

        if query.is_empty() {
            return Ok(
                self.records
                    .iter()
                    .map(|(id, fields)| with_id(id, fields))
                    .collect()
            );
        }

        Ok(RecordEvaluator::filter_records(&self.records, &query))
    }

    fn find_one(&self, query: &Document) -> DocumentStoreResult<Option<Document>> {
        Ok(
            id_of(query)
                .and_then(|id| {
                    self.records
                        .get(id)
                        .map(|fields| with_id(id, fields))
                })
        )
    }

    fn insert_one(&mut self, record: Document) -> DocumentStoreResult<InsertOneResult> {
        let (id, fields) = split_id(record)?;

        if self.records.insert(id.clone(), fields).is_some() {
            debug!("replaced record {id} in {}", self.name);
        } else {
            debug!("inserted record {id} into {}", self.name);
        }

        Ok(InsertOneResult { inserted_id: id })
    }

    fn update_one(&mut self, query: &Document, update: &Document) -> DocumentStoreResult<UpdateResult> {
        let id = match query.get(ID_FIELD) {
            Some(Bson::String(id)) => id,
            Some(_) => return Ok(UpdateResult::unmatched()),
            None => {
                return Err(DocumentStoreError::InvalidDocument(format!(
                    "update_one on {} requires {ID_FIELD} in the query",
                    self.name
                )));
            }
        };

        let update = Update::parse(update)?;

        if !update.ignored.is_empty() {
            warn!(
                "ignoring unsupported update operators {:?} on {} in {}",
                update.ignored, id, self.name
            );
        }

        match self.records.get_mut(id) {
            Some(fields) => {
                update.apply(fields)?;
                debug!("applied {} update op(s) to {id} in {}", update.ops.len(), self.name);

                Ok(UpdateResult::matched())
            }
            None => Ok(UpdateResult::unmatched()),
        }
    }

    fn count_documents(&self, _query: &Document) -> DocumentStoreResult<u64> {
        Ok(self.records.len() as u64)
    }

    fn aggregate(&self, pipeline: &[Document]) -> DocumentStoreResult<Vec<Document>> {
        match Aggregation::from_pipeline(pipeline) {
            Aggregation::DistinctDays => {
                let days = self.records
                    .values()
                    .flat_map(days_of)
                    .filter_map(Bson::as_str)
                    .collect::<BTreeSet<_>>();

                Ok(
                    days.into_iter()
                        .map(|day| {
                            let mut group = Document::new();
                            group.insert(ID_FIELD, day);
                            group
                        })
                        .collect()
                )
            }
            Aggregation::Unsupported => Ok(vec![]),
        }
    }
}

/// Builder for constructing [`InMemoryCollection`] instances around a caller-supplied map.
///
/// ```ignore
/// use rosterdb_memory::{InMemoryCollection, RecordMap};
///
/// let teachers = InMemoryCollection::builder()
///     .name("teachers")
///     .records(RecordMap::new())
///     .build();
/// ```
#[derive(Default)]
pub struct InMemoryCollectionBuilder {
    name: Option<String>,
    records: RecordMap,
}

impl InMemoryCollectionBuilder {
    /// Sets the collection name used in logs and errors. Defaults to `"records"`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the map the collection starts from.
    pub fn records(mut self, records: RecordMap) -> Self {
        self.records = records;
        self
    }

    pub fn build(self) -> InMemoryCollection {
        InMemoryCollection {
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            records: self.records,
        }
    }
}
