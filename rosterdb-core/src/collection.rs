//! The collection interface shared by every record store.
//!
//! [`Collection`] carries the document-database style operations the signup service
//! uses: `find`, `find_one`, `insert_one`, `update_one`, `count_documents` and
//! `aggregate`. Queries, updates and pipelines are bson documents; see [`crate::query`],
//! [`crate::update`] and [`crate::pipeline`] for what is understood.
//!
//! [`CollectionExt`] layers typed access on top for models implementing [`Entity`].
//!
//! # Example
//!
//! ```ignore
//! use rosterdb_core::{collection::Collection, update::Update};
//! use bson::doc;
//!
//! fn sign_up(activities: &mut impl Collection, name: &str, email: &str) -> DocumentStoreResult<bool> {
//!     let result = activities.update_one(
//!         &doc! { "_id": name },
//!         &Update::builder().push("participants", email).build(),
//!     )?;
//!     Ok(result.modified_count == 1)
//! }
//! ```

use bson::Document;
use std::fmt::Debug;

use crate::{
    error::DocumentStoreResult,
    record::{Entity, EntityExt},
};

/// Outcome of [`Collection::insert_one`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOneResult {
    pub inserted_id: String,
}

/// Outcome of [`Collection::update_one`].
///
/// `modified_count` is 1 whenever the identity matched, even if no array changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateResult {
    pub const fn matched() -> Self {
        UpdateResult { matched_count: 1, modified_count: 1 }
    }

    pub const fn unmatched() -> Self {
        UpdateResult { matched_count: 0, modified_count: 0 }
    }
}

/// A keyed container of records with a document-database style surface.
///
/// Implementations are synchronous and single-writer: mutations take `&mut self` and
/// the caller serializes access when sharing a collection.
pub trait Collection: Debug {
    /// Returns the name of this collection.
    fn name(&self) -> &str;

    /// Returns every record matching `query`, in insertion order, each with `_id` attached.
    ///
    /// An empty query matches all records.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidQuery`](crate::error::DocumentStoreError::InvalidQuery)
    /// if a recognized operator has a mistyped operand.
    fn find(&self, query: &Document) -> DocumentStoreResult<Vec<Document>>;

    /// Looks a record up by the `_id` in `query`.
    ///
    /// Queries without `_id` always return `None`; other fields of the query are not consulted.
    fn find_one(&self, query: &Document) -> DocumentStoreResult<Option<Document>>;

    /// Stores `record` under its `_id`, replacing any record already stored there.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidDocument`](crate::error::DocumentStoreError::InvalidDocument)
    /// if `record` has no string `_id`.
    fn insert_one(&mut self, record: Document) -> DocumentStoreResult<InsertOneResult>;

    /// Applies `$push` / `$pull` from `update` to the record named by the `_id` in `query`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidDocument`](crate::error::DocumentStoreError::InvalidDocument)
    /// if `query` has no `_id`, or
    /// [`DocumentStoreError::InvalidUpdate`](crate::error::DocumentStoreError::InvalidUpdate)
    /// if the update cannot be applied.
    fn update_one(&mut self, query: &Document, update: &Document) -> DocumentStoreResult<UpdateResult>;

    /// Returns the total number of records. The query is not evaluated.
    fn count_documents(&self, query: &Document) -> DocumentStoreResult<u64>;

    /// Runs an aggregation pipeline. Unrecognized pipelines yield no results.
    fn aggregate(&self, pipeline: &[Document]) -> DocumentStoreResult<Vec<Document>>;
}

/// Typed helpers over any [`Collection`].
pub trait CollectionExt: Collection {
    /// Returns every record, in insertion order.
    fn find_all(&self) -> DocumentStoreResult<Vec<Document>> {
        self.find(&Document::new())
    }

    /// Stores `entity` under `id`.
    fn insert_entity<E: Entity>(&mut self, id: &str, entity: &E) -> DocumentStoreResult<InsertOneResult> {
        let record = entity.to_record(id)?;
        self.insert_one(record)
    }

    /// Looks up and deserializes the entity stored under `id`.
    fn get_entity<E: Entity>(&self, id: &str) -> DocumentStoreResult<Option<E>> {
        let mut query = Document::new();
        query.insert(crate::record::ID_FIELD, id);

        self.find_one(&query)?
            .map(E::from_record)
            .transpose()
    }
}

impl<C: Collection + ?Sized> CollectionExt for C {}
