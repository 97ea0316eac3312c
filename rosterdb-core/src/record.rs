//! Records and the typed entities stored as records.
//!
//! A record is a plain [`bson::Document`]. Collections keep the identity key outside the
//! field mapping and attach it as a leading `_id` field whenever a record leaves the
//! store. The helpers here do that attach/detach step, and [`Entity`] / [`EntityExt`]
//! convert serde models to and from records.

use bson::{Bson, Document, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// Name of the synthetic identity field.
pub const ID_FIELD: &str = "_id";

/// Builds the outward view of a stored record: `_id` first, then the stored fields in order.
pub fn with_id(id: &str, fields: &Document) -> Document {
    let mut record = Document::new();
    record.insert(ID_FIELD, id);

    for (key, value) in fields {
        record.insert(key.clone(), value.clone());
    }

    record
}

/// Reads the `_id` of a query or record as a string key.
///
/// Returns `None` when the field is absent or not a string.
pub fn id_of(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(Bson::as_str)
}

/// Splits a record into its identity key and its remaining fields.
///
/// # Errors
///
/// Returns [`DocumentStoreError::InvalidDocument`] if `_id` is missing or not a string.
pub fn split_id(mut record: Document) -> DocumentStoreResult<(String, Document)> {
    match record.remove(ID_FIELD) {
        Some(Bson::String(id)) => Ok((id, record)),
        Some(other) => Err(DocumentStoreError::InvalidDocument(format!(
            "{ID_FIELD} must be a string, got {other}"
        ))),
        None => Err(DocumentStoreError::InvalidDocument(format!(
            "record has no {ID_FIELD} field"
        ))),
    }
}

/// A typed model that lives in a named collection.
///
/// The identity key is not part of the model's contract: an activity is keyed by its
/// name, which is not one of its fields, while a teacher is keyed by a field it also
/// carries. Callers pass the key explicitly when converting to a record.
///
/// # Example
///
/// ```ignore
/// use rosterdb_core::record::Entity;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Room {
///     pub capacity: i32,
/// }
///
/// impl Entity for Room {
///     fn collection_name() -> &'static str {
///         "rooms"
///     }
/// }
/// ```
pub trait Entity: Serialize + DeserializeOwned + Clone + 'static {
    /// Returns the name of the collection this entity belongs to.
    fn collection_name() -> &'static str;
}

/// Conversion helpers between entities and records.
///
/// Implemented for every [`Entity`].
pub trait EntityExt: Entity {
    /// Serializes this entity into a record carrying `id` as its `_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the entity does not serialize to a document.
    fn to_record(&self, id: &str) -> DocumentStoreResult<Document>;

    /// Deserializes an entity from a record. The `_id` field is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not have the entity's shape.
    fn from_record(record: Document) -> DocumentStoreResult<Self>;
}

impl<E: Entity> EntityExt for E {
    fn to_record(&self, id: &str) -> DocumentStoreResult<Document> {
        match serialize_to_bson(self)? {
            Bson::Document(fields) => Ok(with_id(id, &fields)),
            other => Err(DocumentStoreError::Serialization(format!(
                "{} entity serialized to {other}, expected a document",
                E::collection_name()
            ))),
        }
    }

    fn from_record(record: Document) -> DocumentStoreResult<Self> {
        Ok(deserialize_from_bson(Bson::Document(record))?)
    }
}
