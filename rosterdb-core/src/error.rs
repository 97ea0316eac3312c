//! Error types and result types for document store operations.
//!
//! Absence is not an error in this crate: lookups return `Option` and unmatched updates
//! report a zero count. The variants below cover malformed caller input and conversion
//! failures. Use [`DocumentStoreResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// Serialization/deserialization error when converting between records and models.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The record or identity query is missing a usable `_id`.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// A recognized query path carries an operand of the wrong shape.
    /// The first argument is the field path, the second describes the problem.
    #[error("Invalid query on {0}: {1}")]
    InvalidQuery(String, String),
    /// An update operator cannot be applied.
    /// The first argument is the field, the second describes the problem.
    #[error("Invalid update on {0}: {1}")]
    InvalidUpdate(String, String),
    /// Hashing or verifying a credential failed.
    #[error("Credential error: {0}")]
    Credential(String),
    /// Seed configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<BsonError> for DocumentStoreError {
    fn from(err: BsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
