//! rosterdb: the record store behind the Mergington High activities signup service.
//!
//! This crate is the entry point. It re-exports the core types and the in-memory
//! collection, and adds the service's models, seed data and credential hashing.
//!
//! # Features
//!
//! - **Document-database style collections** - `find`, `find_one`, `insert_one`,
//!   `update_one`, `count_documents` and `aggregate` over bson records
//! - **Typed models** - [`model::Activity`] and [`model::Teacher`] convert to and from records
//! - **Idempotent bootstrap** - Empty collections are seeded once from [`seed::SeedConfig`]
//! - **Argon2 credentials** - Staff passwords are hashed before they are stored
//!
//! # Quick Start
//!
//! ```ignore
//! use rosterdb::prelude::*;
//! use bson::doc;
//!
//! let mut db = Database::bootstrap()?;
//!
//! // Activities meeting on Monday that have a difficulty tag
//! let filter = Query::builder()
//!     .filter(Filter::days_in(["Monday"]))
//!     .filter(Filter::has_difficulty(true))
//!     .build();
//! let monday = db.activities.find(&filter)?;
//!
//! // Sign a student up
//! let result = db.activities.update_one(
//!     &Query::builder().id("Chess Club").build(),
//!     &Update::builder().push("participants", "new@mergington.edu").build(),
//! )?;
//! assert_eq!(result.modified_count, 1);
//! ```

pub mod database;
pub mod model;
pub mod password;
pub mod prelude;
pub mod seed;

pub use rosterdb_core::{collection, error, pipeline, query, record, update};

pub use database::Database;

// Re-export BSON types for convenience
pub use bson;

/// In-memory collection implementation.
pub mod memory {
    pub use rosterdb_memory::{InMemoryCollection, InMemoryCollectionBuilder, RecordMap};
}
