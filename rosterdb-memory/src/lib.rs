//! In-memory collections for rosterdb.
//!
//! This crate provides [`InMemoryCollection`], the only implementation of the
//! `Collection` trait. It is synchronous and unlocked: one writer at a time.
//!
//! # Features
//!
//! - **Insertion-ordered records** - Enumeration follows first insertion of each key
//! - **Closed query vocabulary** - Days, start/end time bounds and difficulty
//! - **Array updates** - `$push` and `$pull`
//! - **Distinct days** - The one supported aggregation pipeline
//!
//! # Quick Start
//!
//! ```ignore
//! use rosterdb_memory::InMemoryCollection;
//! use rosterdb_core::{collection::Collection, update::Update};
//! use bson::doc;
//!
//! let mut activities = InMemoryCollection::new("activities");
//! activities.insert_one(doc! {
//!     "_id": "Chess Club",
//!     "participants": ["a@x.edu"],
//!     "max_participants": 2,
//! })?;
//!
//! activities.update_one(
//!     &doc! { "_id": "Chess Club" },
//!     &Update::builder().push("participants", "b@x.edu").build(),
//! )?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as rosterdb_memory;

pub mod store;
pub mod evaluator;

pub use store::{InMemoryCollection, InMemoryCollectionBuilder, RecordMap};
