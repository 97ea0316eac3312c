//! Core types for rosterdb, a small in-memory document store behind a document-database
//! style interface.
//!
//! This crate provides:
//!
//! - **Collection interface** ([`collection`]) - The `find` / `insert_one` / `update_one` surface
//! - **Records and entities** ([`record`]) - Identity handling and typed model conversion
//! - **Queries** ([`query`]) - The recognized field paths, parsing and a builder
//! - **Updates** ([`update`]) - `$push` / `$pull` parsing and application
//! - **Pipelines** ([`pipeline`]) - The single supported aggregation
//! - **Error handling** ([`error`]) - Error and result types
//!
//! Storage lives in `rosterdb-memory`; models and seeding live in `rosterdb`.

#[allow(unused_extern_crates)]
extern crate self as rosterdb_core;

pub mod collection;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod update;
