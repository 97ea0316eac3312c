//! Convenient re-exports of commonly used types from rosterdb.
//!
//! ```ignore
//! use rosterdb::prelude::*;
//! ```

pub use rosterdb_core::{
    collection::{Collection, CollectionExt, InsertOneResult, UpdateResult},
    record::{Entity, EntityExt},
    query::{Query, QueryBuilder, Filter, Clause},
    update::{Update, UpdateBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
};
pub use rosterdb_memory::{InMemoryCollection, RecordMap};

pub use crate::{
    database::Database,
    model::{Activity, ScheduleDetails, Teacher, Role},
    password::{CredentialHasher, Argon2Hasher, hash_password, verify_password},
    seed::{SeedConfig, SeedReport, init_database},
};
