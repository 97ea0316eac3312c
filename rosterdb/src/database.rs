//! The signup service's two collections, constructed and seeded explicitly.
//!
//! ```ignore
//! use rosterdb::Database;
//!
//! let mut db = Database::in_memory();
//! db.seed(&SeedConfig::bundled()?, &Argon2Hasher)?;
//! // hand `db` (or `&mut db.activities`) to whatever serves requests
//! ```

use bson::{Bson, Document, doc};

use rosterdb_core::{
    collection::Collection,
    error::DocumentStoreResult,
    pipeline::UNWIND_DAYS,
    record::{Entity, ID_FIELD},
};
use rosterdb_memory::InMemoryCollection;

use crate::{
    model::{Activity, Teacher},
    password::{Argon2Hasher, CredentialHasher},
    seed::{self, SeedConfig, SeedReport},
};

/// Activities and teacher accounts.
#[derive(Debug, Clone)]
pub struct Database<C: Collection = InMemoryCollection> {
    pub activities: C,
    pub teachers: C,
}

impl<C: Collection> Database<C> {
    pub fn new(activities: C, teachers: C) -> Self {
        Self { activities, teachers }
    }

    /// Seeds every empty collection. See [`seed::init_database`].
    pub fn seed<H>(&mut self, config: &SeedConfig, hasher: &H) -> DocumentStoreResult<SeedReport>
    where
        H: CredentialHasher + ?Sized,
    {
        seed::init_database(self, config, hasher)
    }

    /// Every day on which at least one activity meets, sorted.
    pub fn meeting_days(&self) -> DocumentStoreResult<Vec<String>> {
        Ok(
            self.activities
                .aggregate(&[doc! { "$unwind": UNWIND_DAYS }])?
                .iter()
                .filter_map(|group: &Document| match group.get(ID_FIELD) {
                    Some(Bson::String(day)) => Some(day.clone()),
                    _ => None,
                })
                .collect()
        )
    }
}

impl Database<InMemoryCollection> {
    /// Two empty in-memory collections.
    pub fn in_memory() -> Self {
        Self::new(
            InMemoryCollection::new(Activity::collection_name()),
            InMemoryCollection::new(Teacher::collection_name()),
        )
    }

    /// In-memory collections seeded from the bundled seed with Argon2 credentials.
    pub fn bootstrap() -> DocumentStoreResult<Self> {
        let mut db = Self::in_memory();
        db.seed(&SeedConfig::bundled()?, &Argon2Hasher)?;

        Ok(db)
    }
}
