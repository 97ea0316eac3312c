//! Seed configuration and the one-time bootstrap of an empty database.
//!
//! Seeding is gated on `count_documents` per collection: a collection holding any record
//! is left alone, so running the bootstrap again never duplicates or restores records.

use std::{fs, path::Path};

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use rosterdb_core::{
    collection::{Collection, CollectionExt},
    error::{DocumentStoreError, DocumentStoreResult},
};

use crate::{
    database::Database,
    model::{Activity, Role, Teacher},
    password::CredentialHasher,
};

const BUNDLED_SEED: &str = include_str!("../seed/default.json");

/// A staff account as written in seed configuration, with a plaintext password.
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherSeed {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub role: Role,
}

/// Initial contents for an empty database.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Activity name to activity, in seeding order.
    pub activities: IndexMap<String, Activity>,
    pub teachers: Vec<TeacherSeed>,
}

impl SeedConfig {
    /// Loads the seed shipped with the crate: the Mergington High activities and staff.
    pub fn bundled() -> DocumentStoreResult<Self> {
        Self::from_json_str(BUNDLED_SEED)
    }

    /// Parses a seed from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Configuration`] if the JSON does not describe a seed.
    pub fn from_json_str(json: &str) -> DocumentStoreResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| DocumentStoreError::Configuration(format!("invalid seed: {err}")))
    }

    /// Reads and parses a JSON seed file.
    pub fn from_path(path: impl AsRef<Path>) -> DocumentStoreResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|err| DocumentStoreError::Configuration(format!("cannot read {}: {err}", path.display())))?;

        Self::from_json_str(&json)
    }
}

/// How many records a bootstrap run inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub activities_inserted: usize,
    pub teachers_inserted: usize,
}

/// Fills each empty collection of `db` from `config`.
///
/// Teacher passwords are hashed with `hasher` before insertion, and only when the
/// teachers collection is actually seeded.
pub fn init_database<C, H>(db: &mut Database<C>, config: &SeedConfig, hasher: &H) -> DocumentStoreResult<SeedReport>
where
    C: Collection,
    H: CredentialHasher + ?Sized,
{
    let mut report = SeedReport::default();

    if db.activities.count_documents(&Default::default())? == 0 {
        for (name, activity) in &config.activities {
            db.activities.insert_entity(name, activity)?;
        }
        report.activities_inserted = config.activities.len();
    } else {
        debug!("{} already populated, skipping seed", db.activities.name());
    }

    if db.teachers.count_documents(&Default::default())? == 0 {
        for seed in &config.teachers {
            let teacher = Teacher {
                username: seed.username.clone(),
                display_name: seed.display_name.clone(),
                password: hasher.hash(&seed.password)?,
                role: seed.role,
            };
            db.teachers.insert_entity(&teacher.username, &teacher)?;
        }
        report.teachers_inserted = config.teachers.len();
    } else {
        debug!("{} already populated, skipping seed", db.teachers.name());
    }

    info!(
        "seeded {} activities and {} teachers",
        report.activities_inserted, report.teachers_inserted
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_seed_parses() {
        let config = SeedConfig::bundled().unwrap();

        assert_eq!(config.activities.len(), 13);
        assert_eq!(config.activities.get_index(0).map(|(name, _)| name.as_str()), Some("Chess Club"));
        assert_eq!(config.teachers.len(), 3);
        assert_eq!(config.teachers[2].role, Role::Admin);

        let manga = &config.activities["Manga Maniacs"];
        assert!(manga.participants.is_empty());
        assert_eq!(manga.difficulty_level, None);
    }

    #[test]
    fn malformed_seed_is_a_configuration_error() {
        assert!(matches!(
            SeedConfig::from_json_str(r#"{ "activities": [] }"#),
            Err(DocumentStoreError::Configuration(_))
        ));
        assert!(matches!(
            SeedConfig::from_path("/nonexistent/seed.json"),
            Err(DocumentStoreError::Configuration(_))
        ));
    }
}
