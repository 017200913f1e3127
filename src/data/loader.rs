//! RON data loader
//!
//! Loads reference data (events, dungeon challenges, loot pools) from RON
//! files, with fallback to the built-in tables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::events::{default_events, EventDescriptor, EventTable};
use crate::dungeon::{default_challenges, ChallengeTable, DungeonChallenge};
use crate::rewards::LootPools;

pub const EVENTS_FILE: &str = "events.ron";
pub const CHALLENGES_FILE: &str = "challenges.ron";
pub const LOOT_POOLS_FILE: &str = "loot_pools.ron";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("Failed to serialize {name}: {source}")]
    Serialize {
        name: &'static str,
        #[source]
        source: ron::Error,
    },
}

/// All reference data the service runs on
#[derive(Debug, Clone)]
pub struct DataManager {
    pub events: Vec<EventDescriptor>,
    pub challenges: Vec<DungeonChallenge>,
    pub loot_pools: LootPools,
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            events: default_events(),
            challenges: default_challenges(),
            loot_pools: LootPools::default(),
        }
    }
}

impl DataManager {
    /// Load from `base_path`, using the built-in table for any file that is
    /// missing or broken
    pub fn load_from_dir(base_path: &Path) -> Self {
        let events = load_or_default(&base_path.join(EVENTS_FILE), || EventTable {
            events: default_events(),
        })
        .events;

        let challenges = load_or_default(&base_path.join(CHALLENGES_FILE), || ChallengeTable {
            challenges: default_challenges(),
        })
        .challenges;

        let loot_pools = load_or_default(&base_path.join(LOOT_POOLS_FILE), LootPools::default);

        log::info!(
            "Loaded {} events, {} dungeon challenges from {}",
            events.len(),
            challenges.len(),
            base_path.display()
        );

        Self { events, challenges, loot_pools }
    }
}

/// Parse one RON file
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_or_default<T: DeserializeOwned>(path: &Path, fallback: impl FnOnce() -> T) -> T {
    if !path.exists() {
        log::debug!("{} not found, using built-in data", path.display());
        return fallback();
    }
    match read_ron(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("{}. Using built-in data.", e);
            fallback()
        }
    }
}

fn write_ron<T: Serialize>(path: &Path, name: &'static str, data: &T) -> Result<(), DataError> {
    let text = ron::ser::to_string_pretty(data, ron::ser::PrettyConfig::default())
        .map_err(|source| DataError::Serialize { name, source })?;
    fs::write(path, text).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the built-in tables to `base_path` as editable RON files
pub fn export_default_data(base_path: &Path) -> Result<(), DataError> {
    fs::create_dir_all(base_path).map_err(|source| DataError::Io {
        path: base_path.to_path_buf(),
        source,
    })?;

    let defaults = DataManager::default();
    write_ron(
        &base_path.join(EVENTS_FILE),
        "events",
        &EventTable { events: defaults.events },
    )?;
    write_ron(
        &base_path.join(CHALLENGES_FILE),
        "challenges",
        &ChallengeTable { challenges: defaults.challenges },
    )?;
    write_ron(&base_path.join(LOOT_POOLS_FILE), "loot pools", &defaults.loot_pools)?;

    log::info!("Exported default data to {}", base_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dir_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let manager = DataManager::load_from_dir(&dir.path().join("nope"));
        assert_eq!(manager.events, default_events());
        assert_eq!(manager.challenges.len(), 3);
        assert_eq!(manager.loot_pools, LootPools::default());
    }

    #[test]
    fn test_export_then_load() {
        let dir = tempfile::tempdir().unwrap();
        export_default_data(dir.path()).unwrap();
        assert!(dir.path().join(EVENTS_FILE).exists());
        assert!(dir.path().join(CHALLENGES_FILE).exists());
        assert!(dir.path().join(LOOT_POOLS_FILE).exists());

        let manager = DataManager::load_from_dir(dir.path());
        assert_eq!(manager.events, default_events());
        assert_eq!(manager.challenges, default_challenges());
    }

    #[test]
    fn test_custom_loot_pools() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(LOOT_POOLS_FILE),
            r#"(normal: ["Pebble"], hard: ["Boulder"], nightmare: ["Mountain"])"#,
        )
        .unwrap();

        let manager = DataManager::load_from_dir(dir.path());
        assert_eq!(manager.loot_pools.normal, vec!["Pebble"]);
        assert_eq!(manager.events.len(), 8);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CHALLENGES_FILE), "(challenges: [oops").unwrap();

        let err = read_ron::<ChallengeTable>(&dir.path().join(CHALLENGES_FILE)).unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));

        let manager = DataManager::load_from_dir(dir.path());
        assert_eq!(manager.challenges, default_challenges());
    }
}
