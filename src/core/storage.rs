//! Durable storage for the goal list
//!
//! The store lives in a single JSON document:
//! `{"goals": [{"goal": "...", "progress": [false, ...]}]}`.
//! A missing or unreadable-as-JSON file is treated as an empty store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::store::GoalStore;
use crate::error::Result;

/// Default storage file, relative to the working directory
pub const DEFAULT_STORAGE_FILE: &str = "growth_tracker.json";

/// Load/save backend for a [`GoalStore`]
#[cfg_attr(test, mockall::automock)]
pub trait GoalStorage {
    /// Read the persisted store
    ///
    /// Missing or malformed data yields an empty store. Other I/O failures
    /// are returned as errors.
    fn load(&self) -> Result<GoalStore>;

    /// Overwrite the persisted store
    fn save(&self, store: &GoalStore) -> Result<()>;
}

/// Goal storage backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_FILE)
    }
}

impl GoalStorage for JsonFileStorage {
    fn load(&self) -> Result<GoalStore> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No goal file yet, starting empty");
                return Ok(GoalStore::default());
            }
            Err(e) => return Err(e.into()),
        };

        // Invalid UTF-8 surfaces as a parse error here, not as an I/O error
        match serde_json::from_slice::<GoalStore>(&contents) {
            Ok(store) => {
                debug!(path = %self.path.display(), goals = store.len(), "Loaded goals");
                Ok(store)
            }
            Err(e) => {
                info!(path = %self.path.display(), error = %e, "Goal file is malformed, starting empty");
                Ok(GoalStore::default())
            }
        }
    }

    fn save(&self, store: &GoalStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(store)?;
        fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), goals = store.len(), "Saved goals");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::goal::Goal;
    use crate::error::TrackerError;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> JsonFileStorage {
        JsonFileStorage::new(dir.path().join(DEFAULT_STORAGE_FILE))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let store = storage.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "{ not json").unwrap();

        let store = storage.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_invalid_utf8_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), [0xff, 0xfe, 0x7b]).unwrap();

        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_fields_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), r#"{"goals": [{"goal": "No progress"}]}"#).unwrap();

        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_ignores_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(
            storage.path(),
            r#"{"theme": "dark", "goals": [{"goal": "Swim", "progress": [true, false, false, false, false]}]}"#,
        )
        .unwrap();

        let store = storage.load().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().text, "Swim");
        assert!(store.get(0).unwrap().progress[0]);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let mut store = GoalStore::default();
        store.add("Learn X");
        store.toggle(0, 2).unwrap();
        storage.save(&store).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(
            loaded.goals,
            vec![Goal {
                text: "Learn X".to_string(),
                progress: [false, false, true, false, false],
            }]
        );
    }

    #[test]
    fn test_save_writes_expected_document() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let mut store = GoalStore::default();
        store.add("Learn X");
        storage.save(&store).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(storage.path()).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({
                "goals": [{"goal": "Learn X", "progress": [false, false, false, false, false]}]
            })
        );
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/deeper/goals.json"));

        storage.save(&GoalStore::default()).unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn test_save_into_directory_fails() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        let result = storage.save(&GoalStore::default());
        assert!(matches!(result, Err(TrackerError::Io(_))));
    }

    #[test]
    fn test_load_directory_fails() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        assert!(matches!(storage.load(), Err(TrackerError::Io(_))));
    }
}
