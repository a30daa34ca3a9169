//! Keyed JSON state file, the host-storage analog for the user library.
//!
//! One record on disk, values addressed by fixed string identifiers.
//! Writes are synchronous and rewrite the whole record; a missing or
//! corrupt file loads as an empty record. There is no versioning or
//! migration layer.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

use crate::errors::AppError;

pub struct StorageManager {
    path: PathBuf,
    record: Mutex<Map<String, Value>>,
}

impl StorageManager {
    /// Open the store at `path`, loading whatever record is already there.
    pub fn open(path: PathBuf) -> Self {
        let record = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Map<String, Value>>(&contents) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("[Storage] Corrupt state file {:?}, starting empty: {}", path, e);
                    Map::new()
                }
            },
            Err(_) => Map::new(),
        };

        Self {
            path,
            record: Mutex::new(record),
        }
    }

    pub fn open_default() -> Self {
        Self::open(crate::config::get_state_file_path())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let record = self.record.lock();
        let value = record.get(key)?.clone();
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("[Storage] Unreadable value under '{}': {}", key, e);
                None
            }
        }
    }

    /// Set `key` and flush the whole record to disk before returning.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let mut record = self.record.lock();
        record.insert(key.to_string(), serde_json::to_value(value)?);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(&*record)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn temp_storage_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("resona-test-{}-{}.json", tag, uuid::Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_round_trips() {
        let path = temp_storage_path("roundtrip");
        let storage = StorageManager::open(path.clone());

        storage.set("likedSongs", &vec!["a", "b"]).unwrap();
        let loaded: Vec<String> = storage.get("likedSongs").unwrap();
        assert_eq!(loaded, vec!["a", "b"]);

        // A fresh handle reads what the first one flushed.
        let reopened = StorageManager::open(path.clone());
        let loaded: Vec<String> = reopened.get("likedSongs").unwrap();
        assert_eq!(loaded, vec!["a", "b"]);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_key_is_none() {
        let path = temp_storage_path("missing");
        let storage = StorageManager::open(path);
        assert!(storage.get::<Vec<String>>("playlists").is_none());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let path = temp_storage_path("corrupt");
        fs::write(&path, "{not json").unwrap();
        let storage = StorageManager::open(path.clone());
        assert!(storage.get::<Vec<String>>("likedSongs").is_none());
        storage.set("likedSongs", &Vec::<String>::new()).unwrap();
        let _ = fs::remove_file(path);
    }
}
