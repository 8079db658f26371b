//! Key-value persistence for session state
//!
//! Mirrors the browser storage model the calculator grew up with:
//! independent string values under fixed keys, each rewritten
//! synchronously whenever its in-memory counterpart changes. The JSON
//! file store is the durable implementation; the in-memory store backs
//! tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const KEY_CHARGE: &str = "rlc_charge";
pub const KEY_ROWS: &str = "rlc_rows";
pub const KEY_CUP_PER: &str = "rlc_cup_per";
pub const KEY_CUP_NUM: &str = "rlc_cup_num";
pub const KEY_TARGET: &str = "rlc_target";
pub const KEY_LEVELS: &str = "rlc_levels";

/// String-keyed storage with one writer and no partial failure recovery:
/// a value either reads back or the caller substitutes its default.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// Store backed by a single JSON object on disk
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store file. A missing or malformed file reads as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    fn flush(&self) -> AppResult<()> {
        let text = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// In-memory store for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("absent.json"));
        assert_eq!(store.get(KEY_CHARGE), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(&path);
        store.set(KEY_CHARGE, "130").unwrap();
        store.set(KEY_TARGET, "100").unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(KEY_CHARGE).as_deref(), Some("130"));
        assert_eq!(reopened.get(KEY_TARGET).as_deref(), Some("100"));
    }

    #[test]
    fn test_malformed_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{broken").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get(KEY_ROWS), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = MemoryStore::default();
        store.set(KEY_CHARGE, "130").unwrap();
        store.set(KEY_CHARGE, "150").unwrap();
        assert_eq!(store.get(KEY_CHARGE).as_deref(), Some("150"));
    }
}
