//! High score persistence over a small string-keyed store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// All keys live in one JSON object on disk; every `set` rewrites the file.
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str(&text)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// An empty store that will write to `path` on the first `set`.
    pub fn empty(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), entries: BTreeMap::new() }
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

#[derive(Default)]
#[cfg_attr(not(test), allow(dead_code))]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Stored high score, or 0 when absent or not a JSON integer.
pub fn load_high_score(store: &dyn KeyValueStore, key: &str) -> u32 {
    store
        .get(key)
        .and_then(|v| serde_json::from_str::<u32>(&v).ok())
        .unwrap_or(0)
}

pub fn save_high_score(store: &mut dyn KeyValueStore, key: &str, score: u32) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(&score)?;
    store.set(key, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("snake_rounded_{}_{}.json", name, std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn absent_key_loads_as_zero() {
        let store = MemoryStore::default();
        assert_eq!(load_high_score(&store, "hiscore"), 0);
    }

    #[test]
    fn malformed_value_loads_as_zero() {
        let mut store = MemoryStore::default();
        store.set("hiscore", "not a number").unwrap();
        assert_eq!(load_high_score(&store, "hiscore"), 0);
        store.set("hiscore", "-3").unwrap();
        assert_eq!(load_high_score(&store, "hiscore"), 0);
    }

    #[test]
    fn saved_score_reads_back() {
        let mut store = MemoryStore::default();
        save_high_score(&mut store, "hiscore", 17).unwrap();
        assert_eq!(store.get("hiscore").as_deref(), Some("17"));
        assert_eq!(load_high_score(&store, "hiscore"), 17);
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = scratch_path("reopen");
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            assert_eq!(load_high_score(&store, "hiscore"), 0);
            save_high_score(&mut store, "hiscore", 42).unwrap();
            store.set("other", "x").unwrap();
        }
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(load_high_score(&store, "hiscore"), 42);
        assert_eq!(store.get("other").as_deref(), Some("x"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{ this is not json").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Json(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn empty_store_creates_file_on_set() {
        let path = scratch_path("empty");
        let mut store = JsonFileStore::empty(&path);
        assert_eq!(store.path(), path.as_path());
        save_high_score(&mut store, "hiscore", 3).unwrap();
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }
}
