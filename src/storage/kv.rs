//! Key-value persistence for small structured records
//!
//! The credential store only ever talks to a [`KeyValueStore`]. Values are
//! JSON documents addressed by string keys, mirroring browser local storage.
//!
//! Every implementation here is fail-open: a value that cannot be read is
//! reported as absent and a write that cannot be completed is dropped. Both
//! cases emit a `tracing` warning instead of an error, since losing a demo
//! session or account is preferable to refusing to start.
//!
//! There is no cross-process locking. Two processes sharing one
//! [`JsonFileStore`] file are last-writer-wins.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use super::file_io::{read_json, write_json_atomic};

/// Get/set/remove of JSON values by string key
pub trait KeyValueStore {
    /// Read a value, `None` when missing or unreadable
    fn get(&self, key: &str) -> Option<Value>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: Value);

    /// Delete a value; removing a missing key is a no-op
    fn remove(&self, key: &str);
}

/// Read a typed record, treating malformed data as absent
pub fn read_as<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let value = store.get(key)?;
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored value");
            None
        }
    }
}

/// Serialize and store a typed record
pub fn write_as<T, S>(store: &S, key: &str, record: &T)
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    match serde_json::to_value(record) {
        Ok(value) => store.set(key, value),
        Err(e) => tracing::warn!(key, error = %e, "could not serialize value, not stored"),
    }
}

/// In-process store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        match self.entries.read() {
            Ok(entries) => entries.get(key).cloned(),
            Err(e) => {
                tracing::warn!(key, error = %e, "memory store lock poisoned on read");
                None
            }
        }
    }

    fn set(&self, key: &str, value: Value) {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value);
            }
            Err(e) => tracing::warn!(key, error = %e, "memory store lock poisoned on write"),
        }
    }

    fn remove(&self, key: &str) {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.remove(key);
            }
            Err(e) => tracing::warn!(key, error = %e, "memory store lock poisoned on remove"),
        }
    }
}

/// Store backed by a single JSON object file
///
/// The file is re-read on every access so that changes made by another
/// process are picked up; writes replace the whole file atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> Map<String, Value> {
        match read_json::<Map<String, Value>, _>(&self.path) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "treating unreadable store as empty"
                );
                Map::new()
            }
        }
    }

    fn persist(&self, map: &Map<String, Value>) {
        if let Err(e) = write_json_atomic(&self.path, map) {
            tracing::warn!(path = %self.path.display(), error = %e, "store write dropped");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: Value) {
        let mut map = self.load();
        map.insert(key.to_string(), value);
        self.persist(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.load();
        if map.remove(key).is_some() {
            self.persist(&map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Marker {
        label: String,
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("k").is_none());

        store.set("k", json!({"a": 1}));
        assert_eq!(store.get("k"), Some(json!({"a": 1})));

        store.remove("k");
        assert!(store.get("k").is_none());

        // Removing again is harmless
        store.remove("k");
    }

    #[test]
    fn test_typed_helpers() {
        let store = MemoryStore::new();
        write_as(&store, "m", &Marker { label: "x".into() });

        let back: Option<Marker> = read_as(&store, "m");
        assert_eq!(back, Some(Marker { label: "x".into() }));
    }

    #[test]
    fn test_malformed_typed_value_reads_as_absent() {
        let store = MemoryStore::new();
        store.set("m", json!([1, 2, 3]));

        let back: Option<Marker> = read_as(&store, "m");
        assert!(back.is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        JsonFileStore::new(path.clone()).set("session", json!({"username": "a@b.co"}));

        let reopened = JsonFileStore::new(path);
        assert_eq!(
            reopened.get("session"),
            Some(json!({"username": "a@b.co"}))
        );
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("store.json"));

        store.set("one", json!(1));
        store.set("two", json!(2));
        store.remove("one");

        assert!(store.get("one").is_none());
        assert_eq!(store.get("two"), Some(json!(2)));
    }

    // Fail-open policy: a corrupt file is read as empty, and the next write
    // replaces it rather than erroring.
    #[test]
    fn test_corrupt_file_is_treated_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        std::fs::write(&path, "{{{ definitely not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(store.get("anything").is_none());

        store.set("fresh", json!(true));
        assert_eq!(store.get("fresh"), Some(json!(true)));
    }

    // Fail-open policy: an unwritable location drops the write silently.
    #[test]
    fn test_unwritable_location_drops_write() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let store = JsonFileStore::new(blocker.join("store.json"));
        store.set("k", json!(1));
        assert!(store.get("k").is_none());
    }
}
