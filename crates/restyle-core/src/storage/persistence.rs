//! Key-value persistence
//!
//! The style store talks to an abstract async key-value capability so the
//! backing medium can be swapped out (notably with an in-memory fake in
//! tests). The default backing is a single JSON file holding the whole
//! namespace; writes are atomic (write to temp file, fsync, then rename) to
//! prevent a partially-written file from ever becoming visible.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::error::{StorageError, StorageResult};

/// Asynchronous key-value capability over a namespaced local store
///
/// Values are JSON. A missing key reads as `None`; setting a key overwrites
/// any previous value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Value) -> StorageResult<()>;

    /// List every key currently present in the namespace (diagnostics)
    async fn keys(&self) -> StorageResult<Vec<String>>;
}

/// File-backed key-value store
///
/// The entire namespace lives in one JSON file: a map from key to value.
/// Each `set` rewrites the file atomically.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file path
    ///
    /// The file is created lazily on first write; a missing file reads as an
    /// empty namespace.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_namespace(&self) -> StorageResult<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StorageError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| StorageError::InvalidFormat {
            context: format!("'{}'", self.path.display()),
            details: e.to_string(),
        })
    }

    fn write_namespace(&self, namespace: &BTreeMap<String, Value>) -> StorageResult<()> {
        let data = serde_json::to_vec_pretty(namespace).map_err(|e| StorageError::InvalidFormat {
            context: format!("'{}'", self.path.display()),
            details: e.to_string(),
        })?;
        atomic_write(&self.path, &data)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        let namespace = self.read_namespace()?;
        Ok(namespace.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        let mut namespace = self.read_namespace()?;
        namespace.insert(key.to_string(), value);
        self.write_namespace(&namespace)?;
        debug!(key, path = %self.path.display(), "persisted key");
        Ok(())
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let namespace = self.read_namespace()?;
        Ok(namespace.keys().cloned().collect())
    }
}

/// In-memory key-value store for tests
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    // Temp file in the same directory, for atomic rename
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn file_store(temp_dir: &TempDir) -> FileStore {
        FileStore::new(temp_dir.path().join("store.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);

        assert!(store.get("anything").await.unwrap().is_none());
        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);

        store.set("alpha", json!({"n": 1})).await.unwrap();
        assert_eq!(store.get("alpha").await.unwrap(), Some(json!({"n": 1})));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);

        store.set("alpha", json!(1)).await.unwrap();
        store.set("alpha", json!(2)).await.unwrap();
        assert_eq!(store.get("alpha").await.unwrap(), Some(json!(2)));
        assert_eq!(store.keys().await.unwrap(), vec!["alpha".to_string()]);
    }

    #[tokio::test]
    async fn test_keys_lists_all_entries() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);

        store.set("b", json!(2)).await.unwrap();
        store.set("a", json!(1)).await.unwrap();
        assert_eq!(
            store.keys().await.unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        {
            let store = FileStore::new(&path);
            store.set("alpha", json!("kept")).await.unwrap();
        }

        let store = FileStore::new(&path);
        assert_eq!(store.get("alpha").await.unwrap(), Some(json!("kept")));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_typed_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        let err = store.get("alpha").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidFormat { .. }));
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = file_store(&temp_dir);

        store.set("alpha", json!(1)).await.unwrap();
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("a").join("b").join("file.json");

        atomic_write(&nested_path, b"{}").unwrap();

        assert!(nested_path.exists());
        assert_eq!(fs::read_to_string(&nested_path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();

        assert!(store.get("k").await.unwrap().is_none());
        store.set("k", json!([1, 2, 3])).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!([1, 2, 3])));
        assert_eq!(store.keys().await.unwrap(), vec!["k".to_string()]);
    }
}
