//! File-based State Store Adapter
//!
//! Stores decision payloads as JSON files on disk, one file per storage
//! key. The workspace survives restarts and is easy to inspect by hand.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{StateStore, StateStoreError};

/// File-based storage for decision state
#[derive(Debug, Clone)]
pub struct FileStateStore {
    base_path: PathBuf,
}

impl FileStateStore {
    /// Create a new file store with a base directory
    ///
    /// # Arguments
    /// * `base_path` - The root directory for storing decision data
    ///
    /// # Example
    /// ```ignore
    /// let store = FileStateStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a storage key
    fn slot_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    /// Ensure the base directory exists
    async fn ensure_base_dir(&self) -> Result<(), StateStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StateStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StateStoreError> {
        let path = self.slot_path(key);

        // A missing file means nothing was stored yet
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)
            .await
            .map_err(|e| StateStoreError::IoError(e.to_string()))?;

        Ok(Some(bytes))
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StateStoreError> {
        self.ensure_base_dir().await?;

        let path = self.slot_path(key);

        fs::write(&path, bytes)
            .await
            .map_err(|e| StateStoreError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StateStoreError> {
        let path = self.slot_path(key);

        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| StateStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());

        store.write("slot", b"{\"version\":2}").await.unwrap();

        let loaded = store.read("slot").await.unwrap();
        assert_eq!(loaded, Some(b"{\"version\":2}".to_vec()));
    }

    #[tokio::test]
    async fn test_file_store_read_missing_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());

        let loaded = store.read("never_written").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_file_store_write_replaces_previous_payload() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());

        store.write("slot", b"first").await.unwrap();
        store.write("slot", b"second").await.unwrap();

        let loaded = store.read("slot").await.unwrap();
        assert_eq!(loaded, Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn test_file_store_creates_missing_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("deeply").join("nested");
        let store = FileStateStore::new(&nested);

        store.write("slot", b"payload").await.unwrap();

        assert!(nested.join("slot.json").exists());
    }

    #[tokio::test]
    async fn test_file_store_delete_removes_payload() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());

        store.write("slot", b"payload").await.unwrap();
        store.delete("slot").await.unwrap();

        let loaded = store.read("slot").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_file_store_delete_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());

        store.delete("never_written").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_keys_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());

        store.write("one", b"1").await.unwrap();
        store.write("two", b"2").await.unwrap();
        store.delete("one").await.unwrap();

        assert!(store.read("one").await.unwrap().is_none());
        assert_eq!(store.read("two").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn test_file_store_uses_json_extension() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::new(temp_dir.path());

        store.write("decision_master_data", b"{}").await.unwrap();

        assert!(temp_dir.path().join("decision_master_data.json").exists());
    }
}
