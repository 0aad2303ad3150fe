//! In-Memory State Store Adapter
//!
//! Stores decision payloads in memory. Useful for testing and
//! development; carries a failure switch so tests can exercise the
//! degraded-storage paths.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{StateStore, StateStoreError};

/// In-memory storage for decision state
#[derive(Debug, Clone)]
pub struct InMemoryStateStore {
    slots: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryStateStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent operation fail with an IO error
    /// (useful for tests)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.slots.write().await.clear();
    }

    /// Get the number of stored payloads
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    /// Returns true when nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }

    fn check_failing(&self) -> Result<(), StateStoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StateStoreError::IoError("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StateStoreError> {
        self.check_failing()?;
        let slots = self.slots.read().await;
        Ok(slots.get(key).cloned())
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StateStoreError> {
        self.check_failing()?;
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StateStoreError> {
        self.check_failing()?;
        let mut slots = self.slots.write().await;
        slots.remove(key);
        Ok(())
    }
}
