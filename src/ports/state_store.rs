//! State Store Port - Interface for persisting decision state.
//!
//! This port defines how decision snapshots are saved and loaded,
//! supporting both file-based and in-memory storage. The store deals
//! in opaque byte payloads; snapshot encoding is the caller's concern.

use async_trait::async_trait;

/// Storage key under which the single decision workspace lives.
///
/// Matches the slot name used by earlier releases so existing data
/// keeps loading.
pub const DEFAULT_STATE_KEY: &str = "decision_master_data";

/// Errors that can occur during state store operations
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),
}

/// Port for persisting and loading decision state payloads
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the payload stored under `key`.
    ///
    /// # Returns
    /// `Ok(None)` when nothing has been stored under the key yet.
    ///
    /// # Errors
    /// Returns `StateStoreError` if the backing store cannot be read
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StateStoreError>;

    /// Write `bytes` under `key`, replacing any previous payload.
    ///
    /// # Errors
    /// Returns `StateStoreError` if the payload cannot be written
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StateStoreError>;

    /// Remove the payload stored under `key`.
    ///
    /// Deleting a key that was never written is not an error.
    ///
    /// # Errors
    /// Returns `StateStoreError` if the removal itself fails
    async fn delete(&self, key: &str) -> Result<(), StateStoreError>;
}
