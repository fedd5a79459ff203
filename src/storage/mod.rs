pub mod database;
pub mod keys;
pub mod memory;
pub mod sqlite;

use std::sync::Arc;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Failure while reading or writing the persisted key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend could not be reached (pool exhausted, file locked, ...).
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// The value does not fit the backend's per-entry quota.
    #[error("quota exceeded for key {key}: {len} bytes > {limit} bytes")]
    QuotaExceeded {
        key: String,
        len: usize,
        limit: usize,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}

impl From<r2d2::Error> for StorageError {
    fn from(e: r2d2::Error) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}

/// String-keyed, string-valued persistence shared by every client-side service.
///
/// Writes are last-write-wins and complete before the call returns.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// Reads a boolean flag stored as the literal `"true"`; anything else is unset.
pub(crate) fn read_flag(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.get(key) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            tracing::warn!("[Storage] Failed to read flag {}: {}", key, e);
            false
        }
    }
}

/// Sets a boolean flag; failures are logged and swallowed.
pub(crate) fn write_flag(store: &dyn KeyValueStore, key: &str) {
    if let Err(e) = store.set(key, "true") {
        tracing::warn!("[Storage] Failed to write flag {}: {}", key, e);
    }
}
