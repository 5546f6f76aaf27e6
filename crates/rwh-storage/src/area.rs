use std::collections::HashMap;

use serde_json::Value;

/// The result shape of a storage read: a single-entry mapping holding the
/// requested key, or an empty mapping when the key is not present.
pub type StorageItems = HashMap<String, Value>;

/// An error resulting from operations on a storage area.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The host storage backend rejected or failed the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A serialization or deserialization error.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// A key-value persistent store exposed by the host environment.
///
/// Durability, cross-session persistence and serialization of conflicting
/// writes are the host's responsibility. Implementations make no ordering
/// guarantee between concurrent calls beyond what the backing store itself
/// provides.
#[async_trait::async_trait]
pub trait StorageArea: Send + Sync {
    /// Retrieves the entry for `key`, as a mapping that is empty when the
    /// key is not present.
    async fn get(&self, key: &str) -> Result<StorageItems, StorageError>;

    /// Stores every entry of `items`, overwriting existing values.
    async fn set(&self, items: StorageItems) -> Result<(), StorageError>;

    /// Removes the entry for `key`, if any.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
