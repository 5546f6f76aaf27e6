use std::{collections::HashMap, sync::Arc};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::{StorageArea, StorageError, StorageItems};

/// In-memory [`StorageArea`] backend.
///
/// Backs tests and embedding scenarios where no host store exists. Entries
/// live for the lifetime of the process only. Cloning yields a handle to the
/// same underlying store.
#[derive(Default, Clone)]
pub struct MemoryStorageArea {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStorageArea {
    /// Creates an empty storage area.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl StorageArea for MemoryStorageArea {
    async fn get(&self, key: &str) -> Result<StorageItems, StorageError> {
        let mut items = StorageItems::new();
        if let Some(value) = self.entries.read().await.get(key) {
            items.insert(key.to_string(), value.clone());
        }
        Ok(items)
    }

    async fn set(&self, items: StorageItems) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        for (key, value) in items {
            entries.insert(key, value);
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
