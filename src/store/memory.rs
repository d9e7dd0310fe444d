use super::KeyValueStore;
use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::trace;

/// Process-local store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| Error::Storage {
            message: "Failed to acquire memory store lock".to_string(),
        })
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.lock()?.get(key).cloned();
        trace!(key, found = value.is_some(), "memory store get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        trace!(key, bytes = value.len(), "memory store set");
        Ok(())
    }
}
