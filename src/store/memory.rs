use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use super::{KeyValueStore, StoreError};

/// In-process store for tests and embedding without a backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: impl Into<String>, value: Value) -> Self {
        self.lock().insert(key.into(), value);
        self
    }

    /// Current persisted value, for asserting on save payloads.
    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.clone());
        Ok(())
    }
}
