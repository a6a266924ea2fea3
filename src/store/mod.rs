//! Key-value persistence collaborator. One opaque JSON value per named
//! tree; reads and writes replace the whole value, so the last writer wins.
//! That boundary is documented behavior, not something this crate papers
//! over with versioning it does not have.

mod http;
mod memory;

use serde_json::Value;
use thiserror::Error;

pub use http::HttpStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport failure for key \"{key}\": {reason}")]
    Transport { key: String, reason: String },
    #[error("unexpected status {status} for key \"{key}\"")]
    Status { key: String, status: u16 },
    #[error("malformed payload for key \"{key}\": {reason}")]
    MalformedPayload { key: String, reason: String },
}

/// Whole-value get/save. A missing key is `Ok(None)`, not an error; the
/// editor renders it as an empty tree and heals paths on write.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError>;
}

/// The backend is inconsistent about wrapping a stored object in a
/// single-element array. Every client funnels reads through this so the
/// rest of the crate only ever sees the bare value.
pub fn unwrap_payload(value: Value) -> Value {
    match value {
        Value::Array(mut entries) if entries.len() == 1 && entries[0].is_object() => {
            entries.remove(0)
        }
        other => other,
    }
}
