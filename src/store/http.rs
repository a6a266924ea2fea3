use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::{KeyValueStore, StoreError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client for the REST/KV backend: `GET {base}/{key}` reads the
/// stored value, `PUT {base}/{key}` replaces it wholesale.
pub struct HttpStore {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

impl KeyValueStore for HttpStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let url = self.url_for(key);
        debug!(key, %url, "kv get");
        match self.agent.get(&url).call() {
            Ok(response) => {
                let value: Value =
                    response
                        .into_json()
                        .map_err(|err| StoreError::MalformedPayload {
                            key: key.to_string(),
                            reason: err.to_string(),
                        })?;
                Ok(Some(value))
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(ureq::Error::Status(status, _)) => {
                warn!(key, status, "kv get failed");
                Err(StoreError::Status {
                    key: key.to_string(),
                    status,
                })
            }
            Err(err) => {
                warn!(key, error = %err, "kv get transport failure");
                Err(StoreError::Transport {
                    key: key.to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let url = self.url_for(key);
        debug!(key, %url, "kv save");
        match self.agent.put(&url).send_json(value) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, _)) => {
                warn!(key, status, "kv save failed");
                Err(StoreError::Status {
                    key: key.to_string(),
                    status,
                })
            }
            Err(err) => {
                warn!(key, error = %err, "kv save transport failure");
                Err(StoreError::Transport {
                    key: key.to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }
}
