use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::warn;

use super::traits::KeyValueStorage;

/// Typed JSON access on top of any [`KeyValueStorage`]
#[derive(Clone)]
pub struct JsonStore {
    backend: Arc<dyn KeyValueStorage>,
}

impl JsonStore {
    pub fn new(backend: Arc<dyn KeyValueStorage>) -> Self {
        Self { backend }
    }

    /// Load the value under `key`, falling back to `T::default()`.
    ///
    /// A blob that no longer parses is logged and dropped so the next save
    /// starts from a clean slate.
    pub fn load<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.load_optional(key)?.unwrap_or_default())
    }

    /// Load the value under `key`, `None` when absent or unreadable
    pub fn load_optional<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let raw = match self.backend.get_item(key)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding unreadable data under {}: {}", key, e);
                self.backend.remove_item(key)?;
                Ok(None)
            }
        }
    }

    pub fn save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value)?;
        self.backend.set_item(key, &json)
    }

    /// Raw string access for values that are not JSON documents (the auth token)
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.backend.get_item(key)
    }

    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.backend.set_item(key, value)
    }

    pub fn remove(&self, key: &str) -> Result<bool> {
        self.backend.remove_item(key)
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        self.backend.keys()
    }
}
