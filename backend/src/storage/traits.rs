//! # Storage Traits
//!
//! The storage abstraction the domain layer depends on. Implementations can
//! be swapped (files on disk, in-memory map) without touching the services.

use anyhow::Result;

/// String-keyed blob storage, modelled on the browser's local storage API
pub trait KeyValueStorage: Send + Sync {
    /// Read the raw value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns true if something was removed
    fn remove_item(&self, key: &str) -> Result<bool>;

    /// List all stored keys in lexical order
    fn keys(&self) -> Result<Vec<String>>;
}
