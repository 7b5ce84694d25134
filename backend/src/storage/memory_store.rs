use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::traits::KeyValueStorage;

/// In-memory key-value store. Cloning shares the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> Result<T> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| anyhow!("Memory store lock poisoned"))?;
        Ok(f(&mut items))
    }
}

impl KeyValueStorage for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.with_items(|items| items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.with_items(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        self.with_items(|items| items.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.with_items(|items| items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set_item("recipes_1", "[]").unwrap();
        assert_eq!(other.get_item("recipes_1").unwrap().as_deref(), Some("[]"));

        assert!(other.remove_item("recipes_1").unwrap());
        assert!(store.keys().unwrap().is_empty());
    }
}
