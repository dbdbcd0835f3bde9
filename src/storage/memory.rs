use super::KeyValueStore;
use crate::core::prelude::*;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, String>> {
        self.entries.read().unwrap_or_else(|poisoned| {
            log::error!("MemoryStore lock poisoned, recovering...");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, String>> {
        self.entries.write().unwrap_or_else(|poisoned| {
            log::error!("MemoryStore lock poisoned, recovering...");
            poisoned.into_inner()
        })
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.write().clear();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("user_error").unwrap(), None);

        store.set("user_error", "[]").unwrap();
        assert_eq!(store.get("user_error").unwrap().as_deref(), Some("[]"));

        store.set("user_error", "{}").unwrap();
        assert_eq!(store.get("user_error").unwrap().as_deref(), Some("{}"));

        store.remove("user_error").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn keys_are_sorted_and_clear_empties() {
        let store = MemoryStore::new();
        store.set("user_validation", "[]").unwrap();
        store.set("error_EP016", "Username already exists.").unwrap();
        assert_eq!(
            store.keys().unwrap(),
            vec!["error_EP016".to_string(), "user_validation".to_string()]
        );

        store.clear().unwrap();
        assert_eq!(store.len(), 0);
    }
}
