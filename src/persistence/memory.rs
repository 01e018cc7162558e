use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::StorageError;

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot, e.g. with data written by an earlier session
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("employees").unwrap(), None);
        store.set("employees", "[]").unwrap();
        assert_eq!(store.get("employees").unwrap().as_deref(), Some("[]"));
        store.set("employees", "[1]").unwrap();
        assert_eq!(store.get("employees").unwrap().as_deref(), Some("[1]"));
    }
}
