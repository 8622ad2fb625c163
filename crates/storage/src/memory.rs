use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use super::KeyValueStore;
use super::error::StorageResult;

/// Process-local store used by tests and as a stand-in when no data directory is usable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_only_touches_the_named_key() {
        let store = MemoryStore::new();
        store.set("currentUser", "alice").unwrap();
        store.set("knownUsers", "[\"alice\"]").unwrap();

        store.remove("currentUser").unwrap();

        assert_eq!(store.get("currentUser").unwrap(), None);
        assert_eq!(
            store.get("knownUsers").unwrap().as_deref(),
            Some("[\"alice\"]")
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn removing_a_missing_key_is_not_an_error() {
        let store = MemoryStore::new();
        store.remove("absent").unwrap();
        assert!(store.is_empty());
    }
}
