use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, StorageError, StorageResult, validate_key};

/// In-memory, `HashMap`-based key-value store.
///
/// Intended for tests and for running the storefront without a data
/// directory. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        let map = self.values.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.values
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_replace() {
        let store = MemoryStore::new();
        assert_eq!(store.get("processorCart").unwrap(), None);

        store.set("processorCart", "[]").unwrap();
        store.set("processorCart", "[1]").unwrap();
        assert_eq!(store.get("processorCart").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get("processorFavorites").unwrap(), None);
    }

    #[test]
    fn test_rejects_invalid_key() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.set("a/b", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
