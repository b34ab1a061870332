//! In-memory storage backend

use super::StoragePort;
use crate::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// Map-backed storage, the stand-in for browser local storage in tests.
///
/// With a quota set, a `set` that would push the total size of keys and
/// values past the quota fails and leaves the previous value in place.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes beyond `bytes` in total
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Write a value bypassing the quota, e.g. to plant corrupt data
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Raw value under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let others: usize = self
                .entries
                .borrow()
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(Error::StorageWrite(format!(
                    "quota exceeded: {} bytes needed, {} allowed",
                    needed, quota
                )));
            }
        }
        self.seed(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_quota_rejects_and_keeps_previous_value() {
        let storage = MemoryStorage::with_quota(10);
        storage.set("k", "small").unwrap();

        let result = storage.set("k", "much too large for the quota");
        assert!(matches!(result, Err(Error::StorageWrite(_))));
        assert_eq!(storage.raw("k").as_deref(), Some("small"));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::with_quota(6);
        storage.set("k", "abcde").unwrap();
        // Replacing the value must not count the old one
        storage.set("k", "edcba").unwrap();
        assert_eq!(storage.raw("k").as_deref(), Some("edcba"));
    }
}
