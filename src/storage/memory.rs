//! In-memory storage backend
//!
//! Not encrypted; intended for tests and for embedding the core where the
//! host supplies its own persistence.

use std::collections::HashMap;

use super::SecureStorage;
use crate::error::Result;

/// HashMap-backed storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureStorage for MemoryStorage {
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn contains(&self, key: &str) -> bool {
        self.blobs.contains_key(key)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get() {
        let mut storage = MemoryStorage::new();
        storage.put("key", b"value").unwrap();
        assert_eq!(storage.get("key").unwrap().unwrap(), b"value");
        assert!(storage.contains("key"));
    }

    #[test]
    fn test_absent_and_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("key").unwrap(), None);

        storage.put("key", b"value").unwrap();
        storage.remove("key").unwrap();
        assert!(!storage.contains("key"));
    }
}
