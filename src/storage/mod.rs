//! Secure byte storage
//!
//! The store never touches the filesystem directly; it goes through the
//! [`SecureStorage`] trait, which provides encrypted-at-rest blobs keyed
//! by logical name. [`EncryptedFileStorage`] is the production backend,
//! [`MemoryStorage`] backs tests and embedding scenarios.

pub mod encrypted_file;
pub mod memory;
pub mod models;

pub use encrypted_file::EncryptedFileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// Encrypted-at-rest byte storage, keyed by logical name
///
/// Each blob is acquired for the duration of one read or one write and
/// never held across operations.
pub trait SecureStorage {
    /// Store a blob under the given key, replacing any previous content atomically
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Retrieve the blob stored under the given key, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Check whether a blob exists under the given key
    fn contains(&self, key: &str) -> bool;

    /// Remove the blob stored under the given key (no-op if absent)
    fn remove(&mut self, key: &str) -> Result<()>;
}
