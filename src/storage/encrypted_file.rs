//! Encrypted file-per-key storage backend
//!
//! Each logical key maps to one `<key>.enc` file inside the storage
//! folder, encrypted with AES-256-CBC (see [`crate::crypto`]). Writes go
//! to a temporary file in the same folder and are swapped into place, so
//! a failed write never leaves a half-written blob behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::SecureStorage;
use crate::error::{Result, StoreError};
use crate::crypto;
use crate::KEY_ITERATIONS_DEFAULT;

/// File extension for encrypted blobs
const BLOB_EXTENSION: &str = "enc";

/// File-backed secure storage
pub struct EncryptedFileStorage {
    /// Folder holding the blob files
    folder: PathBuf,
    /// Encryption passphrase
    passphrase: String,
    /// MD5 iteration count for key derivation
    iterations: u32,
}

impl EncryptedFileStorage {
    /// Open (or create) a storage folder
    pub fn new(folder: &Path, passphrase: &str) -> Result<Self> {
        fs::create_dir_all(folder)?;

        Ok(Self {
            folder: folder.to_path_buf(),
            passphrase: passphrase.to_string(),
            iterations: KEY_ITERATIONS_DEFAULT,
        })
    }

    /// Get the storage folder path
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn blob_path(&self, key: &str) -> Result<PathBuf> {
        // Keys are logical names, not paths
        if key.is_empty()
            || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StoreError::InvalidOperation(
                format!("Invalid storage key: {:?}", key),
            ));
        }
        Ok(self.folder.join(format!("{}.{}", key, BLOB_EXTENSION)))
    }
}

impl SecureStorage for EncryptedFileStorage {
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.blob_path(key)?;

        let encrypted = crypto::encrypt(bytes, &self.passphrase, self.iterations)
            .map_err(StoreError::Encryption)?;

        // Write to a temp file in the same folder, then swap into place
        let mut tmp = NamedTempFile::new_in(&self.folder)?;
        tmp.write_all(&encrypted)?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| StoreError::IoError(e.error))?;

        tracing::debug!("Stored {} bytes under key {:?}", bytes.len(), key);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let encrypted = fs::read(&path)?;
        let plaintext = crypto::decrypt(&encrypted, &self.passphrase, self.iterations)
            .map_err(StoreError::Decryption)?;

        Ok(Some(plaintext))
    }

    fn contains(&self, key: &str) -> bool {
        self.blob_path(key).map(|p| p.exists()).unwrap_or(false)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
