//! Credential store
//!
//! Sole authority for durable credential state. The persisted collection
//! is a single encrypted JSON blob holding the complete snapshot; every
//! mutation performs a full read-modify-write cycle. That is O(n) per
//! mutation and fine at personal password counts.

use std::io::Write;
use std::path::Path;

use crate::csv;
use crate::error::{Result, StoreError};
use crate::storage::models::CredentialRecord;
use crate::storage::{EncryptedFileStorage, SecureStorage};
use crate::{CSV_HEADER, PASSWORDS_KEY};

/// Durable credential collection over a secure storage backend
pub struct CredentialStore {
    storage: Box<dyn SecureStorage>,
}

impl CredentialStore {
    /// Create a store over an existing storage backend
    pub fn new(storage: Box<dyn SecureStorage>) -> Self {
        Self { storage }
    }

    /// Open a store backed by encrypted files in the given folder
    pub fn open(folder: &Path, passphrase: &str) -> Result<Self> {
        let storage = EncryptedFileStorage::new(folder, passphrase)?;
        Ok(Self::new(Box::new(storage)))
    }

    /// Check whether a persisted collection exists
    pub fn has_data(&self) -> bool {
        self.storage.contains(PASSWORDS_KEY)
    }

    /// Load the full current collection
    ///
    /// Returns an empty vec when nothing is persisted yet. Fails when the
    /// persisted bytes cannot be decrypted or parsed; callers render that
    /// as "no usable data" rather than crashing.
    pub fn load_all(&self) -> Result<Vec<CredentialRecord>> {
        let Some(bytes) = self.storage.get(PASSWORDS_KEY)? else {
            return Ok(Vec::new());
        };

        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Storage(format!("Unparseable credential data: {}", e)))
    }

    /// Load the collection, degrading any load failure to an empty list
    pub fn load_all_or_empty(&self) -> Vec<CredentialRecord> {
        match self.load_all() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Treating unusable credential data as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Serialize and overwrite the entire persisted collection atomically
    pub fn save_all(&mut self, records: &[CredentialRecord]) -> Result<()> {
        let bytes = serde_json::to_vec(records)?;
        self.storage.put(PASSWORDS_KEY, &bytes)?;
        tracing::debug!("Persisted {} credential records", records.len());
        Ok(())
    }

    /// Append one record and persist
    pub fn add_record(&mut self, record: CredentialRecord) -> Result<()> {
        let mut records = self.load_all()?;
        records.push(record);
        self.save_all(&records)
    }

    /// Replace the first record matching `(old_url, old_username)` with `updated`
    ///
    /// The replacement may itself change url/username. Returns `false`
    /// (a no-op, not an error) when no record matches.
    pub fn update_by_key(
        &mut self,
        old_url: &str,
        old_username: &str,
        updated: CredentialRecord,
    ) -> Result<bool> {
        let mut records = self.load_all()?;

        let Some(pos) = records.iter().position(|r| r.matches_key(old_url, old_username)) else {
            return Ok(false);
        };

        records[pos] = updated;
        self.save_all(&records)?;
        Ok(true)
    }

    /// Remove the first record equal to `record` in all fields
    ///
    /// At most one record is removed even when duplicates exist. Returns
    /// `false` when nothing matched.
    pub fn delete_record(&mut self, record: &CredentialRecord) -> Result<bool> {
        let mut records = self.load_all()?;

        let Some(pos) = records.iter().position(|r| r == record) else {
            return Ok(false);
        };

        records.remove(pos);
        self.save_all(&records)?;
        Ok(true)
    }

    /// Remove the first record matching `(url, username)`
    pub fn delete_by_key(&mut self, url: &str, username: &str) -> Result<bool> {
        let mut records = self.load_all()?;

        let Some(pos) = records.iter().position(|r| r.matches_key(url, username)) else {
            return Ok(false);
        };

        records.remove(pos);
        self.save_all(&records)?;
        Ok(true)
    }

    /// Write all records as CSV to the given sink
    ///
    /// Emits the header row and one quoted row per record; an absent note
    /// renders as an empty field. An empty collection writes nothing at
    /// all and returns 0. Returns the number of records written.
    pub fn export_all<W: Write>(&self, sink: &mut W) -> Result<usize> {
        let records = self.load_all()?;
        if records.is_empty() {
            return Ok(0);
        }

        sink.write_all(CSV_HEADER.as_bytes())?;
        sink.write_all(b"\n")?;

        for record in &records {
            csv::write_row(
                sink,
                &[
                    &record.name,
                    &record.url,
                    &record.username,
                    &record.password,
                    record.note.as_deref().unwrap_or(""),
                ],
            )?;
        }

        tracing::debug!("Exported {} credential records", records.len());
        Ok(records.len())
    }
}
