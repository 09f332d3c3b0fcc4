//! Unlock session gate
//!
//! Governs when the credential store may be consulted. The master secret
//! is stored as an iterated-MD5 hash in secure storage, never in
//! plaintext. First-run CSV import does not bypass the gate: the session
//! must already be unlocked before an import is accepted.

use std::io::Read;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::crypto::md5_hex;
use crate::error::{Result, StoreError};
use crate::storage::SecureStorage;
use crate::{KEY_ITERATIONS_DEFAULT, MASTER_KEY};

use super::import::{self, ConflictPolicy, ImportSummary};
use super::store::CredentialStore;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No master secret configured yet
    NeedsSetup,
    /// Master secret configured, unlock required
    Locked,
    /// Master secret or identity check verified
    Unlocked,
}

/// External identity check (biometric prompt or similar)
///
/// The core never inspects how the check is performed; it only gates the
/// transition to [`SessionState::Unlocked`] on the result.
pub trait IdentityCheck {
    /// Run the check, returning whether the user was verified
    fn authenticate(&self) -> bool;
}

/// Characters used for salt generation
const SALT_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Salt length in characters
const SALT_LENGTH: usize = 16;

/// Persisted master-secret configuration
#[derive(Debug, Serialize, Deserialize)]
struct MasterConfig {
    secret_hash: String,
    salt: String,
    biometric_enabled: bool,
}

/// Unlock/import gate over the credential store
pub struct Session {
    prefs: Box<dyn SecureStorage>,
    state: SessionState,
}

impl Session {
    /// Open a session over the given preference storage
    pub fn new(prefs: Box<dyn SecureStorage>) -> Self {
        let state = if prefs.contains(MASTER_KEY) {
            SessionState::Locked
        } else {
            SessionState::NeedsSetup
        };

        Self { prefs, state }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check whether the session is unlocked
    pub fn is_unlocked(&self) -> bool {
        self.state == SessionState::Unlocked
    }

    /// Configure the master secret, moving past setup
    ///
    /// Only a salted iterated hash of the secret is persisted. The
    /// session stays locked; the caller unlocks explicitly.
    pub fn configure_master_secret(&mut self, secret: &str, biometric_enabled: bool) -> Result<()> {
        let salt = generate_salt();
        let config = MasterConfig {
            secret_hash: hash_secret(secret, &salt),
            salt,
            biometric_enabled,
        };
        self.save_config(&config)?;

        if self.state == SessionState::NeedsSetup {
            self.state = SessionState::Locked;
        }
        tracing::debug!("Master secret configured");
        Ok(())
    }

    /// Unlock with the master secret
    ///
    /// Returns whether the secret matched. A mismatch is not an error;
    /// the user retries manually.
    pub fn unlock(&mut self, secret: &str) -> Result<bool> {
        let config = self.load_config()?;

        if config.secret_hash == hash_secret(secret, &config.salt) {
            self.state = SessionState::Unlocked;
            Ok(true)
        } else {
            tracing::warn!("Unlock attempt with wrong master secret");
            Ok(false)
        }
    }

    /// Unlock via an external identity check (biometrics)
    ///
    /// Only available when the biometric flag was enabled at setup.
    pub fn unlock_with_identity(&mut self, check: &dyn IdentityCheck) -> Result<bool> {
        let config = self.load_config()?;

        if !config.biometric_enabled {
            return Ok(false);
        }

        if check.authenticate() {
            self.state = SessionState::Unlocked;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Lock the session again
    pub fn lock(&mut self) {
        if self.state == SessionState::Unlocked {
            self.state = SessionState::Locked;
        }
    }

    /// Enable or disable the biometric unlock path
    pub fn set_biometric_enabled(&mut self, enabled: bool) -> Result<()> {
        let mut config = self.load_config()?;
        config.biometric_enabled = enabled;
        self.save_config(&config)
    }

    /// Check whether biometric unlock is enabled
    pub fn biometric_enabled(&self) -> Result<bool> {
        Ok(self.load_config()?.biometric_enabled)
    }

    /// Import a CSV source into the store, gated on the unlocked state
    pub fn import_csv<R: Read>(
        &self,
        store: &mut CredentialStore,
        source: R,
        policy: ConflictPolicy,
    ) -> Result<ImportSummary> {
        self.ensure_unlocked()?;
        import::import_csv(store, source, policy)
    }

    /// Fail unless the session is unlocked
    pub fn ensure_unlocked(&self) -> Result<()> {
        if self.state != SessionState::Unlocked {
            return Err(StoreError::Locked);
        }
        Ok(())
    }

    fn load_config(&self) -> Result<MasterConfig> {
        let bytes = self.prefs.get(MASTER_KEY)?.ok_or(StoreError::InvalidOperation(
            "No master secret configured".to_string(),
        ))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Storage(format!("Unparseable master config: {}", e)))
    }

    fn save_config(&mut self, config: &MasterConfig) -> Result<()> {
        let bytes = serde_json::to_vec(config)?;
        self.prefs.put(MASTER_KEY, &bytes)
    }
}

/// Generate a random salt for the master-secret hash
fn generate_salt() -> String {
    let mut rng = rand::rng();
    (0..SALT_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..SALT_CHARS.len());
            SALT_CHARS[idx] as char
        })
        .collect()
}

/// Hash a master secret with its salt using iterated MD5
fn hash_secret(secret: &str, salt: &str) -> String {
    let mut hash = md5_hex(format!("{}{}", salt, secret).as_bytes());
    for _ in 1..KEY_ITERATIONS_DEFAULT {
        hash = md5_hex(hash.as_bytes());
    }
    hash
}
