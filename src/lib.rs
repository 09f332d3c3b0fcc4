//! # pwcore
//!
//! Password manager core: an encrypted on-device credential store with
//! CSV import/export.
//!
//! ## Features
//!
//! - Single-snapshot credential collection, encrypted at rest
//!   (AES-256-CBC, random IV, integrity checksum)
//! - Atomic overwrite on every mutation
//! - CSV import with replace/skip conflict resolution, CSV export
//! - Domain-based grouping of accounts for display
//! - Master-secret/biometric unlock gate
//!
//! ## Example
//!
//! ```no_run
//! use pwcore::{ConflictPolicy, CredentialStore};
//! use std::path::Path;
//!
//! let mut store = CredentialStore::open(Path::new("/path/to/data"), "passphrase").unwrap();
//!
//! let csv = std::fs::File::open("passwords.csv").unwrap();
//! let summary = pwcore::import_csv(&mut store, csv, ConflictPolicy::Skip).unwrap();
//! println!("imported {} records", summary.imported);
//!
//! for record in store.load_all().unwrap() {
//!     println!("{}: {}", record.url, record.username);
//! }
//! ```

pub mod business;
pub mod crypto;
pub mod csv;
pub mod error;
pub mod storage;
pub mod utils;

// Re-export main types
pub use business::import::{import_csv, merge, parse, ConflictPolicy, ImportSummary};
pub use business::session::{IdentityCheck, Session, SessionState};
pub use business::settings::AppSettings;
pub use business::store::CredentialStore;
pub use error::{Result, StoreError};
pub use storage::models::CredentialRecord;
pub use storage::{EncryptedFileStorage, MemoryStorage, SecureStorage};
pub use utils::domain::{extract_domain, filter_groups, group_by_domain};

/// Logical storage key for the credential collection
pub const PASSWORDS_KEY: &str = "passwords";

/// Logical storage key for the master-secret configuration
pub const MASTER_KEY: &str = "master";

/// Logical storage key for app settings
pub const SETTINGS_KEY: &str = "settings";

/// Default MD5 iteration count for key derivation and secret hashing
pub const KEY_ITERATIONS_DEFAULT: u32 = 200;

/// CSV header row for import and export
pub const CSV_HEADER: &str = "name,url,username,password,note";

/// Minimum field count for a CSV row to become a record
pub const CSV_MIN_FIELDS: usize = 4;
