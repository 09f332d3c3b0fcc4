//! Business logic layer
//!
//! High-level API over the secure storage backend: the credential store,
//! CSV import/merge, the unlock session gate and app settings.

pub mod import;
pub mod session;
pub mod settings;
pub mod store;

pub use import::{merge, ConflictPolicy, ImportSummary};
pub use session::{IdentityCheck, Session, SessionState};
pub use settings::AppSettings;
pub use store::CredentialStore;
