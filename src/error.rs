//! Error types for the password manager core

use thiserror::Error;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Persisted data exists but cannot be used (corrupt or unparseable)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Encryption failed
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decryption failed - wrong passphrase or corrupted data
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// CSV import source could not be opened or read
    #[error("Import error: {0}")]
    ImportParse(String),

    /// Session is locked, unlock required before operation
    #[error("Session is locked")]
    Locked,

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Storage("bad blob".to_string());
        assert!(err.to_string().contains("bad blob"));

        let err = StoreError::Locked;
        assert_eq!(err.to_string(), "Session is locked");

        let err = StoreError::Decryption("checksum mismatch".to_string());
        assert!(err.to_string().contains("checksum mismatch"));

        let err = StoreError::ImportParse("unreadable source".to_string());
        assert!(err.to_string().contains("unreadable source"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: StoreError = io_err.into();
        match err {
            StoreError::IoError(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected IoError"),
        }
    }

    #[test]
    fn test_error_from_serde() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: StoreError = json_err.into();
        match err {
            StoreError::SerializationError(msg) => assert!(!msg.to_string().is_empty()),
            _ => panic!("Expected SerializationError"),
        }
    }
}
