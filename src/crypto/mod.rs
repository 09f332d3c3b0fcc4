//! Cryptographic operations for the encrypted credential store
//!
//! Implements AES-256-CBC with PKCS7 padding, a random per-blob IV and an
//! MD5 integrity checksum so that a wrong passphrase is detected instead
//! of producing garbage plaintext.

mod aes;
mod key;
mod md5;

pub use aes::{decrypt, encrypt};
pub use key::prepare_key;
pub use md5::md5_hex;
