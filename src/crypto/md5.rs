//! MD5 hashing for integrity verification
//!
//! An MD5 hash is prepended to plaintext before encryption so decryption
//! with the wrong key can be detected.

use md5::{Digest, Md5};

/// Calculate MD5 hash of the input and return as lowercase hex string (32 chars)
///
/// # Example
///
/// ```
/// use pwcore::crypto::md5_hex;
///
/// assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
pub fn md5_hex(input: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(input);
    let result = hasher.finalize();

    result.iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
