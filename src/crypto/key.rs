//! Key derivation for AES-256 encryption
//!
//! Derives a 32-byte key from a passphrase:
//! 1. Pad the passphrase by repeating it until >= 32 chars
//! 2. Truncate to 32 chars
//! 3. If `iterations > 0`: apply MD5 that many times (hex output feeds
//!    the next round)
//! 4. UTF-8 encode to 32 bytes

use super::md5::md5_hex;

/// Key length for AES-256 (32 bytes = 256 bits)
pub const KEY_LENGTH: usize = 32;

/// Prepare an encryption key from a passphrase
///
/// # Arguments
///
/// * `passphrase` - The user's passphrase
/// * `iterations` - Number of MD5 iterations to apply
///
/// # Returns
///
/// A 32-byte key suitable for AES-256 encryption
pub fn prepare_key(passphrase: &str, iterations: u32) -> [u8; KEY_LENGTH] {
    // Step 1: Pad passphrase by repeating until >= 32 chars
    let mut padded = passphrase.to_string();
    while padded.chars().count() < KEY_LENGTH {
        padded.push_str(passphrase);
    }

    // Step 2: Truncate to exactly 32 characters
    let mut key_string: String = padded.chars().take(KEY_LENGTH).collect();

    // Step 3: Apply MD5 iterations (hex output is always 32 ASCII chars)
    for _ in 0..iterations {
        key_string = md5_hex(key_string.as_bytes());
    }

    // Step 4: UTF-8 encode into exactly 32 bytes
    let key_bytes = key_string.as_bytes();
    let mut key = [0u8; KEY_LENGTH];
    let copy_len = std::cmp::min(key_bytes.len(), KEY_LENGTH);
    key[..copy_len].copy_from_slice(&key_bytes[..copy_len]);

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_short_passphrase() {
        // "Sun001!" (7 chars) should be padded to 32
        let key = prepare_key("Sun001!", 0);

        let expected = b"Sun001!Sun001!Sun001!Sun001!Sun0";
        assert_eq!(&key[..], &expected[..]);
    }

    #[test]
    fn test_key_exact_32_chars() {
        let passphrase = "12345678901234567890123456789012";
        let key = prepare_key(passphrase, 0);
        assert_eq!(&key[..], passphrase.as_bytes());
    }

    #[test]
    fn test_key_longer_than_32() {
        let passphrase = "1234567890123456789012345678901234567890"; // 40 chars
        let key = prepare_key(passphrase, 0);

        let expected = b"12345678901234567890123456789012";
        assert_eq!(&key[..], &expected[..]);
    }

    #[test]
    fn test_key_with_iterations() {
        let key = prepare_key("test", 1);

        // "test" padded to 32 chars, then MD5 applied once
        let padded: String = "test".repeat(8);
        let expected_hash = md5_hex(padded.as_bytes());
        assert_eq!(&key[..], expected_hash.as_bytes());
    }

    #[test]
    fn test_key_iterations_differ() {
        let key0 = prepare_key("test", 0);
        let key1 = prepare_key("test", 1);
        let key2 = prepare_key("test", 2);
        assert_ne!(key0, key1);
        assert_ne!(key1, key2);
    }
}
