//! AES-256-CBC encryption and decryption
//!
//! Blob layout: `[16-byte random IV][AES-256-CBC ciphertext]`. The
//! plaintext is prefixed with its MD5 hex checksum before encryption, so
//! decryption with a wrong key fails the checksum instead of returning
//! garbage.

use aes::Aes256;
use block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use cbc::{Decryptor, Encryptor};
use rand::Rng;

use super::key::prepare_key;
use super::md5::md5_hex;

/// IV size for AES-CBC (16 bytes = 128 bits)
const IV_SIZE: usize = 16;

/// MD5 hex string length
const MD5_HEX_LENGTH: usize = 32;

type Aes256CbcEnc = Encryptor<Aes256>;
type Aes256CbcDec = Decryptor<Aes256>;

/// Encrypt a plaintext blob using AES-256-CBC
///
/// # Arguments
///
/// * `plaintext` - The bytes to encrypt
/// * `passphrase` - The encryption passphrase
/// * `iterations` - Number of MD5 iterations for key derivation
///
/// # Returns
///
/// IV followed by ciphertext on success, or error message on failure
pub fn encrypt(
    plaintext: &[u8],
    passphrase: &str,
    iterations: u32,
) -> Result<Vec<u8>, String> {
    let key = prepare_key(passphrase, iterations);

    // Prepend MD5 checksum to plaintext
    let checksum = md5_hex(plaintext);
    let mut data = Vec::with_capacity(MD5_HEX_LENGTH + plaintext.len());
    data.extend_from_slice(checksum.as_bytes());
    data.extend_from_slice(plaintext);

    // Random IV, stored in front of the ciphertext
    let mut iv = [0u8; IV_SIZE];
    rand::rng().fill(&mut iv[..]);

    // Calculate padded length (must be multiple of 16)
    let block_size = 16;
    let padded_len = ((data.len() / block_size) + 1) * block_size;

    let mut buffer = vec![0u8; padded_len];
    buffer[..data.len()].copy_from_slice(&data);

    let encryptor = Aes256CbcEnc::new(&key.into(), &iv.into());

    let encrypted = encryptor
        .encrypt_padded_mut::<Pkcs7>(&mut buffer, data.len())
        .map_err(|e| format!("Encryption failed: {:?}", e))?;

    let mut out = Vec::with_capacity(IV_SIZE + encrypted.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(encrypted);
    Ok(out)
}

/// Decrypt a blob produced by [`encrypt`]
///
/// # Arguments
///
/// * `blob` - IV followed by ciphertext
/// * `passphrase` - The decryption passphrase
/// * `iterations` - Number of MD5 iterations for key derivation
///
/// # Returns
///
/// Decrypted plaintext bytes on success, or error message on failure
pub fn decrypt(
    blob: &[u8],
    passphrase: &str,
    iterations: u32,
) -> Result<Vec<u8>, String> {
    if blob.len() <= IV_SIZE {
        return Err("Blob too short".to_string());
    }

    let key = prepare_key(passphrase, iterations);
    let (iv, ciphertext) = blob.split_at(IV_SIZE);

    let mut buffer = ciphertext.to_vec();

    let iv_arr: [u8; IV_SIZE] = iv.try_into()
        .map_err(|_| "Invalid IV".to_string())?;
    let decryptor = Aes256CbcDec::new(&key.into(), &iv_arr.into());

    let decrypted = decryptor
        .decrypt_padded_mut::<Pkcs7>(&mut buffer)
        .map_err(|e| format!("Decryption failed: {:?}", e))?;

    // Verify MD5 checksum
    if decrypted.len() < MD5_HEX_LENGTH {
        return Err("Decrypted data too short".to_string());
    }

    let (checksum, plaintext) = decrypted.split_at(MD5_HEX_LENGTH);
    let computed = md5_hex(plaintext);

    if checksum != computed.as_bytes() {
        return Err("Checksum mismatch".to_string());
    }

    Ok(plaintext.to_vec())
}
