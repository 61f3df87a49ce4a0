//! AES-256-CBC encryption and decryption of text values
//!
//! Keys and IVs are either supplied by the caller or generated fresh per
//! call from a cryptographically secure generator. Before encryption the
//! plaintext is prefixed with its MD5 hex digest; the digest is verified
//! after decryption, so decrypting with a mismatched key/IV pair always
//! fails instead of occasionally slipping past PKCS7 padding validation.
//! The digest is not keyed and provides no tamper protection.
//!
//! Every operation comes in a byte-slice form and a base64-string form;
//! the string forms decode their inputs and delegate to the byte forms.

use aes::Aes256;
use base64::{Engine, engine::general_purpose::STANDARD};
use block_padding::Pkcs7;
use cbc::cipher::{BlockModeDecrypt, BlockModeEncrypt, KeyIvInit};
use cbc::{Decryptor, Encryptor};
use md5::{Digest, Md5};
use rand::RngCore;

use crate::error::{CryptoError, Result};

/// Key size for AES-256 (32 bytes = 256 bits)
pub const KEY_SIZE: usize = 32;

/// IV size for AES-CBC (16 bytes = one block)
pub const IV_SIZE: usize = 16;

/// AES block size in bytes
const BLOCK_SIZE: usize = 16;

/// MD5 hex digest length in bytes
const MD5_HEX_LENGTH: usize = 32;

type Aes256CbcEnc = Encryptor<Aes256>;
type Aes256CbcDec = Decryptor<Aes256>;

/// Generate a fresh random key and IV
pub fn generate_key_iv() -> ([u8; KEY_SIZE], [u8; IV_SIZE]) {
    let mut rng = rand::rng();
    let mut key = [0u8; KEY_SIZE];
    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);
    (key, iv)
}

/// Generate a fresh random key and IV as base64 strings
pub fn generate_key_iv_base64() -> (String, String) {
    let (key, iv) = generate_key_iv();
    (STANDARD.encode(key), STANDARD.encode(iv))
}

/// Encrypt plaintext using AES-256-CBC with the given key and IV
///
/// Returns `Ok(None)` without invoking the cipher when `plaintext` is
/// empty. An empty key or IV is a contract error, reported before any
/// cryptographic work; a non-empty key or IV of the wrong length surfaces
/// as [`CryptoError::EncryptionError`].
pub fn encrypt(plaintext: &str, key: &[u8], iv: &[u8]) -> Result<Option<Vec<u8>>> {
    if plaintext.is_empty() {
        return Ok(None);
    }
    validate_key_iv(key, iv)?;

    // Prepend the digest so a wrong key/IV is always detected on decrypt
    let checksum = md5_hex(plaintext);
    let full_text = format!("{}{}", checksum, plaintext);
    let data = full_text.as_bytes();

    // Buffer sized up to the next block boundary for PKCS7 padding
    let padded_len = ((data.len() / BLOCK_SIZE) + 1) * BLOCK_SIZE;
    let mut buffer = vec![0u8; padded_len];
    buffer[..data.len()].copy_from_slice(data);

    let encryptor = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| CryptoError::EncryptionError(e.to_string()))?;

    let encrypted = encryptor
        .encrypt_padded::<Pkcs7>(&mut buffer, data.len())
        .map_err(|e| CryptoError::EncryptionError(format!("{:?}", e)))?;

    Ok(Some(encrypted.to_vec()))
}

/// Encrypt plaintext using a base64 encoded key and IV
///
/// Returns the ciphertext as a base64 string.
pub fn encrypt_base64(plaintext: &str, key: &str, iv: &str) -> Result<Option<String>> {
    let key = STANDARD.decode(key)?;
    let iv = STANDARD.decode(iv)?;

    Ok(encrypt(plaintext, &key, &iv)?.map(|cipher| STANDARD.encode(cipher)))
}

/// Encrypt plaintext with a freshly generated key and IV
///
/// Returns the ciphertext together with the key and IV that were used.
/// The key and IV are returned even when the plaintext was empty and no
/// ciphertext was produced.
pub fn encrypt_with_generated_key(
    plaintext: &str,
) -> Result<(Option<Vec<u8>>, [u8; KEY_SIZE], [u8; IV_SIZE])> {
    let (key, iv) = generate_key_iv();
    let ciphertext = encrypt(plaintext, &key, &iv)?;
    Ok((ciphertext, key, iv))
}

/// Encrypt plaintext with a freshly generated key and IV, all base64
pub fn encrypt_base64_with_generated_key(
    plaintext: &str,
) -> Result<(Option<String>, String, String)> {
    let (ciphertext, key, iv) = encrypt_with_generated_key(plaintext)?;
    Ok((
        ciphertext.map(|cipher| STANDARD.encode(cipher)),
        STANDARD.encode(key),
        STANDARD.encode(iv),
    ))
}

/// Decrypt ciphertext using AES-256-CBC with the given key and IV
///
/// Returns `Ok(None)` when `ciphertext` is empty. A key/IV pair other
/// than the one used to encrypt fails with
/// [`CryptoError::DecryptionError`] - padding, UTF-8 and digest
/// verification together make that failure certain, never silent wrong
/// plaintext.
pub fn decrypt(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Option<String>> {
    if ciphertext.is_empty() {
        return Ok(None);
    }
    validate_key_iv(key, iv)?;

    // Mutable copy for in-place decryption
    let mut buffer = ciphertext.to_vec();

    let decryptor = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| CryptoError::DecryptionError(e.to_string()))?;

    let decrypted = decryptor
        .decrypt_padded::<Pkcs7>(&mut buffer)
        .map_err(|e| CryptoError::DecryptionError(format!("{:?}", e)))?;

    if decrypted.len() < MD5_HEX_LENGTH {
        return Err(CryptoError::DecryptionError(
            "decrypted data too short".to_string(),
        ));
    }

    let (checksum, plaintext) = decrypted.split_at(MD5_HEX_LENGTH);

    let plaintext = String::from_utf8(plaintext.to_vec())
        .map_err(|e| CryptoError::DecryptionError(format!("invalid UTF-8: {}", e)))?;

    if checksum != md5_hex(&plaintext).as_bytes() {
        return Err(CryptoError::DecryptionError(
            "MD5 checksum mismatch".to_string(),
        ));
    }

    Ok(Some(plaintext))
}

/// Decrypt a base64 encoded ciphertext using a base64 encoded key and IV
pub fn decrypt_base64(ciphertext: &str, key: &str, iv: &str) -> Result<Option<String>> {
    if ciphertext.is_empty() {
        return Ok(None);
    }
    let ciphertext = STANDARD.decode(ciphertext)?;
    let key = STANDARD.decode(key)?;
    let iv = STANDARD.decode(iv)?;

    decrypt(&ciphertext, &key, &iv)
}

fn validate_key_iv(key: &[u8], iv: &[u8]) -> Result<()> {
    if key.is_empty() {
        return Err(CryptoError::EmptyKey);
    }
    if iv.is_empty() {
        return Err(CryptoError::EmptyIv);
    }
    Ok(())
}

/// MD5 digest of the input as a lowercase hex string (32 chars)
fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_sizes() {
        let (key, iv) = generate_key_iv();
        assert_eq!(key.len(), KEY_SIZE);
        assert_eq!(iv.len(), IV_SIZE);
    }

    #[test]
    fn test_generated_base64_roundtrip() {
        let (key, iv) = generate_key_iv_base64();
        assert_eq!(STANDARD.decode(&key).unwrap().len(), KEY_SIZE);
        assert_eq!(STANDARD.decode(&iv).unwrap().len(), IV_SIZE);
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let (key, iv) = generate_key_iv();
        let plaintext = "Hello, World! This is a test message.";

        let encrypted = encrypt(plaintext, &key, &iv).unwrap().unwrap();
        let decrypted = decrypt(&encrypted, &key, &iv).unwrap().unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_encrypt_decrypt_utf8() {
        let (key, iv) = generate_key_iv();
        let plaintext = "Привет мир! 你好世界! مرحبا بالعالم";

        let encrypted = encrypt(plaintext, &key, &iv).unwrap().unwrap();
        let decrypted = decrypt(&encrypted, &key, &iv).unwrap().unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_ciphertext_block_aligned() {
        let (key, iv) = generate_key_iv();
        let encrypted = encrypt("abc", &key, &iv).unwrap().unwrap();
        assert_eq!(encrypted.len() % BLOCK_SIZE, 0);
    }

    #[test]
    fn test_empty_plaintext_short_circuits() {
        let (key, iv) = generate_key_iv();
        assert!(encrypt("", &key, &iv).unwrap().is_none());

        // Short-circuits even before the key/IV contract check
        assert!(encrypt("", &[], &[]).unwrap().is_none());
    }

    #[test]
    fn test_empty_ciphertext_short_circuits() {
        let (key, iv) = generate_key_iv();
        assert!(decrypt(&[], &key, &iv).unwrap().is_none());
    }

    #[test]
    fn test_empty_key_rejected() {
        let (_, iv) = generate_key_iv();
        let result = encrypt("data", &[], &iv);
        assert!(matches!(result, Err(CryptoError::EmptyKey)));

        let result = decrypt(&[0u8; 16], &[], &iv);
        assert!(matches!(result, Err(CryptoError::EmptyKey)));
    }

    #[test]
    fn test_empty_iv_rejected() {
        let (key, _) = generate_key_iv();
        let result = encrypt("data", &key, &[]);
        assert!(matches!(result, Err(CryptoError::EmptyIv)));

        let result = decrypt(&[0u8; 16], &key, &[]);
        assert!(matches!(result, Err(CryptoError::EmptyIv)));
    }

    #[test]
    fn test_wrong_length_key_rejected() {
        let (_, iv) = generate_key_iv();
        let result = encrypt("data", &[1u8; 16], &iv);
        assert!(matches!(result, Err(CryptoError::EncryptionError(_))));
    }

    #[test]
    fn test_wrong_key_fails() {
        let (key, iv) = generate_key_iv();
        let (other_key, _) = generate_key_iv();

        let encrypted = encrypt("Secret message", &key, &iv).unwrap().unwrap();
        let result = decrypt(&encrypted, &other_key, &iv);
        assert!(matches!(result, Err(CryptoError::DecryptionError(_))));
    }

    #[test]
    fn test_wrong_iv_fails() {
        let (key, iv) = generate_key_iv();
        let (_, other_iv) = generate_key_iv();

        let encrypted = encrypt("Secret message", &key, &iv).unwrap().unwrap();
        let result = decrypt(&encrypted, &key, &other_iv);
        assert!(matches!(result, Err(CryptoError::DecryptionError(_))));
    }

    #[test]
    fn test_base64_matches_bytes() {
        let (key, iv) = generate_key_iv();
        let key_b64 = STANDARD.encode(key);
        let iv_b64 = STANDARD.encode(iv);
        let plaintext = "same plaintext, both forms";

        let from_bytes = encrypt(plaintext, &key, &iv).unwrap().unwrap();
        let from_b64 = encrypt_base64(plaintext, &key_b64, &iv_b64).unwrap().unwrap();

        assert_eq!(STANDARD.decode(&from_b64).unwrap(), from_bytes);

        let decrypted = decrypt_base64(&from_b64, &key_b64, &iv_b64).unwrap().unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_malformed_base64_key_rejected() {
        let result = encrypt_base64("data", "not-base64!!!", "also-bad!!!");
        assert!(matches!(result, Err(CryptoError::Base64(_))));
    }

    #[test]
    fn test_generated_key_returned_for_empty_plaintext() {
        let (ciphertext, key, iv) = encrypt_with_generated_key("").unwrap();
        assert!(ciphertext.is_none());
        assert_eq!(key.len(), KEY_SIZE);
        assert_eq!(iv.len(), IV_SIZE);
    }

    #[test]
    fn test_md5_hex() {
        assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex("Test Item"), "e1c47101f7939099b633e61b3514c623");
    }
}
