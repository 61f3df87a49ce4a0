//! One-way password hashing with PBKDF2-HMAC-SHA256
//!
//! Derives a fixed-length hash and salt from a password. Re-deriving with
//! the stored salt and the same options reproduces the stored hash, which
//! is how verification works; comparing the two is the caller's concern.
//!
//! `salt_size` sizes both the random salt and the derived output. The two
//! are conceptually independent but stored hash/salt pairs depend on them
//! being equal, so the coupling is kept. Likewise the iteration default is
//! part of the stored-hash contract: deriving with a different count never
//! reproduces an existing hash.

use base64::{Engine, engine::general_purpose::STANDARD};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::error::Result;

/// Options for password hash derivation
#[derive(Debug, Clone)]
pub struct HashOptions {
    /// Salt length in bytes; also the derived hash length
    pub salt_size: usize,
    /// PBKDF2 iteration count
    pub iterations: u32,
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            salt_size: 16,
            iterations: 200_000,
        }
    }
}

/// Derive a hash from the password using a freshly generated random salt
///
/// Returns the derived hash together with the salt that was used, both
/// `salt_size` bytes long.
pub fn derive(password: &str, options: &HashOptions) -> (Vec<u8>, Vec<u8>) {
    let mut rng = rand::rng();
    let mut salt = vec![0u8; options.salt_size];
    rng.fill_bytes(&mut salt);

    let hash = derive_with_salt(password, &salt, options);
    (hash, salt)
}

/// Derive a hash from the password and a known salt
///
/// Deterministic: the same (password, salt, options) always produces the
/// same bytes.
pub fn derive_with_salt(password: &str, salt: &[u8], options: &HashOptions) -> Vec<u8> {
    let mut hash = vec![0u8; options.salt_size];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, options.iterations, &mut hash);
    hash
}

/// Derive a hash with a fresh salt, returning hash and salt as base64
pub fn derive_base64(password: &str, options: &HashOptions) -> (String, String) {
    let (hash, salt) = derive(password, options);
    (STANDARD.encode(hash), STANDARD.encode(salt))
}

/// Derive a hash from the password and a base64 encoded salt
///
/// Returns the derived hash as a base64 string. Fails only when the salt
/// is not valid base64.
pub fn derive_with_salt_base64(
    password: &str,
    salt: &str,
    options: &HashOptions,
) -> Result<String> {
    let salt = STANDARD.decode(salt)?;
    Ok(STANDARD.encode(derive_with_salt(password, &salt, options)))
}
