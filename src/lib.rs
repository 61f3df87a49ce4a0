//! # Cryptext
//!
//! Text encryption helpers: AES-256-CBC symmetric encryption and
//! PBKDF2-HMAC-SHA256 one-way password hashing.
//!
//! ## Features
//!
//! - AES-256-CBC encryption with PKCS7 padding and per-call random key/IV
//!   generation
//! - Guaranteed decryption failure on a mismatched key/IV pair
//! - PBKDF2-HMAC-SHA256 password hashing with configurable salt size and
//!   iteration count
//! - Byte-slice and base64-string forms of every operation
//!
//! ## Example
//!
//! ```
//! use cryptext::{aes, password, HashOptions};
//!
//! // Symmetric: encrypt with a fresh key/IV, decrypt with the same pair
//! let (ciphertext, key, iv) = aes::encrypt_with_generated_key("test@test.com").unwrap();
//! let plaintext = aes::decrypt(&ciphertext.unwrap(), &key, &iv).unwrap();
//! assert_eq!(plaintext.as_deref(), Some("test@test.com"));
//!
//! // One-way: derive a hash plus salt, re-derive to verify
//! let options = HashOptions::default();
//! let (hash, salt) = password::derive("My3uperEp1cPa33w0rd", &options);
//! assert_eq!(password::derive_with_salt("My3uperEp1cPa33w0rd", &salt, &options), hash);
//! ```

pub mod aes;
pub mod error;
pub mod password;

// Re-export main types
pub use error::{CryptoError, Result};
pub use password::HashOptions;
