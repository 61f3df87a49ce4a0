//! Error types for cryptext

use thiserror::Error;

/// Main error type for cipher and hash operations
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key argument was empty on encrypt/decrypt
    #[error("key must not be empty")]
    EmptyKey,

    /// IV argument was empty on encrypt/decrypt
    #[error("iv must not be empty")]
    EmptyIv,

    /// Base64 input could not be decoded
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Encryption failed
    #[error("Encryption error: {0}")]
    EncryptionError(String),

    /// Decryption failed - wrong key/IV pair or corrupted ciphertext
    #[error("Decryption error: {0}")]
    DecryptionError(String),
}

/// Result type alias for cipher and hash operations
pub type Result<T> = std::result::Result<T, CryptoError>;
