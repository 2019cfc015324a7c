//! Crypto error types.

use shared_types::CiphertextHandle;
use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Sealing failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Opening failed (wrong key or tampered ciphertext)
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// No ciphertext stored under this handle
    #[error("Unknown ciphertext handle: {0}")]
    UnknownHandle(CiphertextHandle),

    /// Ciphertext shorter than nonce + tag
    #[error("Malformed ciphertext: {len} bytes")]
    MalformedCiphertext {
        /// Actual length in bytes
        len: usize,
    },

    /// ABI payload length is not a whole number of words
    #[error("Invalid ABI length: {len} is not a multiple of 32")]
    InvalidAbiLength {
        /// Actual length in bytes
        len: usize,
    },

    /// ABI word does not fit the value type
    #[error("ABI value at word {index} overflows u64")]
    AbiValueOverflow {
        /// Index of the offending word
        index: usize,
    },

    /// Proof did not verify
    #[error("Proof verification failed")]
    InvalidProof,
}
