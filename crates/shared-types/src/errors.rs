//! # Error Types
//!
//! Errors shared across crates. Each crate owns its own error
//! enum; only value-parsing failures live here.

use thiserror::Error;

/// Errors parsing identifiers and addresses from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Wrong number of hex digits.
    #[error("invalid length: expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Non-hex characters.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}
