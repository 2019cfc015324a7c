//! # Shared Crypto - Simulated Confidential Compute
//!
//! Stand-ins for the homomorphic-encryption stack the client talks to. None of
//! this is FHE; it reproduces the *interfaces and trust boundaries* of one so
//! the protocol above it can be exercised end to end.
//!
//! ## Components
//!
//! | Module | Algorithm | Role |
//! |--------|-----------|------|
//! | `symmetric` | XChaCha20-Poly1305 | Sealing of individual integers |
//! | `coprocessor` | symmetric + Keccak-256 | Ciphertext store addressed by handle |
//! | `proof` | HMAC-SHA256 | Input proofs and decryption proofs (the "KMS") |
//! | `abi` | 32-byte big-endian words | Clear value encoding checked on-chain |
//! | `hashing` | Keccak-256 | Handle and transaction hashes |
//!
//! ## Trust Boundaries
//!
//! - The co-processor holds the only key able to open ciphertexts.
//! - The ledger never sees that key; it only checks proofs issued by the
//!   `ProofAuthority`, whose key it shares.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod coprocessor;
pub mod errors;
pub mod hashing;
pub mod proof;
pub mod symmetric;

// Re-exports
pub use abi::{decode_clear_values, encode_clear_values, WORD_SIZE};
pub use coprocessor::{FheCoprocessor, PublicDecryption};
pub use errors::CryptoError;
pub use hashing::{keccak256, Hash};
pub use proof::ProofAuthority;
pub use symmetric::{open, seal, Nonce, SecretKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
