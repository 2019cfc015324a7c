//! Domain layer for decryption-verification

pub mod cache;
pub mod outcome;

pub use cache::LocalDecryptionCache;
pub use outcome::{VerificationOutcome, VerificationPath};
