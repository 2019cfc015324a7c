//! # vf-02-encryption
//!
//! Encryption Orchestrator: turns a user-entered record into an on-ledger
//! record whose value only exists as a ciphertext.
//!
//! ## Failure Semantics
//!
//! | Failure | Chain interaction | Record visible |
//! |---------|-------------------|----------------|
//! | `InvalidSubmission` | none | no |
//! | `EncryptionFailed` | none | no |
//! | `UserRejected` | none | no |
//! | `LedgerRejected` | reverted | no |
//!
//! On success exactly one new, unverified record exists.

pub mod adapters;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::CoprocessorEncryptionService;
pub use error::{EncryptionError, EncryptionResult};
pub use ports::{CreatedRecord, EncryptionService, Submission};
pub use service::{EncryptionConfig, EncryptionOrchestrator};
