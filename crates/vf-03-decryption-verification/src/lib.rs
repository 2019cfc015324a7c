//! # vf-03-decryption-verification
//!
//! Self-relayed decryption: the client decrypts a record's value off-chain,
//! then submits the plaintext and its proof to the ledger, which checks the
//! proof and marks the record verified for good.
//!
//! ## Guarantees
//!
//! - **Idempotent at the ledger**: a verified record short-circuits, and a
//!   lost race (`RevertReason::AlreadyVerified`) is absorbed as success with
//!   the winner's confirmed value.
//! - **Integrity**: the confirmed plaintext must equal the local one, else
//!   `VerificationMismatch` is raised, logged at error level and counted.
//! - **Cancellation**: closing the [`OperationScope`](shared_types::OperationScope)
//!   before submission stops the protocol with no side effects; after
//!   submission the transaction is always followed to confirmation.
//!
//! ## Failure Semantics
//!
//! | Error | Chain interaction | Retry |
//! |-------|-------------------|-------|
//! | `DecryptionFailed` | none | yes |
//! | `UserRejected` | none | yes |
//! | `VerificationRejected` | reverted | yes |
//! | `VerificationMismatch` | confirmed | **no** |

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::CoprocessorDecryptionService;
pub use domain::{LocalDecryptionCache, VerificationOutcome, VerificationPath};
pub use error::{VerificationError, VerificationResult};
pub use ports::{DecryptionOutcome, DecryptionService, VerificationSubmitter};
pub use service::{VerificationConfig, VerificationOrchestrator};
