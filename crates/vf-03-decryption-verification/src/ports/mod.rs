//! Ports for the Decryption-Verification Orchestrator

pub mod outbound;

pub use outbound::{DecryptionOutcome, DecryptionService, VerificationSubmitter};
