//! Ports for the Encryption Orchestrator

pub mod inbound;
pub mod outbound;

pub use inbound::{CreatedRecord, Submission};
pub use outbound::EncryptionService;
