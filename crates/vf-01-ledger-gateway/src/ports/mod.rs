//! Ports for the Ledger Gateway
//!
//! Two views of the same contract: anyone may read, only a connected
//! session may sign.

pub mod outbound;

pub use outbound::{LedgerReader, LedgerSigner, NewRecord};
