//! Driving side: what a caller hands the orchestrator and gets back.

use shared_types::{Record, TxReceipt};

/// A record as entered by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub title: String,
    pub description: String,
    /// Confidential value, encrypted before it leaves the client
    pub value: u64,
    /// Non-confidential value stored in the clear
    pub public_value: u64,
}

/// Outcome of a successful submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedRecord {
    /// The record as re-read from the ledger after confirmation
    pub record: Record,
    pub receipt: TxReceipt,
}
