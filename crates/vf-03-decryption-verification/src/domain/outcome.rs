//! Result of a successful `verify`.

use shared_types::{RecordId, TxReceipt};

/// How the plaintext was obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationPath {
    /// The record was verified before this call; nothing was decrypted.
    AlreadyVerified,
    /// This call's submission was confirmed.
    Submitted { receipt: TxReceipt },
    /// Another submission won the race; its confirmed value was adopted.
    RaceAbsorbed,
}

impl VerificationPath {
    /// Short label for metrics and logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AlreadyVerified => "already_verified",
            Self::Submitted { .. } => "submitted",
            Self::RaceAbsorbed => "race_absorbed",
        }
    }
}

/// Ledger-confirmed plaintext of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub record_id: RecordId,
    pub plaintext: u64,
    pub path: VerificationPath,
}
