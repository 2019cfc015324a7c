//! Error types for the Encryption Orchestrator

use shared_types::Identity;
use thiserror::Error;
use vf_01_ledger_gateway::{LedgerError, RevertReason};

/// Encryption orchestration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptionError {
    /// Title or description missing
    #[error("Invalid submission: {0}")]
    InvalidSubmission(&'static str),

    /// The session does not belong to the signer this orchestrator holds
    #[error("Session identity {session} does not match signer {signer}")]
    SessionMismatch { session: Identity, signer: Identity },

    /// The encryption service failed; nothing reached the ledger
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// The signer declined the `create_record` transaction
    #[error("User rejected the transaction")]
    UserRejected,

    /// The contract reverted `create_record`
    #[error("Ledger rejected the record: {reason}")]
    LedgerRejected { reason: RevertReason },

    /// Transport or confirmation failure
    #[error("Ledger error: {0}")]
    Ledger(LedgerError),
}

impl From<LedgerError> for EncryptionError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UserRejected => Self::UserRejected,
            LedgerError::Reverted(reason) => Self::LedgerRejected { reason },
            other => Self::Ledger(other),
        }
    }
}

/// Result type for encryption operations
pub type EncryptionResult<T> = Result<T, EncryptionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_classification() {
        assert_eq!(
            EncryptionError::from(LedgerError::UserRejected),
            EncryptionError::UserRejected
        );
        assert_eq!(
            EncryptionError::from(LedgerError::Reverted(RevertReason::DuplicateRecord)),
            EncryptionError::LedgerRejected {
                reason: RevertReason::DuplicateRecord
            }
        );
        assert!(matches!(
            EncryptionError::from(LedgerError::Unavailable("down".into())),
            EncryptionError::Ledger(LedgerError::Unavailable(_))
        ));
    }
}
