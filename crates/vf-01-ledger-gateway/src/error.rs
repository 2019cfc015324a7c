//! Error types for the Ledger Gateway

use shared_types::{RecordId, TxHash};
use thiserror::Error;

/// Structured reason a contract call reverted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevertReason {
    /// The record already carries a verified plaintext.
    #[error("record already verified")]
    AlreadyVerified,

    /// A record with this id exists.
    #[error("record already exists")]
    DuplicateRecord,

    /// No record with this id.
    #[error("unknown record")]
    UnknownRecord,

    /// The ciphertext's input proof did not verify.
    #[error("invalid input proof")]
    InvalidInputProof,

    /// The decryption proof did not verify against the record's handle.
    #[error("invalid decryption proof")]
    InvalidDecryptionProof,

    /// The clear values payload is not exactly one ABI word holding a u64.
    #[error("malformed clear values: {0}")]
    MalformedClearValues(String),

    /// A required text field is empty.
    #[error("empty field: {0}")]
    EmptyField(&'static str),
}

/// Ledger Gateway errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The signer declined to sign.
    #[error("User rejected the signature request")]
    UserRejected,

    /// The contract reverted the call.
    #[error("Transaction reverted: {0}")]
    Reverted(RevertReason),

    /// Read of a record that does not exist.
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// A stored entry could not be decoded.
    #[error("Record {id} unreadable: {reason}")]
    Unreadable { id: RecordId, reason: String },

    /// Confirmation requested for a transaction the ledger never saw.
    #[error("Unknown transaction: {0}")]
    UnknownTransaction(TxHash),

    /// Confirmation did not arrive in time.
    #[error("Confirmation of {tx} timed out after {waited_ms}ms")]
    ConfirmationTimeout { tx: TxHash, waited_ms: u64 },

    /// The ledger endpoint is unreachable.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

impl LedgerError {
    /// Whether this is the structured "already verified" revert.
    #[must_use]
    pub fn is_already_verified(&self) -> bool {
        matches!(self, Self::Reverted(RevertReason::AlreadyVerified))
    }

    /// The revert reason, if the call reverted.
    #[must_use]
    pub fn revert_reason(&self) -> Option<&RevertReason> {
        match self {
            Self::Reverted(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_verified_discriminator() {
        assert!(LedgerError::Reverted(RevertReason::AlreadyVerified).is_already_verified());
        assert!(!LedgerError::Reverted(RevertReason::UnknownRecord).is_already_verified());
        assert!(!LedgerError::UserRejected.is_already_verified());
    }

    #[test]
    fn test_revert_reason_accessor() {
        let err = LedgerError::Reverted(RevertReason::InvalidDecryptionProof);
        assert_eq!(err.revert_reason(), Some(&RevertReason::InvalidDecryptionProof));
        assert_eq!(LedgerError::UserRejected.revert_reason(), None);
    }
}
