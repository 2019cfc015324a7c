//! Error types for the Decryption-Verification Orchestrator

use shared_types::{Identity, RecordId};
use thiserror::Error;
use vf_01_ledger_gateway::{LedgerError, RevertReason};

/// Decryption-verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The session does not belong to the injected submitter
    #[error("Session identity {session} does not match submitter {submitter}")]
    SessionMismatch { session: Identity, submitter: Identity },

    /// No record with this id
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// Local decryption or proof generation failed; nothing reached the ledger
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// The signer declined the verification transaction
    #[error("User rejected the transaction")]
    UserRejected,

    /// The contract reverted for a reason other than "already verified"
    #[error("Verification rejected: {reason}")]
    VerificationRejected { reason: RevertReason },

    /// The ledger confirmed a different plaintext than local decryption
    /// produced, or confirmed nothing at all.
    #[error("Verification mismatch for {id}: local {local}, confirmed {confirmed:?}")]
    VerificationMismatch {
        id: RecordId,
        local: u64,
        confirmed: Option<u64>,
    },

    /// The initiating scope closed before anything was submitted
    #[error("Operation cancelled")]
    Cancelled,

    /// Transport or confirmation failure
    #[error("Ledger error: {0}")]
    Ledger(LedgerError),
}

impl VerificationError {
    /// Whether retrying the same call can succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DecryptionFailed(_)
                | Self::UserRejected
                | Self::VerificationRejected { .. }
                | Self::Cancelled
                | Self::Ledger(_)
        )
    }

    /// Whether this signals an integrity violation.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::VerificationMismatch { .. })
    }

    /// Short label for metrics and logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionMismatch { .. } => "session_mismatch",
            Self::RecordNotFound(_) => "record_not_found",
            Self::DecryptionFailed(_) => "decryption_failed",
            Self::UserRejected => "user_rejected",
            Self::VerificationRejected { .. } => "verification_rejected",
            Self::VerificationMismatch { .. } => "verification_mismatch",
            Self::Cancelled => "cancelled",
            Self::Ledger(_) => "ledger",
        }
    }
}

impl From<LedgerError> for VerificationError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UserRejected => Self::UserRejected,
            LedgerError::Reverted(reason) => Self::VerificationRejected { reason },
            LedgerError::RecordNotFound(id) => Self::RecordNotFound(id),
            other => Self::Ledger(other),
        }
    }
}

/// Result type for decryption-verification operations
pub type VerificationResult<T> = Result<T, VerificationError>;
