//! Client-level errors. Every crate's error converts into [`ClientError`].

use crate::container::ConfigError;
use shared_types::RecordId;
use thiserror::Error;
use vf_01_ledger_gateway::LedgerError;
use vf_02_encryption::EncryptionError;
use vf_03_decryption_verification::VerificationError;
use vf_04_lifecycle::LifecycleError;
use vf_05_aggregate_view::ViewError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The operation needs a connected session
    #[error("Please connect wallet first")]
    NotConnected,

    /// Not in the local record set
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// The wallet signs for a different contract than configured
    #[error("Wallet is bound to contract {wallet}, client to {configured}")]
    ContractMismatch {
        wallet: shared_types::ContractAddress,
        configured: shared_types::ContractAddress,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    View(#[from] ViewError),
}

impl ClientError {
    /// Whether the ledger and local decryption disagreed.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            Self::Verification(VerificationError::VerificationMismatch { .. })
        )
    }

    /// Whether a signature request was declined.
    pub fn is_user_rejection(&self) -> bool {
        matches!(
            self,
            Self::Encryption(EncryptionError::UserRejected)
                | Self::Verification(VerificationError::UserRejected)
                | Self::Ledger(LedgerError::UserRejected)
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
