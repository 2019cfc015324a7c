//! # Operation Events
//!
//! Transient status of in-flight user actions. Orchestration results are
//! reported as `OperationEvent` values and folded into the status board by
//! a reducer; nothing holds a shared mutable status object.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one operation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(pub Uuid);

impl OperationId {
    /// Fresh operation id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an operation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Encryption runtime start-up after connect.
    Initialize,
    /// Encrypt and create a record.
    Create,
    /// Decrypt locally and verify on-chain.
    DecryptVerify,
    /// Full re-read of the record set.
    Refresh,
    /// Contract availability check.
    AvailabilityCheck,
}

/// Status of an operation instance.
///
/// ```text
/// Idle ──start──→ Pending ──succeed──→ Success ──(display window)──→ Idle
///                    │
///                    └──────fail──────→ Error ───(display window)──→ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OperationStatus {
    /// Nothing to show.
    #[default]
    Idle,
    /// In flight.
    Pending,
    /// Finished successfully.
    Success,
    /// Finished with a failure.
    Error,
}

impl OperationStatus {
    /// Whether this is `Success` or `Error`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// A single status transition of one operation instance, passed by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationEvent {
    /// Operation entered `Pending`.
    Started {
        id: OperationId,
        kind: OperationKind,
        message: String,
    },
    /// Pending operation changed its message.
    Progress { id: OperationId, message: String },
    /// Operation reached `Success`.
    Succeeded { id: OperationId, message: String },
    /// Operation reached `Error`.
    Failed { id: OperationId, message: String },
}

impl OperationEvent {
    /// The operation this event belongs to.
    #[must_use]
    pub fn operation_id(&self) -> OperationId {
        match self {
            Self::Started { id, .. }
            | Self::Progress { id, .. }
            | Self::Succeeded { id, .. }
            | Self::Failed { id, .. } => *id,
        }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Started { message, .. }
            | Self::Progress { message, .. }
            | Self::Succeeded { message, .. }
            | Self::Failed { message, .. } => message,
        }
    }

    /// Status the operation is in after this event.
    #[must_use]
    pub fn status(&self) -> OperationStatus {
        match self {
            Self::Started { .. } | Self::Progress { .. } => OperationStatus::Pending,
            Self::Succeeded { .. } => OperationStatus::Success,
            Self::Failed { .. } => OperationStatus::Error,
        }
    }
}
