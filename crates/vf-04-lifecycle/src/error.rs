//! Error types for the Lifecycle State Machine

use shared_types::{OperationId, OperationStatus};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// `Started` for an id the board already tracks
    #[error("Operation {0} already started")]
    DuplicateOperation(OperationId),

    /// Event for an id that was never started, or has expired
    #[error("Unknown operation: {0}")]
    UnknownOperation(OperationId),

    /// Event not allowed from the tracker's current status
    #[error("Invalid transition for {id}: {from:?} -> {to:?}")]
    InvalidTransition {
        id: OperationId,
        from: OperationStatus,
        to: OperationStatus,
    },
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
