//! One operation instance.
//!
//! ```text
//! Pending ──Progress──→ Pending
//!    │
//!    ├──Succeeded──→ Success ──(success window)──→ expired
//!    └──Failed─────→ Error ────(error window)────→ expired
//! ```
//!
//! A tracker leaves `Pending` exactly once.

use crate::error::{LifecycleError, LifecycleResult};
use shared_types::{OperationEvent, OperationId, OperationKind, OperationStatus};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationTracker {
    id: OperationId,
    kind: OperationKind,
    status: OperationStatus,
    message: String,
    /// Board-wide write sequence of the last applied event.
    last_write: u64,
    settled_at: Option<Instant>,
}

impl OperationTracker {
    /// Tracker in `Pending`.
    pub fn start(id: OperationId, kind: OperationKind, message: String, write: u64) -> Self {
        Self {
            id,
            kind,
            status: OperationStatus::Pending,
            message,
            last_write: write,
            settled_at: None,
        }
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn status(&self) -> OperationStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn last_write(&self) -> u64 {
        self.last_write
    }

    pub fn is_pending(&self) -> bool {
        self.status == OperationStatus::Pending
    }

    /// Apply a non-`Started` event.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` for anything but `Progress`/`Succeeded`/`Failed`
    /// on a pending tracker.
    pub fn apply(&mut self, event: &OperationEvent, write: u64, now: Instant) -> LifecycleResult<()> {
        let to = event.status();
        if !self.is_pending() || matches!(event, OperationEvent::Started { .. }) {
            return Err(LifecycleError::InvalidTransition {
                id: self.id,
                from: self.status,
                to,
            });
        }

        self.status = to;
        self.message = event.message().to_string();
        self.last_write = write;
        if to.is_terminal() {
            self.settled_at = Some(now);
        }
        Ok(())
    }

    /// When this tracker stops being visible; `None` while pending.
    pub fn expires_at(&self, config: &super::LifecycleConfig) -> Option<Instant> {
        let settled = self.settled_at?;
        let window = match self.status {
            OperationStatus::Error => config.error_display,
            _ => config.success_display,
        };
        Some(settled + window)
    }

    pub fn is_expired(&self, now: Instant, config: &super::LifecycleConfig) -> bool {
        self.expires_at(config).is_some_and(|at| now >= at)
    }
}
