//! Lifecycle Machine - shared, clock-driven front of the [`StatusBoard`].

use crate::domain::{BusyFlags, LifecycleConfig, StatusBoard, StatusView};
use crate::error::LifecycleResult;
use parking_lot::Mutex;
use shared_types::{OperationEvent, OperationId, OperationKind, OperationStatus};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Status board behind a lock, read against the tokio clock.
#[derive(Debug)]
pub struct LifecycleMachine {
    board: Mutex<StatusBoard>,
}

impl LifecycleMachine {
    pub fn new(config: LifecycleConfig) -> Self {
        Self {
            board: Mutex::new(StatusBoard::new(config)),
        }
    }

    /// Fold an event into the board.
    pub fn apply(&self, event: &OperationEvent) -> LifecycleResult<OperationStatus> {
        let result = self.board.lock().apply(event, Instant::now());
        match &result {
            Ok(status) => debug!(
                operation = %event.operation_id(),
                status = ?status,
                message = event.message(),
                "Operation status updated"
            ),
            Err(e) => warn!(operation = %event.operation_id(), error = %e, "Operation event rejected"),
        }
        result
    }

    /// Stop tracking a pending operation, e.g. when its view closed.
    pub fn withdraw(&self, id: &OperationId) -> bool {
        let withdrawn = self.board.lock().withdraw(id);
        if withdrawn {
            debug!(operation = %id, "Operation withdrawn");
        }
        withdrawn
    }

    /// The status line to show now.
    pub fn current(&self) -> Option<StatusView> {
        self.board.lock().visible(Instant::now())
    }

    pub fn status_of(&self, id: &OperationId) -> OperationStatus {
        self.board.lock().status_of(id, Instant::now())
    }

    pub fn is_busy(&self, kind: OperationKind) -> bool {
        self.board.lock().is_busy(kind)
    }

    pub fn busy_flags(&self) -> BusyFlags {
        self.board.lock().busy_flags()
    }

    /// Drop expired trackers.
    pub fn sweep(&self) -> usize {
        self.board.lock().prune(Instant::now())
    }

    /// Sleep until the next settled operation expires, then sweep.
    ///
    /// Returns immediately with 0 when nothing is settled.
    pub async fn sweep_when_due(&self) -> usize {
        let next = self.board.lock().next_expiry();
        let Some(due) = next else {
            return 0;
        };
        tokio::time::sleep_until(due).await;
        self.sweep()
    }
}

impl Default for LifecycleMachine {
    fn default() -> Self {
        Self::new(LifecycleConfig::default())
    }
}
