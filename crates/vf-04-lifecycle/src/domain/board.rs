//! # Status Board
//!
//! Reducer over `OperationEvent`s. Holds one tracker per operation instance;
//! the visible status is the most recently written tracker that has not
//! expired. Time is passed in by the caller, so the board itself is pure.

use super::tracker::OperationTracker;
use crate::error::{LifecycleError, LifecycleResult};
use shared_types::{OperationEvent, OperationId, OperationKind, OperationStatus};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Display windows for settled operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifecycleConfig {
    pub success_display: Duration,
    pub error_display: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            success_display: Duration::from_secs(2),
            error_display: Duration::from_secs(3),
        }
    }
}

/// What a status line shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusView {
    pub id: OperationId,
    pub kind: OperationKind,
    pub status: OperationStatus,
    pub message: String,
}

impl From<&OperationTracker> for StatusView {
    fn from(tracker: &OperationTracker) -> Self {
        Self {
            id: tracker.id(),
            kind: tracker.kind(),
            status: tracker.status(),
            message: tracker.message().to_string(),
        }
    }
}

/// In-flight flags a presentation layer disables buttons with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusyFlags {
    pub initializing: bool,
    pub refreshing: bool,
    pub creating: bool,
    pub decrypting: bool,
    pub checking: bool,
}

impl BusyFlags {
    pub fn any(&self) -> bool {
        self.initializing || self.refreshing || self.creating || self.decrypting || self.checking
    }
}

#[derive(Debug, Default)]
pub struct StatusBoard {
    config: LifecycleConfig,
    trackers: HashMap<OperationId, OperationTracker>,
    writes: u64,
}

impl StatusBoard {
    pub fn new(config: LifecycleConfig) -> Self {
        Self {
            config,
            trackers: HashMap::new(),
            writes: 0,
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Fold one event into the board and return the tracker's new status.
    ///
    /// Expired trackers are pruned first, so a late event for an expired
    /// operation is reported as `UnknownOperation`.
    pub fn apply(&mut self, event: &OperationEvent, now: Instant) -> LifecycleResult<OperationStatus> {
        self.prune(now);
        self.writes += 1;
        let write = self.writes;

        if let OperationEvent::Started { id, kind, message } = event {
            if self.trackers.contains_key(id) {
                return Err(LifecycleError::DuplicateOperation(*id));
            }
            self.trackers
                .insert(*id, OperationTracker::start(*id, *kind, message.clone(), write));
            return Ok(OperationStatus::Pending);
        }

        let id = event.operation_id();
        let tracker = self
            .trackers
            .get_mut(&id)
            .ok_or(LifecycleError::UnknownOperation(id))?;
        tracker.apply(event, write, now)?;
        Ok(tracker.status())
    }

    /// Remove a pending tracker whose initiator went away. Settled trackers
    /// are left to expire.
    pub fn withdraw(&mut self, id: &OperationId) -> bool {
        if self.trackers.get(id).is_some_and(OperationTracker::is_pending) {
            self.trackers.remove(id);
            return true;
        }
        false
    }

    /// Status of one operation; `Idle` once expired or never seen.
    pub fn status_of(&self, id: &OperationId, now: Instant) -> OperationStatus {
        self.live(now)
            .find(|t| t.id() == *id)
            .map_or(OperationStatus::Idle, OperationTracker::status)
    }

    /// Last-writer-wins among unexpired trackers.
    pub fn visible(&self, now: Instant) -> Option<StatusView> {
        self.live(now)
            .max_by_key(|t| t.last_write())
            .map(StatusView::from)
    }

    /// Whether an operation of `kind` is pending.
    pub fn is_busy(&self, kind: OperationKind) -> bool {
        self.trackers
            .values()
            .any(|t| t.kind() == kind && t.is_pending())
    }

    pub fn busy_flags(&self) -> BusyFlags {
        BusyFlags {
            initializing: self.is_busy(OperationKind::Initialize),
            refreshing: self.is_busy(OperationKind::Refresh),
            creating: self.is_busy(OperationKind::Create),
            decrypting: self.is_busy(OperationKind::DecryptVerify),
            checking: self.is_busy(OperationKind::AvailabilityCheck),
        }
    }

    /// Earliest instant at which a settled tracker expires.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.trackers
            .values()
            .filter_map(|t| t.expires_at(&self.config))
            .min()
    }

    /// Drop expired trackers; returns how many were dropped.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.trackers.len();
        let config = &self.config;
        self.trackers.retain(|_, t| !t.is_expired(now, config));
        before - self.trackers.len()
    }

    /// Number of trackers held, expired or not.
    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    fn live(&self, now: Instant) -> impl Iterator<Item = &OperationTracker> {
        let config = &self.config;
        self.trackers
            .values()
            .filter(move |t| !t.is_expired(now, config))
    }
}
