//! # vf-04-lifecycle
//!
//! Lifecycle State Machine for user-visible operations.
//!
//! Every operation instance moves `Idle → Pending → {Success, Error} → Idle`.
//! Orchestration code never mutates status directly: it emits
//! [`OperationEvent`](shared_types::OperationEvent)s, which the
//! [`StatusBoard`] folds into per-instance trackers.
//!
//! - A tracker settles exactly once; a second terminal event is an
//!   `InvalidTransition`.
//! - Settled trackers disappear after their display window (2 s success,
//!   3 s error by default).
//! - The visible status is last-writer-wins among unexpired trackers.

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{BusyFlags, LifecycleConfig, OperationTracker, StatusBoard, StatusView};
pub use error::{LifecycleError, LifecycleResult};
pub use service::LifecycleMachine;
