//! Lifecycle domain: per-operation trackers and the board that folds
//! `OperationEvent`s into them.

pub mod board;
pub mod tracker;

pub use board::{BusyFlags, LifecycleConfig, StatusBoard, StatusView};
pub use tracker::OperationTracker;
