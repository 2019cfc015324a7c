//! Milestones an orchestration passes while it runs.

use crate::TxHash;
use async_trait::async_trait;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Milestone {
    /// A transaction was signed and sent; inclusion is still pending.
    AwaitingConfirmation(TxHash),
}

/// Receives milestones from an orchestrator.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn reached(&self, milestone: Milestone);
}

/// Sink for callers that do not follow progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unobserved;

#[async_trait]
impl ProgressSink for Unobserved {
    async fn reached(&self, _milestone: Milestone) {}
}
