//! # Operation Reporting
//!
//! Turns orchestration progress into [`OperationEvent`]s, folds them into
//! the lifecycle machine and publishes them on the bus.
//!
//! An [`OperationReport`] is bound to the scope of the view that started
//! it. Once that scope closes the pending tracker is withdrawn and later
//! events are dropped; the underlying work is not interrupted.

use async_trait::async_trait;
use shared_bus::{ClientEvent, EventPublisher};
use shared_types::{
    Milestone, OperationEvent, OperationId, OperationKind, OperationScope, ProgressSink,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use vf_04_lifecycle::{LifecycleMachine, LifecycleResult};

#[derive(Clone)]
pub struct OperationReporter {
    lifecycle: Arc<LifecycleMachine>,
    publisher: Arc<dyn EventPublisher>,
}

impl OperationReporter {
    pub fn new(lifecycle: Arc<LifecycleMachine>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            lifecycle,
            publisher,
        }
    }

    /// Start a new operation instance in `Pending`.
    pub async fn begin(
        &self,
        kind: OperationKind,
        message: impl Into<String>,
        scope: OperationScope,
    ) -> LifecycleResult<OperationReport> {
        let report = OperationReport {
            id: OperationId::new(),
            scope,
            reporter: self.clone(),
            withdrawn: AtomicBool::new(false),
        };
        let event = OperationEvent::Started {
            id: report.id,
            kind,
            message: message.into(),
        };
        self.lifecycle.apply(&event)?;
        self.publisher.publish(ClientEvent::Operation(event)).await;
        Ok(report)
    }

    /// Record an operation that fails before it could start, such as an
    /// action attempted without a session.
    pub async fn reject(&self, kind: OperationKind, message: impl Into<String>) {
        let message = message.into();
        if let Ok(report) = self
            .begin(kind, message.clone(), OperationScope::detached())
            .await
        {
            report.fail(message).await;
        }
    }
}

/// One in-flight operation.
pub struct OperationReport {
    id: OperationId,
    scope: OperationScope,
    reporter: OperationReporter,
    withdrawn: AtomicBool,
}

impl OperationReport {
    pub fn id(&self) -> OperationId {
        self.id
    }

    pub async fn progress(&self, message: impl Into<String>) {
        self.forward(OperationEvent::Progress {
            id: self.id,
            message: message.into(),
        })
        .await;
    }

    /// Relay orchestration milestones as progress, with `describe` giving
    /// the message shown for each.
    pub fn relay(&self, describe: fn(&Milestone) -> &'static str) -> ProgressRelay<'_> {
        ProgressRelay {
            report: self,
            describe,
        }
    }

    pub async fn succeed(self, message: impl Into<String>) {
        self.forward(OperationEvent::Succeeded {
            id: self.id,
            message: message.into(),
        })
        .await;
    }

    pub async fn fail(self, message: impl Into<String>) {
        self.forward(OperationEvent::Failed {
            id: self.id,
            message: message.into(),
        })
        .await;
    }

    async fn forward(&self, event: OperationEvent) {
        if self.scope.is_closed() {
            if !self.withdrawn.swap(true, Ordering::SeqCst) {
                self.reporter.lifecycle.withdraw(&self.id);
            }
            debug!(operation = %self.id, "Scope closed, event not forwarded");
            return;
        }
        // The event is still published so subscribers see what the
        // orchestration reported.
        if let Err(e) = self.reporter.lifecycle.apply(&event) {
            debug!(operation = %self.id, error = %e, "Event rejected by lifecycle");
        }
        self.reporter
            .publisher
            .publish(ClientEvent::Operation(event))
            .await;
    }
}

/// [`ProgressSink`] feeding an [`OperationReport`].
pub struct ProgressRelay<'a> {
    report: &'a OperationReport,
    describe: fn(&Milestone) -> &'static str,
}

#[async_trait]
impl<'a> ProgressSink for ProgressRelay<'a> {
    async fn reached(&self, milestone: Milestone) {
        self.report.progress((self.describe)(&milestone)).await;
    }
}
