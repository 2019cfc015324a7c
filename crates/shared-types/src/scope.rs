//! # Operation Scope
//!
//! Cancellation signal tied to the view that started an operation. Closing
//! the handle (or dropping it) closes every clone of the scope.

use std::sync::Arc;
use tokio::sync::watch;

/// Owner side of a scope. Dropping it closes the scope.
#[derive(Debug)]
pub struct ScopeHandle {
    tx: watch::Sender<bool>,
}

impl ScopeHandle {
    /// Close the scope.
    pub fn close(&self) {
        self.tx.send_replace(true);
    }
}

impl Drop for ScopeHandle {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}

/// Observer side of a scope, cheap to clone.
#[derive(Debug, Clone)]
pub struct OperationScope {
    rx: watch::Receiver<bool>,
    // Keeps detached scopes open forever.
    _anchor: Option<Arc<watch::Sender<bool>>>,
}

impl OperationScope {
    /// Create a scope and the handle that closes it.
    #[must_use]
    pub fn new() -> (ScopeHandle, OperationScope) {
        let (tx, rx) = watch::channel(false);
        (ScopeHandle { tx }, OperationScope { rx, _anchor: None })
    }

    /// A scope that never closes.
    #[must_use]
    pub fn detached() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            rx,
            _anchor: Some(Arc::new(tx)),
        }
    }

    /// Whether the scope has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolve once the scope is closed.
    pub async fn closed(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}
