//! Resolve-once decision gate.
//!
//! Bridges event-driven approval surfaces (a dialog with buttons, a
//! keybinding handler) to the async [`ApprovalPort`](super::approval::ApprovalPort)
//! contract. The surface holds a [`GateHandle`] and calls
//! [`resolve`](GateHandle::resolve) on user action; the orchestrator
//! awaits the paired [`PendingDecision`].
//!
//! Guarantees:
//! - resolves exactly once; later resolves are ignored (idempotent)
//! - dropping every handle without resolving yields a cancellation,
//!   never a hang and never a silent approval

use crate::ports::approval::ApprovalError;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Create a connected handle/future pair for one decision.
pub fn approval_gate<D: Send + 'static>() -> (GateHandle<D>, PendingDecision<D>) {
    let (tx, rx) = oneshot::channel();
    (
        GateHandle {
            sender: Arc::new(Mutex::new(Some(tx))),
        },
        PendingDecision { receiver: rx },
    )
}

/// Resolving side of a gate, held by the approval surface.
///
/// Cloneable so that several UI paths (confirm button, dismiss event,
/// keyboard shortcut) can race; only the first resolution wins.
pub struct GateHandle<D> {
    sender: Arc<Mutex<Option<oneshot::Sender<D>>>>,
}

impl<D> Clone for GateHandle<D> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<D> GateHandle<D> {
    /// Resolve the gate with a decision. Returns `true` if this call
    /// decided the gate, `false` if it was already resolved.
    pub fn resolve(&self, decision: D) -> bool {
        let sender = self.sender.lock().expect("gate lock poisoned").take();
        match sender {
            Some(tx) => tx.send(decision).is_ok(),
            None => false,
        }
    }

    /// Resolve as a cancellation without an explicit decision, e.g. on
    /// a dialog close event. Idempotent like [`resolve`](Self::resolve).
    pub fn dismiss(&self) -> bool {
        // Dropping the sender makes the receiver observe cancellation.
        let sender = self.sender.lock().expect("gate lock poisoned").take();
        sender.is_some()
    }
}

/// Awaiting side of a gate, consumed by the orchestrator.
pub struct PendingDecision<D> {
    receiver: oneshot::Receiver<D>,
}

impl<D> PendingDecision<D> {
    /// Wait for the surface to decide. A dismissed or dropped handle
    /// resolves as [`ApprovalError::Cancelled`].
    pub async fn wait(self) -> Result<D, ApprovalError> {
        self.receiver.await.map_err(|_| ApprovalError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::ExecuteDecision;

    #[tokio::test]
    async fn test_resolves_with_decision() {
        let (handle, pending) = approval_gate();
        assert!(handle.resolve(ExecuteDecision::approve()));
        let decision = pending.wait().await.unwrap();
        assert!(decision.approved);
    }

    #[tokio::test]
    async fn test_second_resolve_is_ignored() {
        let (handle, pending) = approval_gate();
        assert!(handle.resolve(ExecuteDecision::deny()));
        // Duplicate UI event: no effect on the already-resolved gate.
        assert!(!handle.resolve(ExecuteDecision::approve()));
        let decision = pending.wait().await.unwrap();
        assert!(!decision.approved);
    }

    #[tokio::test]
    async fn test_dismiss_yields_cancellation() {
        let (handle, pending) = approval_gate::<ExecuteDecision>();
        assert!(handle.dismiss());
        assert!(matches!(
            pending.wait().await,
            Err(ApprovalError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_drop_yields_cancellation() {
        let (handle, pending) = approval_gate::<ExecuteDecision>();
        drop(handle);
        assert!(matches!(
            pending.wait().await,
            Err(ApprovalError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_resolve_after_dismiss_is_ignored() {
        let (handle, pending) = approval_gate::<ExecuteDecision>();
        let racing = handle.clone();
        assert!(handle.dismiss());
        assert!(!racing.resolve(ExecuteDecision::approve()));
        assert!(matches!(
            pending.wait().await,
            Err(ApprovalError::Cancelled)
        ));
    }
}
