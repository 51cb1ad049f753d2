//! Approval port for the two consent gates.
//!
//! Following the Ports and Adapters pattern:
//! - **Port**: [`ApprovalPort`] - defined here in the application layer
//! - **Adapter**: `ConsoleApproval` - implemented in the cli crate
//!
//! # Flow
//!
//! ```text
//! ToolRequest received
//!        ↓
//! ApprovalPort::review_execution()     "may this tool run at all?"
//!        ↓ approved
//! capability executes locally
//!        ↓
//! ApprovalPort::review_results()       "which items may be released?"
//!        ↓ approved + released_ids
//! released payloads cross the boundary
//! ```
//!
//! # Built-in Implementations
//!
//! - [`AutoDenyApproval`] - always denies; the safest non-interactive mode
//! - [`AutoApproveApproval`] - approves everything and releases all items
//!
//! For interactive use, build adapters on the resolve-once gate in
//! [`approval_gate`](super::approval_gate).

use async_trait::async_trait;
use scribe_domain::{CandidateResult, ExecuteDecision, ResultsDecision, ToolRequest};
use thiserror::Error;

/// Error type for approval operations.
///
/// These represent failures of the presenting surface, not decisions
/// made by the user.
#[derive(Debug, Clone, Error)]
pub enum ApprovalError {
    /// The surface was dismissed or the turn was cancelled; treated as
    /// a denial, never as a silent approval.
    #[error("approval cancelled")]
    Cancelled,
    /// Input/output error (e.g., terminal read failure).
    #[error("approval I/O error: {0}")]
    Io(String),
}

/// Port for requesting per-call human decisions.
///
/// Both methods resolve exactly once from the orchestrator's point of
/// view; an adapter whose surface is closed without an explicit choice
/// must return [`ApprovalError::Cancelled`], never hang.
#[async_trait]
pub trait ApprovalPort: Send + Sync {
    /// Execute gate: decide whether the described tool call may run,
    /// given its kind and parameters. No result data exists yet.
    async fn review_execution(
        &self,
        request: &ToolRequest,
    ) -> Result<ExecuteDecision, ApprovalError>;

    /// Results gate: decide which of the computed candidates may be
    /// released. Presented even when `candidates` is empty, so no call
    /// resolves without an explicit decision.
    ///
    /// The adapter must not mutate the candidates; selection state is
    /// kept separately (see `ResultSelector`).
    async fn review_results(
        &self,
        request: &ToolRequest,
        candidates: &[CandidateResult],
    ) -> Result<ResultsDecision, ApprovalError>;
}

/// Auto-deny implementation; nothing ever executes or crosses the
/// boundary. Useful as a hard-off switch and in tests.
pub struct AutoDenyApproval;

#[async_trait]
impl ApprovalPort for AutoDenyApproval {
    async fn review_execution(
        &self,
        _request: &ToolRequest,
    ) -> Result<ExecuteDecision, ApprovalError> {
        Ok(ExecuteDecision::deny())
    }

    async fn review_results(
        &self,
        _request: &ToolRequest,
        _candidates: &[CandidateResult],
    ) -> Result<ResultsDecision, ApprovalError> {
        Ok(ResultsDecision::deny())
    }
}

/// Auto-approve implementation releasing every candidate.
///
/// **Use with caution** - this bypasses the consent pipeline entirely
/// and should only be used against non-sensitive corpora.
pub struct AutoApproveApproval;

#[async_trait]
impl ApprovalPort for AutoApproveApproval {
    async fn review_execution(
        &self,
        _request: &ToolRequest,
    ) -> Result<ExecuteDecision, ApprovalError> {
        Ok(ExecuteDecision::approve())
    }

    async fn review_results(
        &self,
        _request: &ToolRequest,
        candidates: &[CandidateResult],
    ) -> Result<ResultsDecision, ApprovalError> {
        Ok(ResultsDecision::approve_all(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::ToolParams;

    fn request() -> ToolRequest {
        ToolRequest::new(
            "call-1",
            ToolParams::WebSearch {
                query: "test".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_auto_deny() {
        let port = AutoDenyApproval;
        let decision = port.review_execution(&request()).await.unwrap();
        assert!(!decision.approved);

        let decision = port.review_results(&request(), &[]).await.unwrap();
        assert!(!decision.approved);
        assert!(decision.released_ids.is_empty());
    }

    #[tokio::test]
    async fn test_auto_approve_releases_all() {
        let port = AutoApproveApproval;
        let candidates = vec![
            CandidateResult::new("a.md", "a", "raw", 200),
            CandidateResult::new("b.md", "b", "raw", 200),
        ];
        let decision = port.review_results(&request(), &candidates).await.unwrap();
        assert!(decision.approved);
        assert_eq!(decision.released_ids.len(), 2);
    }
}
