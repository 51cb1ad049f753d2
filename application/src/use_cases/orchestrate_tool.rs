//! Orchestration of one tool call through the consent pipeline.
//!
//! Sequence per call:
//!
//! ```text
//! execute gate ──> local execution ──> results gate ──> selective release
//! ```
//!
//! Nothing crosses the trust boundary before the results gate resolves,
//! and every path out of the pipeline produces exactly one
//! [`ToolOutcome`]: denial at either gate and cancellation both map to
//! the cancellation marker, execution failure maps to a sanitized
//! failure marker. The model is never told which of the two it was.

use crate::ports::approval::ApprovalPort;
use crate::ports::capability::CapabilityRegistry;
use crate::ports::progress::TurnProgressNotifier;
use scribe_domain::{CandidateResult, ReleasedResult, ToolCallTracker, ToolOutcome, ToolRequest};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Drives one tool call from request to outcome.
///
/// Cheap to construct; the coordinator builds one per round and runs all
/// of the round's calls on it concurrently.
pub struct ToolOrchestrator {
    approval: Arc<dyn ApprovalPort>,
    capabilities: Arc<CapabilityRegistry>,
    cancellation: CancellationToken,
}

impl ToolOrchestrator {
    pub fn new(approval: Arc<dyn ApprovalPort>, capabilities: Arc<CapabilityRegistry>) -> Self {
        Self {
            approval,
            capabilities,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Run the full pipeline for one request. Always returns an outcome;
    /// this function never surfaces an error to the turn loop, because
    /// every failure mode has a model-facing representation.
    pub async fn run(
        &self,
        request: ToolRequest,
        progress: &dyn TurnProgressNotifier,
    ) -> ToolOutcome {
        let call_id = request.call_id.clone();
        let mut tracker = ToolCallTracker::new(request.kind());

        tracker.mark_pending_execute();
        progress.on_tool_call(&call_id, tracker.state());

        let decision = tokio::select! {
            _ = self.cancellation.cancelled() => {
                return ToolOutcome::cancelled(call_id);
            }
            result = self.approval.review_execution(&request) => result,
        };
        let approved = match decision {
            Ok(decision) => decision.approved,
            // Surface failure or dismissal resolves as a denial.
            Err(_) => false,
        };
        if !approved {
            tracker.mark_denied();
            progress.on_tool_call(&call_id, tracker.state());
            debug!(call_id = %call_id, "execution denied");
            return ToolOutcome::cancelled(call_id);
        }

        tracker.mark_executing();
        progress.on_tool_call(&call_id, tracker.state());
        let started = Instant::now();

        let result = tokio::select! {
            _ = self.cancellation.cancelled() => {
                return ToolOutcome::cancelled(call_id);
            }
            result = self.capabilities.execute(&request.params) => result,
        };
        let duration_ms = started.elapsed().as_millis() as u64;
        let output = match result {
            Ok(output) => output,
            Err(error) => {
                tracker.mark_failed(error.kind);
                progress.on_tool_call(&call_id, tracker.state());
                progress.on_tool_failure(&call_id, &error);
                // Full message stays local; the outcome carries the
                // sanitized form only.
                warn!(call_id = %call_id, kind = %error.kind, error = %error, "capability failed");
                return ToolOutcome::failed(call_id, &error).with_duration(duration_ms);
            }
        };

        // The results gate is presented even for an empty candidate
        // list; there is no silent auto-release path.
        tracker.mark_pending_results(output.candidates.len());
        progress.on_tool_call(&call_id, tracker.state());

        let decision = tokio::select! {
            _ = self.cancellation.cancelled() => {
                return ToolOutcome::cancelled(call_id);
            }
            result = self.approval.review_results(&request, &output.candidates) => result,
        };
        let decision = match decision {
            Ok(decision) => decision.sanitize(&output.candidates),
            Err(_) => {
                tracker.mark_denied();
                progress.on_tool_call(&call_id, tracker.state());
                return ToolOutcome::cancelled(call_id);
            }
        };
        if !decision.approved {
            tracker.mark_denied();
            progress.on_tool_call(&call_id, tracker.state());
            debug!(call_id = %call_id, "release denied");
            return ToolOutcome::cancelled(call_id);
        }

        let returned = output.candidates.len();
        let released: Vec<ReleasedResult> = output
            .candidates
            .iter()
            .filter(|c| decision.released_ids.contains(&c.id))
            .map(CandidateResult::release)
            .collect();

        tracker.mark_released(released.len());
        progress.on_tool_call(&call_id, tracker.state());
        info!(
            call_id = %call_id,
            released = released.len(),
            returned,
            total_found = output.total_found,
            "results released"
        );
        ToolOutcome::released(call_id, released, output.total_found, returned)
            .with_duration(duration_ms)
    }
}
