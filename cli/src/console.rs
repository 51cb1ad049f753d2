//! Console adapters: interactive approval and progress reporting.
//!
//! The approval adapter drives the two consent gates over stdin. Each
//! prompt runs on the blocking thread pool and resolves a one-shot
//! decision gate, so the orchestrator side sees the same resolve-once
//! semantics a graphical dialog would provide.

use async_trait::async_trait;
use scribe_application::ports::approval::{ApprovalError, ApprovalPort};
use scribe_application::ports::approval_gate::approval_gate;
use scribe_application::ports::progress::TurnProgressNotifier;
use scribe_domain::{
    CallId, CandidateResult, ExecuteDecision, ExecutionError, ResultSelector, ResultsDecision,
    ToolCallState, ToolRequest,
};
use std::io::{self, Write};

pub struct ConsoleApproval;

async fn prompt_line(prompt: String) -> Result<String, ApprovalError> {
    tokio::task::spawn_blocking(move || {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok::<_, io::Error>(line)
    })
    .await
    .map_err(|e| ApprovalError::Io(e.to_string()))?
    .map_err(|e| ApprovalError::Io(e.to_string()))
}

/// Parse a results-gate reply into a decision.
///
/// Accepted forms: `all` (or an empty reply), `none`, `d`/`deny`, or a
/// comma-separated list of 1-based indices.
fn parse_results_reply(reply: &str, candidates: &[CandidateResult]) -> Option<ResultsDecision> {
    let reply = reply.trim().to_lowercase();
    match reply.as_str() {
        "" | "all" | "a" | "y" | "yes" => Some(ResultsDecision::approve_all(candidates)),
        "none" => {
            let mut selector = ResultSelector::for_candidates(candidates);
            selector.deselect_all();
            Some(ResultsDecision::approve(selector.shared_ids()))
        }
        "d" | "deny" | "n" | "no" => Some(ResultsDecision::deny()),
        _ => {
            let mut selector = ResultSelector::for_candidates(candidates);
            selector.deselect_all();
            for part in reply.split(',') {
                let index: usize = part.trim().parse().ok()?;
                let id = candidates.get(index.checked_sub(1)?)?.id.clone();
                selector.toggle(&id);
            }
            Some(ResultsDecision::approve(selector.shared_ids()))
        }
    }
}

#[async_trait]
impl ApprovalPort for ConsoleApproval {
    async fn review_execution(
        &self,
        request: &ToolRequest,
    ) -> Result<ExecuteDecision, ApprovalError> {
        let (handle, pending) = approval_gate();
        let prompt = format!(
            "\nTool request [{}]: {}\nAllow execution? [y/N] ",
            request.call_id,
            request.params.describe()
        );
        let reply = prompt_line(prompt).await?;
        let approved = matches!(reply.trim().to_lowercase().as_str(), "y" | "yes");
        handle.resolve(if approved {
            ExecuteDecision::approve()
        } else {
            ExecuteDecision::deny()
        });
        pending.wait().await
    }

    async fn review_results(
        &self,
        request: &ToolRequest,
        candidates: &[CandidateResult],
    ) -> Result<ResultsDecision, ApprovalError> {
        let (handle, pending) = approval_gate();

        let mut listing = format!(
            "\n{} finished: {} result(s)\n",
            request.kind(),
            candidates.len()
        );
        for (i, candidate) in candidates.iter().enumerate() {
            listing.push_str(&format!(
                "  {:>2}. {} ({})\n      {}\n",
                i + 1,
                candidate.title,
                candidate.id,
                candidate.preview.replace('\n', " ")
            ));
        }
        listing.push_str("Release which results? [all/none/deny/1,2,...] ");

        loop {
            let reply = prompt_line(listing.clone()).await?;
            if let Some(decision) = parse_results_reply(&reply, candidates) {
                handle.resolve(decision);
                return pending.wait().await;
            }
            println!("Unrecognized reply: {}", reply.trim());
        }
    }
}

/// Prints per-call state transitions and failures to stderr.
pub struct ConsoleProgress;

impl TurnProgressNotifier for ConsoleProgress {
    fn on_tool_call(&self, call_id: &CallId, state: &ToolCallState) {
        let label = match state {
            ToolCallState::Requested { .. } => return,
            ToolCallState::PendingExecuteApproval { .. } => "waiting for execute approval",
            ToolCallState::Executing { .. } => "executing",
            ToolCallState::PendingResultsApproval { .. } => "waiting for release approval",
            ToolCallState::Released { .. } => "released",
            ToolCallState::Denied { .. } => "denied",
            ToolCallState::Failed { .. } => "failed",
        };
        eprintln!("[{}] {} {}", call_id, state.kind(), label);
    }

    fn on_tool_failure(&self, call_id: &CallId, error: &ExecutionError) {
        // The full message is fine locally; only outcomes are sanitized.
        eprintln!("[{}] error: {}", call_id, error);
    }
}
