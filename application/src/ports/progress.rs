//! Turn progress notifications for the presentation layer.

use scribe_domain::{CallId, ExecutionError, ToolCallState};

/// Observer of turn progress.
///
/// Implementations render status (round counter, per-call state, error
/// notifications); they never make decisions and never block the turn.
pub trait TurnProgressNotifier: Send + Sync {
    /// A model round is about to start (1-indexed).
    fn on_round_started(&self, _round: usize) {}

    /// One tool call moved to a new state.
    fn on_tool_call(&self, _call_id: &CallId, _state: &ToolCallState) {}

    /// A capability execution failed. Expected to surface as a
    /// notification with the full (local-only) message.
    fn on_tool_failure(&self, _call_id: &CallId, _error: &ExecutionError) {}
}

/// No-op notifier for headless runs and tests.
pub struct NoTurnProgress;

impl TurnProgressNotifier for NoTurnProgress {}
