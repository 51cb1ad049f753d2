//! The payload fed back to the model for one tool call.
//!
//! [`ToolOutcome`] is the only artifact that crosses the trust
//! boundary. It carries either the released raw payloads, a cancellation
//! marker, or a sanitized failure marker; candidate previews and titles
//! never appear here.

use crate::tool::candidate::ReleasedResult;
use crate::tool::error::{ExecutionError, ExecutionErrorKind};
use crate::tool::request::CallId;
use serde::{Deserialize, Serialize};

/// What one orchestration step resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomePayload {
    /// The user approved; only the selected candidates are included.
    Released {
        results: Vec<ReleasedResult>,
        /// How many items the execution actually found.
        total_found: usize,
        /// How many items survived the result cap (before selection).
        returned: usize,
    },
    /// The user denied one of the gates, or the turn was cancelled.
    Cancelled,
    /// The execution failed; kind and a sanitized message only.
    Failed {
        kind: ExecutionErrorKind,
        message: String,
    },
}

/// Outcome of one tool call, correlated by call id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub call_id: CallId,
    #[serde(flatten)]
    pub payload: OutcomePayload,
    /// Wall-clock duration of the local execution, when one ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ToolOutcome {
    pub fn released(
        call_id: CallId,
        results: Vec<ReleasedResult>,
        total_found: usize,
        returned: usize,
    ) -> Self {
        Self {
            call_id,
            payload: OutcomePayload::Released {
                results,
                total_found,
                returned,
            },
            duration_ms: None,
        }
    }

    pub fn cancelled(call_id: CallId) -> Self {
        Self {
            call_id,
            payload: OutcomePayload::Cancelled,
            duration_ms: None,
        }
    }

    /// Build a failure outcome carrying the error kind and its
    /// canonical sanitized message, never the raw error text.
    pub fn failed(call_id: CallId, error: &ExecutionError) -> Self {
        Self {
            call_id,
            payload: OutcomePayload::Failed {
                kind: error.kind,
                message: error.sanitized_message().to_string(),
            },
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.payload, OutcomePayload::Cancelled)
    }

    /// Ids of the released payloads, empty unless released.
    pub fn released_ids(&self) -> Vec<&str> {
        match &self.payload {
            OutcomePayload::Released { results, .. } => {
                results.iter().map(|r| r.id.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}
