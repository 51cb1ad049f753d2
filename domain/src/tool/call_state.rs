//! Per-call approval state machine.
//!
//! Tracks one tool call through the consent pipeline:
//!
//! ```text
//! Requested ──> PendingExecuteApproval ──> Executing ──> PendingResultsApproval ──> Released
//!                         └──> Denied            └──> Failed         └──> Denied
//! ```
//!
//! Each [`ToolCallTracker`] wraps a [`ToolCallState`] enum that enforces
//! valid transitions at the type level; invalid transitions are no-ops.

use crate::tool::error::ExecutionErrorKind;
use crate::tool::request::ToolKind;
use serde::{Deserialize, Serialize};

/// Which gate turned the call down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStage {
    Execute,
    Results,
}

/// State of one tool call, where each variant carries only the fields
/// valid for that state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolCallState {
    /// Request received from the model.
    Requested { kind: ToolKind },
    /// Waiting for the user to allow execution.
    PendingExecuteApproval { kind: ToolKind },
    /// Capability executor is running locally.
    Executing { kind: ToolKind, started_at: u64 },
    /// Results computed, waiting for per-item release approval.
    PendingResultsApproval {
        kind: ToolKind,
        started_at: u64,
        candidate_count: usize,
    },
    /// Terminal: approved subset released to the model.
    Released {
        kind: ToolKind,
        released_count: usize,
        duration_ms: u64,
    },
    /// Terminal: a gate was denied; nothing crossed the boundary.
    Denied { kind: ToolKind, at: GateStage },
    /// Terminal: the local execution failed.
    Failed {
        kind: ToolKind,
        error_kind: ExecutionErrorKind,
    },
}

impl ToolCallState {
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Requested { kind }
            | Self::PendingExecuteApproval { kind }
            | Self::Executing { kind, .. }
            | Self::PendingResultsApproval { kind, .. }
            | Self::Released { kind, .. }
            | Self::Denied { kind, .. }
            | Self::Failed { kind, .. } => *kind,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Released { .. } | Self::Denied { .. } | Self::Failed { .. }
        )
    }
}

/// Mutable tracker driving one call through the state machine.
#[derive(Debug, Clone)]
pub struct ToolCallTracker {
    state: ToolCallState,
}

impl ToolCallTracker {
    pub fn new(kind: ToolKind) -> Self {
        Self {
            state: ToolCallState::Requested { kind },
        }
    }

    pub fn state(&self) -> &ToolCallState {
        &self.state
    }

    /// Requested -> PendingExecuteApproval.
    pub fn mark_pending_execute(&mut self) {
        if let ToolCallState::Requested { kind } = self.state {
            self.state = ToolCallState::PendingExecuteApproval { kind };
        }
    }

    /// PendingExecuteApproval -> Executing.
    pub fn mark_executing(&mut self) {
        if let ToolCallState::PendingExecuteApproval { kind } = self.state {
            self.state = ToolCallState::Executing {
                kind,
                started_at: current_timestamp(),
            };
        }
    }

    /// Executing -> PendingResultsApproval. Shown even for an empty
    /// candidate list; there is no silent auto-release.
    pub fn mark_pending_results(&mut self, candidate_count: usize) {
        if let ToolCallState::Executing { kind, started_at } = self.state {
            self.state = ToolCallState::PendingResultsApproval {
                kind,
                started_at,
                candidate_count,
            };
        }
    }

    /// PendingResultsApproval -> Released.
    pub fn mark_released(&mut self, released_count: usize) {
        if let ToolCallState::PendingResultsApproval {
            kind, started_at, ..
        } = self.state
        {
            self.state = ToolCallState::Released {
                kind,
                released_count,
                duration_ms: current_timestamp().saturating_sub(started_at),
            };
        }
    }

    /// Either pending state -> Denied.
    pub fn mark_denied(&mut self) {
        match self.state {
            ToolCallState::PendingExecuteApproval { kind } => {
                self.state = ToolCallState::Denied {
                    kind,
                    at: GateStage::Execute,
                };
            }
            ToolCallState::PendingResultsApproval { kind, .. } => {
                self.state = ToolCallState::Denied {
                    kind,
                    at: GateStage::Results,
                };
            }
            _ => {}
        }
    }

    /// Executing -> Failed.
    pub fn mark_failed(&mut self, error_kind: ExecutionErrorKind) {
        if let ToolCallState::Executing { kind, .. } = self.state {
            self.state = ToolCallState::Failed { kind, error_kind };
        }
    }
}

fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_to_released() {
        let mut tracker = ToolCallTracker::new(ToolKind::CorpusSearch);
        tracker.mark_pending_execute();
        tracker.mark_executing();
        tracker.mark_pending_results(10);
        tracker.mark_released(3);

        match tracker.state() {
            ToolCallState::Released { released_count, .. } => assert_eq!(*released_count, 3),
            other => panic!("expected Released, got {:?}", other),
        }
        assert!(tracker.state().is_terminal());
    }

    #[test]
    fn test_denied_at_execute_gate() {
        let mut tracker = ToolCallTracker::new(ToolKind::FileRead);
        tracker.mark_pending_execute();
        tracker.mark_denied();
        assert!(matches!(
            tracker.state(),
            ToolCallState::Denied {
                at: GateStage::Execute,
                ..
            }
        ));
    }

    #[test]
    fn test_denied_at_results_gate() {
        let mut tracker = ToolCallTracker::new(ToolKind::WebSearch);
        tracker.mark_pending_execute();
        tracker.mark_executing();
        tracker.mark_pending_results(0);
        tracker.mark_denied();
        assert!(matches!(
            tracker.state(),
            ToolCallState::Denied {
                at: GateStage::Results,
                ..
            }
        ));
    }

    #[test]
    fn test_failed_from_executing() {
        let mut tracker = ToolCallTracker::new(ToolKind::FileRead);
        tracker.mark_pending_execute();
        tracker.mark_executing();
        tracker.mark_failed(ExecutionErrorKind::PathDenied);
        assert!(matches!(
            tracker.state(),
            ToolCallState::Failed {
                error_kind: ExecutionErrorKind::PathDenied,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let mut tracker = ToolCallTracker::new(ToolKind::CorpusSearch);
        // Cannot execute before the gate was presented.
        tracker.mark_executing();
        assert!(matches!(tracker.state(), ToolCallState::Requested { .. }));

        // Cannot release out of a terminal state.
        tracker.mark_pending_execute();
        tracker.mark_denied();
        tracker.mark_released(1);
        assert!(matches!(tracker.state(), ToolCallState::Denied { .. }));
    }

    #[test]
    fn test_kind_preserved_across_states() {
        let mut tracker = ToolCallTracker::new(ToolKind::WebSearch);
        tracker.mark_pending_execute();
        tracker.mark_executing();
        assert_eq!(tracker.state().kind(), ToolKind::WebSearch);
    }
}
