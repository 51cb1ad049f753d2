//! Domain layer for scribe-agent
//!
//! This crate contains the core entities and value objects of the
//! consent pipeline. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Consent gates
//!
//! Every tool call passes two human gates before anything reaches the
//! model: an **execute gate** ("may this tool run at all") and a
//! **results gate** ("which of the computed items may be released").
//! The [`ToolOutcome`] built from those decisions is the only artifact
//! that crosses the trust boundary.
//!
//! ## Bounded results
//!
//! [`ResultCaps`] clamps how many candidates one call may return and
//! how long their previews may be; truncation is silent but the outcome
//! records the true count.

pub mod core;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use crate::core::caps::{
    DEFAULT_MAX_RESULTS, DEFAULT_PREVIEW_CHARS, HARD_MAX_RESULTS, ResultCaps,
};
pub use session::stream::StreamEvent;
pub use tool::{
    call_state::{GateStage, ToolCallState, ToolCallTracker},
    candidate::{CandidateResult, ReleasedResult},
    decision::{ExecuteDecision, ResultsDecision},
    error::{ExecutionError, ExecutionErrorKind},
    outcome::{OutcomePayload, ToolOutcome},
    request::{CallId, SearchScope, ToolKind, ToolParams, ToolRequest},
    selection::ResultSelector,
};
