//! Result bounds applied to every capability execution.

use serde::{Deserialize, Serialize};

/// Hard upper bound on returned results, regardless of configuration.
pub const HARD_MAX_RESULTS: usize = 50;

/// Default number of results returned per call.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Default character cap on candidate previews.
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Configurable bounds on what one tool call may produce.
///
/// Applied by the capability registry to every executor's output:
/// the candidate list is silently truncated to `max_results` (the
/// outcome still records the true count) and every preview is clamped
/// to `preview_chars`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCaps {
    pub max_results: usize,
    pub preview_chars: usize,
}

impl Default for ResultCaps {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl ResultCaps {
    pub fn new(max_results: usize, preview_chars: usize) -> Self {
        Self {
            max_results,
            preview_chars,
        }
        .clamped()
    }

    /// Enforce the hard bounds: at least one result, never more than
    /// [`HARD_MAX_RESULTS`], and a non-zero preview budget.
    pub fn clamped(self) -> Self {
        Self {
            max_results: self.max_results.clamp(1, HARD_MAX_RESULTS),
            preview_chars: self.preview_chars.max(1),
        }
    }
}
