//! Turn configuration.

use scribe_domain::ResultCaps;
use std::time::Duration;

use crate::ports::capability::DEFAULT_MAX_CONCURRENT;

/// Default bound on model rounds within one turn.
pub const DEFAULT_MAX_ROUNDS: usize = 5;

/// Default streaming flush cadence.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(50);

/// Where streamed text lands in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    /// Every flush inserts at the live cursor position, following the
    /// user as they move around the document.
    #[default]
    AtCursor,
    /// The first flush inserts at the starting cursor position; later
    /// flushes chain off the end of the previous insert, so the
    /// response stays contiguous even if the user moves the cursor.
    TrackedOffset,
}

/// Tunables for one turn of the agent.
#[derive(Debug, Clone)]
pub struct TurnConfig {
    /// Maximum model rounds per turn (user message plus tool-outcome
    /// follow-ups). Exceeding it terminates the turn with a round-limit
    /// error instead of another model call.
    pub max_rounds: usize,
    /// How often buffered stream text is flushed into the editor.
    pub flush_interval: Duration,
    pub insert_mode: InsertMode,
    /// Result-count and preview caps applied to every capability.
    pub caps: ResultCaps,
    /// Bound on concurrently running capability executions.
    pub max_concurrent_tools: usize,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            insert_mode: InsertMode::default(),
            caps: ResultCaps::default(),
            max_concurrent_tools: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl TurnConfig {
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    pub fn with_insert_mode(mut self, mode: InsertMode) -> Self {
        self.insert_mode = mode;
        self
    }

    pub fn with_caps(mut self, caps: ResultCaps) -> Self {
        self.caps = caps.clamped();
        self
    }

    pub fn with_max_concurrent_tools(mut self, limit: usize) -> Self {
        self.max_concurrent_tools = limit.max(1);
        self
    }
}
