//! Normalized streaming events for one model call.
//!
//! Provider adapters translate their wire formats (SSE chunks, JSON
//! deltas) into this single internal shape at the gateway boundary, so
//! the turn loop never sees provider-specific response types.

use crate::tool::request::ToolRequest;

/// An event in a streaming model response.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A text chunk to be flushed into the document.
    TextDelta(String),
    /// A fully-assembled tool call request.
    ToolCallRequest(ToolRequest),
    /// The model finished this call (terminal).
    Completed,
    /// The stream failed (terminal). Message is already sanitized by
    /// the gateway adapter.
    Error(String),
}

impl StreamEvent {
    /// Returns the text content for delta events.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::TextDelta(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed | StreamEvent::Error(_))
    }
}
