//! Editor port: the document surface streamed text is flushed into.
//!
//! The core never parses or formats document markup; it only asks for
//! cursor/selection positions and inserts plain text at offsets.

use std::sync::Mutex;

/// A selection range in the document, as character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

/// Port over the host document/editor.
///
/// Offsets are character positions. `insert_text_at` returns the
/// position immediately after the inserted text, which tracked-offset
/// streaming uses to chain flushes.
pub trait EditorPort: Send + Sync {
    fn cursor(&self) -> usize;

    fn selection(&self) -> Option<Selection>;

    fn insert_text_at(&self, position: usize, text: &str) -> usize;
}

/// In-memory editor used in tests and headless runs.
pub struct MemoryEditor {
    state: Mutex<MemoryEditorState>,
}

struct MemoryEditorState {
    content: String,
    cursor: usize,
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self::with_content("", 0)
    }

    pub fn with_content(content: impl Into<String>, cursor: usize) -> Self {
        let content = content.into();
        let cursor = cursor.min(content.chars().count());
        Self {
            state: Mutex::new(MemoryEditorState { content, cursor }),
        }
    }

    pub fn content(&self) -> String {
        self.state.lock().expect("editor lock poisoned").content.clone()
    }

    /// Move the cursor, simulating the user clicking elsewhere while a
    /// stream is in flight.
    pub fn set_cursor(&self, position: usize) {
        let mut state = self.state.lock().expect("editor lock poisoned");
        state.cursor = position.min(state.content.chars().count());
    }
}

impl Default for MemoryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorPort for MemoryEditor {
    fn cursor(&self) -> usize {
        self.state.lock().expect("editor lock poisoned").cursor
    }

    fn selection(&self) -> Option<Selection> {
        None
    }

    fn insert_text_at(&self, position: usize, text: &str) -> usize {
        let mut state = self.state.lock().expect("editor lock poisoned");
        let char_count = state.content.chars().count();
        let position = position.min(char_count);
        let byte_index = state
            .content
            .char_indices()
            .nth(position)
            .map(|(i, _)| i)
            .unwrap_or(state.content.len());
        state.content.insert_str(byte_index, text);
        let new_position = position + text.chars().count();
        if state.cursor >= position {
            state.cursor += text.chars().count();
        }
        new_position
    }
}
