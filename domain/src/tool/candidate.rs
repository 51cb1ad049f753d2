//! Candidate results produced by a local capability execution.
//!
//! A [`CandidateResult`] carries both the bounded `preview` shown in the
//! results gate and the full `raw` payload. The raw payload is never
//! serialized toward the model until its id appears in an approved
//! results decision; release strips the preview-only fields.

use crate::util::truncate_chars;
use serde::{Deserialize, Serialize};

/// One item a tool execution found: a vault file or a web page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    /// Path or URL, unique within one call's result set.
    pub id: String,
    /// Display title (file basename or page title).
    pub title: String,
    /// Bounded excerpt shown to the user in the results gate.
    pub preview: String,
    /// Full payload, released only on explicit approval.
    pub raw: String,
}

impl CandidateResult {
    /// Build a candidate whose preview is derived from the raw payload,
    /// clamped to `preview_chars`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        raw: impl Into<String>,
        preview_chars: usize,
    ) -> Self {
        let raw = raw.into();
        let preview = truncate_chars(&raw, preview_chars);
        Self {
            id: id.into(),
            title: title.into(),
            preview,
            raw,
        }
    }

    /// Build a candidate with an explicit preview (e.g. the matching
    /// line of a content search), still clamped to `preview_chars`.
    pub fn with_preview(
        id: impl Into<String>,
        title: impl Into<String>,
        preview: &str,
        raw: impl Into<String>,
        preview_chars: usize,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            preview: truncate_chars(preview, preview_chars),
            raw: raw.into(),
        }
    }

    /// Re-clamp the preview. Used by the registry to enforce the cap
    /// independently of executor behavior.
    pub fn clamp_preview(&mut self, preview_chars: usize) {
        if self.preview.chars().count() > preview_chars {
            self.preview = truncate_chars(&self.preview, preview_chars);
        }
    }

    /// The released form: id and raw payload only.
    pub fn release(&self) -> ReleasedResult {
        ReleasedResult {
            id: self.id.clone(),
            raw: self.raw.clone(),
        }
    }
}

/// The approved payload that crosses the trust boundary, tagged with
/// its id and stripped of preview-only fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleasedResult {
    pub id: String,
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_derived_and_bounded() {
        let raw = "x".repeat(500);
        let c = CandidateResult::new("notes/a.md", "a", raw.clone(), 200);
        assert!(c.preview.chars().count() <= 200);
        assert_eq!(c.raw, raw);
    }

    #[test]
    fn test_explicit_preview_bounded() {
        let c = CandidateResult::with_preview(
            "notes/a.md",
            "a",
            &"match line ".repeat(100),
            "full content",
            200,
        );
        assert!(c.preview.chars().count() <= 200);
        assert_eq!(c.raw, "full content");
    }

    #[test]
    fn test_release_strips_preview() {
        let c = CandidateResult::new("notes/a.md", "a", "full content", 200);
        let released = c.release();
        assert_eq!(released.id, "notes/a.md");
        assert_eq!(released.raw, "full content");
        let json = serde_json::to_string(&released).unwrap();
        assert!(!json.contains("preview"));
        assert!(!json.contains("title"));
    }

    #[test]
    fn test_clamp_preview_is_idempotent_when_short() {
        let mut c = CandidateResult::new("id", "t", "short", 200);
        let before = c.preview.clone();
        c.clamp_preview(200);
        assert_eq!(c.preview, before);
    }
}
