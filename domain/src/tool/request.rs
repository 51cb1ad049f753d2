//! Tool call requests emitted by the model.
//!
//! A [`ToolRequest`] is immutable once received: it is created when the
//! model's streaming response carries a tool call, consumed exactly once
//! by the orchestration pipeline, and never reused.

use serde::{Deserialize, Serialize};

/// Opaque identifier correlating a tool call with its outcome.
///
/// Assigned by the model provider; the pipeline treats it as an opaque
/// string and only requires uniqueness within a turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(String);

impl CallId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<String>> From<T> for CallId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

/// The fixed set of tool kinds the agent may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Full-text or name search over the private vault.
    CorpusSearch,
    /// Web search through an external API.
    WebSearch,
    /// Read one specific file inside the vault.
    FileRead,
}

impl ToolKind {
    pub fn as_str(&self) -> &str {
        match self {
            ToolKind::CorpusSearch => "corpus_search",
            ToolKind::WebSearch => "web_search",
            ToolKind::FileRead => "read_file",
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which part of the vault a corpus search inspects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Match against file contents.
    #[default]
    Content,
    /// Match against file names only.
    Names,
}

/// Kind-specific, validated parameters for one tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolParams {
    CorpusSearch {
        query: String,
        #[serde(default)]
        scope: SearchScope,
    },
    WebSearch {
        query: String,
    },
    FileRead {
        path: String,
    },
}

impl ToolParams {
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolParams::CorpusSearch { .. } => ToolKind::CorpusSearch,
            ToolParams::WebSearch { .. } => ToolKind::WebSearch,
            ToolParams::FileRead { .. } => ToolKind::FileRead,
        }
    }

    /// One-line description of the request, shown in the execute gate.
    pub fn describe(&self) -> String {
        match self {
            ToolParams::CorpusSearch { query, scope } => match scope {
                SearchScope::Content => format!("search vault contents for \"{}\"", query),
                SearchScope::Names => format!("search vault file names for \"{}\"", query),
            },
            ToolParams::WebSearch { query } => format!("search the web for \"{}\"", query),
            ToolParams::FileRead { path } => format!("read vault file \"{}\"", path),
        }
    }
}

/// A single tool call request from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Provider-assigned correlation id.
    pub call_id: CallId,
    /// Validated, kind-specific parameters.
    pub params: ToolParams,
}

impl ToolRequest {
    pub fn new(call_id: impl Into<CallId>, params: ToolParams) -> Self {
        Self {
            call_id: call_id.into(),
            params,
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.params.kind()
    }
}
