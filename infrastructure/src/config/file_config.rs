//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application-layer
//! settings through [`FileConfig::turn_config`] and friends.
//!
//! Example configuration:
//!
//! ```toml
//! [vault]
//! root = "~/notes"
//!
//! [tools]
//! max_results = 10
//! preview_chars = 200
//!
//! [turn]
//! max_rounds = 5
//! insert_mode = "tracked_offset"
//!
//! [approvals]
//! mode = "interactive"
//! ```

use scribe_application::config::{InsertMode, TurnConfig};
use scribe_domain::{ResultCaps, HARD_MAX_RESULTS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Vault location
    pub vault: FileVaultConfig,
    /// Tool execution settings
    pub tools: FileToolsConfig,
    /// Turn loop settings
    pub turn: FileTurnConfig,
    /// Approval surface settings
    pub approvals: FileApprovalsConfig,
}

/// `[vault]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVaultConfig {
    /// Root directory of the searchable corpus.
    pub root: String,
}

impl Default for FileVaultConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
        }
    }
}

/// `[tools]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Candidate cap per execution (clamped to the hard maximum).
    pub max_results: usize,
    /// Preview length in characters.
    pub preview_chars: usize,
    /// Concurrent capability executions.
    pub max_concurrent: usize,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        let caps = ResultCaps::default();
        Self {
            max_results: caps.max_results,
            preview_chars: caps.preview_chars,
            max_concurrent: 4,
        }
    }
}

/// `[turn]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTurnConfig {
    pub max_rounds: usize,
    pub flush_interval_ms: u64,
    /// `"at_cursor"` or `"tracked_offset"`
    pub insert_mode: String,
}

impl Default for FileTurnConfig {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            flush_interval_ms: 50,
            insert_mode: "at_cursor".to_string(),
        }
    }
}

/// How tool calls are approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalMode {
    /// Ask the user at both gates (the normal mode).
    #[default]
    Interactive,
    /// Approve and release everything without asking.
    AutoApprove,
    /// Deny everything; tools are effectively off.
    AutoDeny,
}

/// `[approvals]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApprovalsConfig {
    /// `"interactive"`, `"auto_approve"`, or `"auto_deny"`
    pub mode: String,
}

impl Default for FileApprovalsConfig {
    fn default() -> Self {
        Self {
            mode: "interactive".to_string(),
        }
    }
}

impl FileTurnConfig {
    /// Parse the insert mode, returning the fallback and a warning on an
    /// unknown value.
    pub fn parse_insert_mode(&self) -> (InsertMode, Option<String>) {
        match self.insert_mode.as_str() {
            "at_cursor" => (InsertMode::AtCursor, None),
            "tracked_offset" | "tracked" => (InsertMode::TrackedOffset, None),
            other => (
                InsertMode::AtCursor,
                Some(format!(
                    "unknown turn.insert_mode \"{}\", using \"at_cursor\"",
                    other
                )),
            ),
        }
    }
}

impl FileApprovalsConfig {
    pub fn parse_mode(&self) -> (ApprovalMode, Option<String>) {
        match self.mode.as_str() {
            "interactive" => (ApprovalMode::Interactive, None),
            "auto_approve" => (ApprovalMode::AutoApprove, None),
            "auto_deny" => (ApprovalMode::AutoDeny, None),
            other => (
                ApprovalMode::Interactive,
                Some(format!(
                    "unknown approvals.mode \"{}\", using \"interactive\"",
                    other
                )),
            ),
        }
    }
}

impl FileConfig {
    /// Convert the raw file values into a [`TurnConfig`], clamping out
    /// of range values.
    pub fn turn_config(&self) -> TurnConfig {
        let (insert_mode, _) = self.turn.parse_insert_mode();
        TurnConfig::default()
            .with_max_rounds(self.turn.max_rounds)
            .with_flush_interval(Duration::from_millis(self.turn.flush_interval_ms.max(1)))
            .with_insert_mode(insert_mode)
            .with_caps(ResultCaps::new(
                self.tools.max_results,
                self.tools.preview_chars,
            ))
            .with_max_concurrent_tools(self.tools.max_concurrent)
    }

    /// Validate the configuration, returning human-readable warnings.
    /// Nothing here is fatal; every issue has a safe fallback.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let (_, Some(warning)) = self.turn.parse_insert_mode() {
            warnings.push(warning);
        }
        if let (_, Some(warning)) = self.approvals.parse_mode() {
            warnings.push(warning);
        }
        if self.tools.max_results > HARD_MAX_RESULTS {
            warnings.push(format!(
                "tools.max_results {} exceeds the hard maximum {}, clamping",
                self.tools.max_results, HARD_MAX_RESULTS
            ));
        }
        if self.turn.max_rounds == 0 {
            warnings.push("turn.max_rounds must be at least 1, using 1".to_string());
        }
        if self.vault.root.trim().is_empty() {
            warnings.push("vault.root is empty, using the current directory".to_string());
        }
        warnings
    }
}
