//! Vault file read capability.
//!
//! Reads exactly one file inside the vault root. Absolute paths and any
//! path containing a parent-directory component are rejected before any
//! filesystem access happens.

use async_trait::async_trait;
use scribe_application::ports::capability::{CapabilityOutput, CapabilityPort};
use scribe_domain::{CandidateResult, ExecutionError, ResultCaps, ToolKind, ToolParams};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Maximum file size to read (10 MB)
const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

pub struct VaultFileRead {
    root: PathBuf,
}

impl VaultFileRead {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Reject anything that could point outside the vault root. The check
/// is purely lexical, so it fires before touching the filesystem.
fn ensure_vault_relative(path: &str) -> Result<(), ExecutionError> {
    let p = Path::new(path);
    if p.is_absolute() {
        return Err(ExecutionError::path_denied(format!(
            "absolute path rejected: {}",
            path
        )));
    }
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ExecutionError::path_denied(format!(
            "parent-directory traversal rejected: {}",
            path
        )));
    }
    Ok(())
}

#[async_trait]
impl CapabilityPort for VaultFileRead {
    fn kind(&self) -> ToolKind {
        ToolKind::FileRead
    }

    async fn execute(
        &self,
        params: &ToolParams,
        caps: &ResultCaps,
    ) -> Result<CapabilityOutput, ExecutionError> {
        let path = match params {
            ToolParams::FileRead { path } => path,
            other => {
                return Err(ExecutionError::invalid_argument(format!(
                    "file read received {} parameters",
                    other.kind()
                )));
            }
        };
        ensure_vault_relative(path)?;

        let full = self.root.join(path);
        let metadata = fs::metadata(&full).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ExecutionError::not_found(format!("no such vault file: {}", path))
            } else {
                ExecutionError::io(e.to_string())
            }
        })?;
        if !metadata.is_file() {
            return Err(ExecutionError::not_found(format!(
                "not a regular file: {}",
                path
            )));
        }
        if metadata.len() > MAX_READ_SIZE {
            return Err(ExecutionError::invalid_argument(format!(
                "file exceeds {} byte read limit",
                MAX_READ_SIZE
            )));
        }

        let raw = fs::read_to_string(&full).map_err(|e| ExecutionError::io(e.to_string()))?;
        debug!(path = %path, bytes = raw.len(), "vault file read");

        let title = Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        let candidate = CandidateResult::new(path.clone(), title, raw, caps.preview_chars);
        Ok(CapabilityOutput::new(vec![candidate], 1))
    }
}
