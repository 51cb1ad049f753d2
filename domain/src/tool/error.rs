//! Execution errors raised inside capability executors.
//!
//! The error kind determines what the model is told: outcomes carry the
//! kind plus a canonical sanitized message, never the raw underlying
//! error text. The full [`message`](ExecutionError::message) stays on
//! the local side for notifications and logs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a capability execution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionErrorKind {
    /// The requested path escapes the permitted vault root.
    PathDenied,
    /// The requested resource does not exist.
    NotFound,
    /// The call's parameters were missing or malformed.
    InvalidArgument,
    /// Local I/O failure (unreadable corpus, filesystem error).
    Io,
    /// Network failure while talking to an external API.
    Network,
    /// The operation exceeded its time budget.
    Timeout,
}

impl ExecutionErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ExecutionErrorKind::PathDenied => "PATH_DENIED",
            ExecutionErrorKind::NotFound => "NOT_FOUND",
            ExecutionErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ExecutionErrorKind::Io => "IO_ERROR",
            ExecutionErrorKind::Network => "NETWORK_ERROR",
            ExecutionErrorKind::Timeout => "TIMEOUT",
        }
    }

    /// Canonical message safe to serialize toward the model.
    pub fn sanitized_message(&self) -> &str {
        match self {
            ExecutionErrorKind::PathDenied => "path is outside the permitted root",
            ExecutionErrorKind::NotFound => "resource not found",
            ExecutionErrorKind::InvalidArgument => "invalid tool arguments",
            ExecutionErrorKind::Io => "local I/O failure",
            ExecutionErrorKind::Network => "network failure",
            ExecutionErrorKind::Timeout => "operation timed out",
        }
    }
}

impl std::fmt::Display for ExecutionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error produced by a capability executor.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("[{kind}] {message}")]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    /// Detailed message for local display and logging only.
    pub message: String,
}

impl ExecutionError {
    pub fn new(kind: ExecutionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn path_denied(path: impl Into<String>) -> Self {
        Self::new(
            ExecutionErrorKind::PathDenied,
            format!("access denied: {}", path.into()),
        )
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ExecutionErrorKind::NotFound,
            format!("not found: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ExecutionErrorKind::InvalidArgument, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ExecutionErrorKind::Io, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ExecutionErrorKind::Network, message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            ExecutionErrorKind::Timeout,
            format!("timed out: {}", operation.into()),
        )
    }

    /// Message suitable for the model-facing failure outcome.
    pub fn sanitized_message(&self) -> &str {
        self.kind.sanitized_message()
    }
}
