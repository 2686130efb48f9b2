//! Error types for backend invocation and the proxy error taxonomy.
//!
//! [`InvocationError`] is what a backend adapter signals. [`ProxyError`] is
//! what callers of the proxy see: every failure path, whatever its origin,
//! resolves to exactly one of the three [`ErrorKind`]s.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure signaled by a backend invocation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationError {
    /// The backend did not finish within the allotted duration.
    #[error("backend invocation timed out")]
    Timeout,

    /// The backend executable could not be started.
    #[error("failed to launch backend `{program}`: {reason}")]
    Launch { program: String, reason: String },

    /// The backend ran but exited with a non-zero status.
    #[error("backend exited with status {status}: {stderr}")]
    Process { status: i32, stderr: String },

    /// Pipe or wait failure while the backend was running.
    #[error("backend I/O error: {0}")]
    Io(String),
}

/// Stable classification of proxy failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The backend ran but failed.
    CliError,
    /// The backend exceeded its time budget.
    TimeoutError,
    /// Anything else: malformed input, launch failure, internal fault.
    InternalError,
}

impl ErrorKind {
    /// HTTP-style status code for this kind.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::CliError | Self::InternalError => 500,
            Self::TimeoutError => 504,
        }
    }

    /// Wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CliError => "cli_error",
            Self::TimeoutError => "timeout_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, user-facing proxy failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ProxyError {
    /// Human-readable message, includes backend stderr when available.
    pub message: String,
    pub kind: ErrorKind,
}

impl ProxyError {
    /// The backend exited with a failing status.
    #[must_use]
    pub fn cli(stderr: &str) -> Self {
        Self {
            message: format!("Backend CLI error: {stderr}"),
            kind: ErrorKind::CliError,
        }
    }

    /// The backend exceeded its time budget.
    #[must_use]
    pub fn timeout() -> Self {
        Self {
            message: "Request timed out".to_string(),
            kind: ErrorKind::TimeoutError,
        }
    }

    /// Any other failure.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::InternalError,
        }
    }

    /// HTTP-style status code derived from the kind.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.kind.code()
    }
}

impl From<InvocationError> for ProxyError {
    fn from(err: InvocationError) -> Self {
        match err {
            InvocationError::Process { stderr, .. } => Self::cli(&stderr),
            InvocationError::Timeout => Self::timeout(),
            InvocationError::Launch { program, reason } => {
                Self::internal(format!("Failed to launch backend `{program}`: {reason}"))
            }
            InvocationError::Io(msg) => Self::internal(format!("Backend I/O error: {msg}")),
        }
    }
}
