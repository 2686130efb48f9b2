//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from core errors to exit codes and user-facing messages.

use clibridge_core::{InvocationError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (bind failure, signal setup, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// The backend CLI is missing or not answering.
    #[error("Backend unavailable: {0}")]
    Backend(String),

    /// The server stopped with an error.
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,  // EX_CONFIG
            Self::Io(_) => 74,      // EX_IOERR
            Self::Backend(_) => 69, // EX_UNAVAILABLE
            Self::Server(_) => 1,
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<InvocationError> for CliError {
    fn from(err: InvocationError) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
