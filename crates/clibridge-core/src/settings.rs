//! Settings domain types and validation.
//!
//! Configuration is built once at startup (from CLI flags and environment)
//! and handed to the backend and proxy by value. Nothing reads or mutates
//! the process environment after that.

use std::path::PathBuf;
use std::time::Duration;

/// Model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "gpt-oss:20b";

/// Sampling temperature applied when a request omits it.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Token limit applied when a request omits it.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Default bind address for the proxy server.
pub const DEFAULT_PROXY_HOST: &str = "0.0.0.0";

/// Default port for the OpenAI-compatible proxy server.
pub const DEFAULT_PROXY_PORT: u16 = 8080;

/// Largest accepted request body (64 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Models advertised by `GET /v1/models` unless overridden.
pub const DEFAULT_CATALOG: &[&str] = &["gpt-oss:20b", "gpt-oss:120b"];

/// Owner reported for catalog entries.
pub const DEFAULT_OWNED_BY: &str = "ollama";

/// How to launch the generation backend.
///
/// The command line is `<program> <subcommand> <model> <extra_args...>`
/// with the prompt written to stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Backend executable (looked up on `PATH` when not absolute).
    pub program: PathBuf,
    /// Subcommand placed before the model name.
    pub subcommand: String,
    /// Flags appended after the model name.
    pub extra_args: Vec<String>,
    /// Environment variable naming the backend host.
    pub host_env: String,
    /// Backend host; set on the child only, never on this process.
    pub host: Option<String>,
    /// Argument that makes the backend print its version.
    pub version_arg: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ollama"),
            subcommand: "run".to_string(),
            extra_args: vec!["--verbose=false".to_string()],
            host_env: "OLLAMA_HOST".to_string(),
            host: Some("ollama.com".to_string()),
            version_arg: "--version".to_string(),
        }
    }
}

impl BackendConfig {
    /// Create a configuration for `program` with the default arguments.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Set the subcommand.
    #[must_use]
    pub fn with_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = subcommand.into();
        self
    }

    /// Replace the flags appended after the model name.
    #[must_use]
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Set (or clear) the backend host.
    #[must_use]
    pub fn with_host(mut self, host: Option<String>) -> Self {
        self.host = host;
        self
    }

    /// Human-readable program name for logs and error messages.
    #[must_use]
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// Per-invocation time budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationTimeouts {
    /// Budget for a single complete response.
    pub completion: Duration,
    /// Budget for the invocation behind a streamed response.
    pub streaming: Duration,
    /// Budget for the health/version probe.
    pub probe: Duration,
}

impl Default for InvocationTimeouts {
    fn default() -> Self {
        Self {
            completion: Duration::from_secs(60),
            streaming: Duration::from_secs(30),
            probe: Duration::from_secs(5),
        }
    }
}

impl InvocationTimeouts {
    /// Budget for an invocation in the given delivery mode.
    #[must_use]
    pub const fn for_mode(&self, stream: bool) -> Duration {
        if stream { self.streaming } else { self.completion }
    }
}

/// Proxy server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to (0 for auto-assign).
    pub port: u16,
    /// Per-invocation time budgets.
    pub timeouts: InvocationTimeouts,
    /// Maximum simultaneous backend invocations (0 = unlimited).
    pub max_concurrent: usize,
    /// Largest request body accepted by the completion endpoint.
    pub max_body_bytes: usize,
    /// Model ids advertised by the catalog endpoint.
    pub models: Vec<String>,
    /// Owner reported for catalog entries.
    pub owned_by: String,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_PROXY_HOST.to_string(),
            port: DEFAULT_PROXY_PORT,
            timeouts: InvocationTimeouts::default(),
            max_concurrent: 0,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            models: DEFAULT_CATALOG.iter().map(ToString::to_string).collect(),
            owned_by: DEFAULT_OWNED_BY.to_string(),
        }
    }
}

impl ProxySettings {
    /// Address string suitable for binding a listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{name} timeout must be greater than zero")]
    ZeroTimeout { name: &'static str },

    #[error("Backend program cannot be empty")]
    EmptyProgram,

    #[error("Model catalog cannot be empty")]
    EmptyCatalog,

    #[error("Bind host cannot be empty")]
    EmptyHost,

    #[error("Request body limit must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate proxy and backend settings together.
pub fn validate_settings(
    proxy: &ProxySettings,
    backend: &BackendConfig,
) -> Result<(), SettingsError> {
    let timeouts = [
        ("Completion", proxy.timeouts.completion),
        ("Streaming", proxy.timeouts.streaming),
        ("Probe", proxy.timeouts.probe),
    ];
    if let Some((name, _)) = timeouts.iter().find(|(_, d)| d.is_zero()) {
        return Err(SettingsError::ZeroTimeout { name: *name });
    }

    if backend.program.as_os_str().is_empty() {
        return Err(SettingsError::EmptyProgram);
    }

    if proxy.models.iter().all(|m| m.trim().is_empty()) {
        return Err(SettingsError::EmptyCatalog);
    }

    if proxy.host.trim().is_empty() {
        return Err(SettingsError::EmptyHost);
    }

    if proxy.max_body_bytes == 0 {
        return Err(SettingsError::ZeroBodyLimit);
    }

    Ok(())
}
