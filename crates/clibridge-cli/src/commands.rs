//! Subcommand definitions and their conversion into settings.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};
use clibridge_core::{
    BackendConfig, DEFAULT_CATALOG, DEFAULT_MAX_BODY_BYTES, DEFAULT_OWNED_BY, InvocationTimeouts,
    ProxySettings,
};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the OpenAI-compatible proxy server
    Serve(ServeArgs),

    /// Check that the backend CLI is installed and answering
    Check(BackendArgs),
}

/// How to reach and run the backend CLI.
#[derive(Debug, Clone, Args)]
pub struct BackendArgs {
    /// Backend executable
    #[arg(long = "backend", env = "CLIBRIDGE_BACKEND", default_value = "ollama")]
    pub program: PathBuf,

    /// Subcommand placed before the model name
    #[arg(long = "backend-subcommand", default_value = "run")]
    pub subcommand: String,

    /// Extra flag appended after the model name (repeatable, use --backend-arg=VALUE)
    #[arg(
        long = "backend-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        default_values = ["--verbose=false"]
    )]
    pub extra_args: Vec<String>,

    /// Backend host, exported to the backend process only (empty to leave unset)
    #[arg(id = "backend_host", long = "backend-host", env = "OLLAMA_HOST", default_value = "ollama.com")]
    pub host: String,

    /// Seconds allowed for the backend version probe
    #[arg(long = "probe-timeout", default_value = "5")]
    pub probe_timeout: u64,
}

impl BackendArgs {
    pub fn to_config(&self) -> BackendConfig {
        let host = self.host.trim();
        BackendConfig::new(self.program.clone())
            .with_subcommand(self.subcommand.clone())
            .with_extra_args(self.extra_args.clone())
            .with_host((!host.is_empty()).then(|| host.to_string()))
    }

    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout)
    }
}

/// Options for `clibridge serve`.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long, env = "CLIBRIDGE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the proxy to
    #[arg(short, long, env = "CLIBRIDGE_PORT", default_value = "8080")]
    pub port: u16,

    /// Seconds allowed for a non-streamed completion
    #[arg(long = "completion-timeout", default_value = "60")]
    pub completion_timeout: u64,

    /// Seconds allowed for the backend run behind a streamed completion
    #[arg(long = "stream-timeout", default_value = "30")]
    pub stream_timeout: u64,

    /// Maximum simultaneous backend processes (0 = unlimited)
    #[arg(long = "max-concurrent", default_value = "0")]
    pub max_concurrent: usize,

    /// Largest accepted request body, in bytes
    #[arg(long = "max-body-bytes", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Model id advertised by /v1/models (repeatable; defaults to the built-in catalog)
    #[arg(long = "model", value_name = "ID")]
    pub models: Vec<String>,

    /// Owner reported for advertised models
    #[arg(long = "owned-by", default_value = DEFAULT_OWNED_BY)]
    pub owned_by: String,

    #[command(flatten)]
    pub backend: BackendArgs,
}

impl ServeArgs {
    pub fn to_settings(&self) -> ProxySettings {
        let models = if self.models.is_empty() {
            DEFAULT_CATALOG.iter().map(ToString::to_string).collect()
        } else {
            self.models.clone()
        };

        ProxySettings {
            host: self.host.clone(),
            port: self.port,
            timeouts: InvocationTimeouts {
                completion: Duration::from_secs(self.completion_timeout),
                streaming: Duration::from_secs(self.stream_timeout),
                probe: self.backend.probe_timeout(),
            },
            max_concurrent: self.max_concurrent,
            max_body_bytes: self.max_body_bytes,
            models,
            owned_by: self.owned_by.clone(),
        }
    }
}
