//! Serve command handler.
//!
//! Wires the CLI backend into the proxy and runs it until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use clibridge_core::{GenerationBackend, validate_settings};
use clibridge_proxy::{AppState, serve};
use clibridge_runtime::CliBackend;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::commands::ServeArgs;
use crate::error::CliError;

/// Execute the serve command.
pub async fn execute(args: ServeArgs) -> Result<(), CliError> {
    let settings = args.to_settings();
    let config = args.backend.to_config();
    validate_settings(&settings, &config)?;

    let backend = Arc::new(CliBackend::new(config));
    log_backend_availability(backend.as_ref(), settings.timeouts.probe).await;

    let addr = settings.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| CliError::Io(format!("Failed to bind {addr}: {e}")))?;

    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let state = AppState::new(backend, settings);
    serve(listener, state, cancel)
        .await
        .map_err(|e| CliError::Server(format!("{e:#}")))
}

/// Probe the backend once so a missing CLI shows up in the logs at startup.
///
/// Not fatal: the backend may be installed or started after the proxy.
async fn log_backend_availability(backend: &CliBackend, limit: Duration) {
    let program = backend.config().program_name();
    match backend.probe(limit).await {
        Ok(version) => info!(backend = %program, version = %version, "Backend CLI available"),
        Err(e) => warn!(backend = %program, error = %e, "Backend CLI not available"),
    }
}

fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown requested, draining in-flight requests");
                cancel.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });
}
