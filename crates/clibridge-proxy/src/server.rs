//! Axum HTTP server for the OpenAI-compatible proxy.
//!
//! This module provides the router and the `serve()` function that runs
//! the proxy using a pre-bound `TcpListener`.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use clibridge_core::{GenerationBackend, ProxyError, ProxySettings};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::admission::Admission;
use crate::handlers::{chat_completions, health_check, list_models};

/// Shared application state for the proxy server.
#[derive(Clone)]
pub struct AppState {
    /// Backend that turns a prompt into text.
    backend: Arc<dyn GenerationBackend>,
    /// Read-only proxy settings.
    settings: Arc<ProxySettings>,
    /// Bound on simultaneous backend invocations.
    admission: Admission,
}

impl AppState {
    pub fn new(backend: Arc<dyn GenerationBackend>, settings: ProxySettings) -> Self {
        let admission = Admission::new(settings.max_concurrent);
        Self {
            backend,
            settings: Arc::new(settings),
            admission,
        }
    }

    pub fn settings(&self) -> &ProxySettings {
        &self.settings
    }

    pub(crate) fn backend(&self) -> &dyn GenerationBackend {
        self.backend.as_ref()
    }

    /// Run one admitted backend invocation and classify its outcome.
    pub(crate) async fn generate(
        &self,
        model: &str,
        prompt: &str,
        limit: Duration,
    ) -> Result<String, ProxyError> {
        let _permit = self.admission.acquire().await?;
        self.backend
            .generate(model, prompt, limit)
            .await
            .map_err(ProxyError::from)
    }
}

/// Build the proxy router.
///
/// Bodies above `max_body_bytes` are refused inside the completion handler
/// so the client still gets an OpenAI-shaped error.
pub fn create_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.settings().max_body_bytes);
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/models", get(list_models))
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(state)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
}

/// Start the proxy server with a pre-bound listener.
///
/// Runs until the cancellation token is triggered, then stops accepting
/// connections and lets in-flight requests finish.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!("Proxy server starting on {addr}");

    let app = create_router(state);

    info!("OpenAI endpoint: http://{addr}/v1/chat/completions");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("Proxy server shut down");
    Ok(())
}
