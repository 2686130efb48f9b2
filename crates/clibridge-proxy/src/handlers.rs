//! Route handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chrono::Utc;
use clibridge_core::{CompletionResponse, ProxyError, compose_prompt};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::models::{
    ChatCompletionRequest, ChatCompletionResponse, HealthResponse, ModelsResponse,
};
use crate::server::AppState;
use crate::stream::completion_sse;

/// Handle chat completions: compose the prompt, run the backend once and
/// answer either with a complete response or an SSE stream.
pub(crate) async fn chat_completions(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    debug!("POST /v1/chat/completions");

    // Read and parsed by hand so any bad body gets the OpenAI error shape.
    let body = body.map_err(|e| {
        warn!("Failed to read request body: {e}");
        ProxyError::internal(format!("Invalid request body: {e}"))
    })?;
    let request: ChatCompletionRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Failed to parse request: {e}");
        ProxyError::internal(format!("Invalid request body: {e}"))
    })?;
    let request = request.into_generation_request();
    let prompt = compose_prompt(&request.conversation);

    info!(
        model = %request.model,
        streaming = request.stream,
        messages = request.conversation.len(),
        "Processing chat completion request"
    );
    debug!(
        temperature = request.temperature,
        max_tokens = request.max_tokens,
        "Sampling parameters are not passed to the backend"
    );

    let limit = state.settings().timeouts.for_mode(request.stream);

    if request.stream {
        return Ok(completion_sse(state, request.model, prompt, limit).into_response());
    }

    let output = state.generate(&request.model, &prompt, limit).await?;
    let completion = CompletionResponse::from_output(request.model, &prompt, &output);
    Ok(Json(ChatCompletionResponse::from(completion)).into_response())
}

/// List the configured model catalog in OpenAI format.
pub(crate) async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    debug!("GET /v1/models");
    let settings = state.settings();
    Json(ModelsResponse::from_catalog(
        &settings.models,
        &settings.owned_by,
        Utc::now().timestamp(),
    ))
}

/// Health check: the proxy is healthy when the backend answers its
/// version probe in time.
pub(crate) async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let limit = state.settings().timeouts.probe;
    match state.backend().probe(limit).await {
        Ok(version) => Json(HealthResponse::healthy(version)),
        Err(e) => {
            warn!(error = %e, "Backend probe failed");
            Json(HealthResponse::degraded())
        }
    }
}
