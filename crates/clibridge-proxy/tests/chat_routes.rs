//! Integration tests for the proxy routes.
//!
//! The router runs against a scripted backend, so these cover request
//! parsing, response shaping and error mapping without spawning anything.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use clibridge_core::{InvocationError, ProxySettings};
use clibridge_proxy::{AppState, create_router};
use serde_json::{Value, json};

use common::{StubBackend, assert_status, body_json, body_text, get, post_json, router, sse_data};

const HI: &str = r#"{"model":"gpt-oss:20b","messages":[{"role":"user","content":"Hi"}]}"#;
const HI_STREAM: &str =
    r#"{"model":"gpt-oss:20b","stream":true,"messages":[{"role":"user","content":"Hi"}]}"#;

#[tokio::test]
async fn completion_returns_trimmed_backend_output() {
    let backend = Arc::new(StubBackend::replying("Hello there\n"));

    let response = post_json(router(backend.clone()), "/v1/chat/completions", HI).await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["object"], "chat.completion");
    assert_eq!(body["model"], "gpt-oss:20b");
    assert!(body["id"].as_str().unwrap().starts_with("chatcmpl-"));
    assert_eq!(body["choices"][0]["message"]["role"], "assistant");
    assert_eq!(body["choices"][0]["message"]["content"], "Hello there");
    assert_eq!(body["choices"][0]["finish_reason"], "stop");
    assert_eq!(body["usage"]["completion_tokens"], 2);
    assert_eq!(body["usage"]["total_tokens"], 5);

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, "gpt-oss:20b");
    assert_eq!(calls[0].prompt, "User: Hi\n\nAssistant: ");
    assert_eq!(calls[0].timeout, Duration::from_secs(60));
}

#[tokio::test]
async fn empty_body_uses_defaults() {
    let backend = Arc::new(StubBackend::replying("ok"));

    let response = post_json(router(backend.clone()), "/v1/chat/completions", "{}").await;
    assert_status(&response, StatusCode::OK);

    let calls = backend.calls();
    assert_eq!(calls[0].model, "gpt-oss:20b");
    assert_eq!(calls[0].prompt, "Assistant: ");
}

#[tokio::test]
async fn streaming_splits_output_into_ten_char_chunks() {
    let backend = Arc::new(StubBackend::replying("Hello there"));

    let response = post_json(router(backend.clone()), "/v1/chat/completions", HI_STREAM).await;
    assert_status(&response, StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let data = sse_data(&body_text(response).await);
    assert_eq!(data.len(), 4);
    assert_eq!(data[3], "[DONE]");

    let chunks: Vec<Value> = data[..3]
        .iter()
        .map(|d| serde_json::from_str(d).unwrap())
        .collect();
    assert_eq!(chunks[0]["choices"][0]["delta"]["content"], "Hello ther");
    assert_eq!(chunks[1]["choices"][0]["delta"]["content"], "e");
    assert!(chunks[0]["choices"][0]["finish_reason"].is_null());
    assert_eq!(chunks[2]["choices"][0]["delta"], json!({}));
    assert_eq!(chunks[2]["choices"][0]["finish_reason"], "stop");
    assert!(chunks.iter().all(|c| c["object"] == "chat.completion.chunk"));
    assert!(chunks.iter().all(|c| c["id"] == chunks[0]["id"]));

    assert_eq!(backend.calls()[0].timeout, Duration::from_secs(30));
}

#[tokio::test]
async fn streaming_empty_output_sends_only_terminal_chunk() {
    let backend = Arc::new(StubBackend::replying("  \n"));

    let response = post_json(router(backend), "/v1/chat/completions", HI_STREAM).await;
    let data = sse_data(&body_text(response).await);

    assert_eq!(data.len(), 2);
    let terminal: Value = serde_json::from_str(&data[0]).unwrap();
    assert_eq!(terminal["choices"][0]["finish_reason"], "stop");
    assert_eq!(data[1], "[DONE]");
}

#[tokio::test]
async fn backend_failure_is_cli_error() {
    let backend = Arc::new(StubBackend::failing(1, "model not found"));

    let response = post_json(router(backend), "/v1/chat/completions", HI).await;
    assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;

    assert_eq!(body["error"]["type"], "cli_error");
    assert_eq!(body["error"]["code"], 500);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("model not found")
    );
}

#[tokio::test]
async fn backend_timeout_is_gateway_timeout() {
    let backend = Arc::new(StubBackend::timing_out());

    let response = post_json(router(backend), "/v1/chat/completions", HI).await;
    assert_status(&response, StatusCode::GATEWAY_TIMEOUT);
    let body = body_json(response).await;

    assert_eq!(
        body,
        json!({"error": {"message": "Request timed out", "type": "timeout_error", "code": 504}})
    );
}

#[tokio::test]
async fn launch_failure_is_internal_error() {
    let backend = Arc::new(StubBackend::new(Err(InvocationError::Launch {
        program: "ollama".to_string(),
        reason: "No such file or directory".to_string(),
    })));

    let response = post_json(router(backend), "/v1/chat/completions", HI).await;
    assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;

    assert_eq!(body["error"]["type"], "internal_error");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("No such file or directory")
    );
}

#[tokio::test]
async fn streaming_failure_emits_single_error_event() {
    let backend = Arc::new(StubBackend::failing(1, "model not found"));

    let response = post_json(router(backend), "/v1/chat/completions", HI_STREAM).await;
    let data = sse_data(&body_text(response).await);

    assert_eq!(data.len(), 1);
    let event: Value = serde_json::from_str(&data[0]).unwrap();
    assert_eq!(event["error"]["type"], "cli_error");
    assert_eq!(event["error"]["code"], 500);
}

#[tokio::test]
async fn streaming_timeout_emits_single_timeout_event() {
    let backend = Arc::new(StubBackend::timing_out());

    let response = post_json(router(backend), "/v1/chat/completions", HI_STREAM).await;
    assert_status(&response, StatusCode::OK);
    let data = sse_data(&body_text(response).await);

    assert_eq!(data.len(), 1);
    assert!(!data.iter().any(|d| d == "[DONE]"));
    let event: Value = serde_json::from_str(&data[0]).unwrap();
    assert_eq!(
        event,
        json!({"error": {"message": "Request timed out", "type": "timeout_error", "code": 504}})
    );
}

#[tokio::test]
async fn null_stream_flag_means_complete_response() {
    let backend = Arc::new(StubBackend::replying("Hello there"));
    let body = r#"{"stream":null,"messages":[{"role":"user","content":"Hi"}]}"#;

    let response = post_json(router(backend), "/v1/chat/completions", body).await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["object"], "chat.completion");
    assert_eq!(body["choices"][0]["message"]["content"], "Hello there");
}

#[tokio::test]
async fn conversation_larger_than_two_megabytes_is_accepted() {
    let backend = Arc::new(StubBackend::replying("ok"));
    let content = "word ".repeat(600_000);
    let body = json!({"messages": [{"role": "user", "content": content}]}).to_string();
    assert!(body.len() > 3_000_000);

    let response = post_json(router(backend.clone()), "/v1/chat/completions", &body).await;
    assert_status(&response, StatusCode::OK);

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].prompt.len() > 3_000_000);
}

#[tokio::test]
async fn body_over_limit_is_internal_error() {
    let settings = ProxySettings {
        max_body_bytes: 1024,
        ..ProxySettings::default()
    };
    let backend = Arc::new(StubBackend::replying("unused"));
    let app = create_router(AppState::new(backend.clone(), settings));
    let body = json!({"messages": [{"role": "user", "content": "x".repeat(4096)}]}).to_string();

    let response = post_json(app, "/v1/chat/completions", &body).await;
    assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;

    assert_eq!(body["error"]["type"], "internal_error");
    assert_eq!(body["error"]["code"], 500);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body")
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn malformed_body_is_internal_error() {
    let backend = Arc::new(StubBackend::replying("unused"));

    let response = post_json(router(backend.clone()), "/v1/chat/completions", "{not json").await;
    assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;

    assert_eq!(body["error"]["type"], "internal_error");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body")
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn models_lists_configured_catalog() {
    let backend = Arc::new(StubBackend::replying(""));

    let response = get(router(backend), "/v1/models").await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["object"], "list");
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["gpt-oss:20b", "gpt-oss:120b"]);
    assert_eq!(body["data"][0]["owned_by"], "ollama");
    assert_eq!(body["data"][0]["object"], "model");
}

#[tokio::test]
async fn models_honors_custom_catalog() {
    let settings = ProxySettings {
        models: vec!["llama3:8b".to_string()],
        owned_by: "local".to_string(),
        ..ProxySettings::default()
    };
    let app = create_router(AppState::new(Arc::new(StubBackend::replying("")), settings));

    let body = body_json(get(app, "/v1/models").await).await;

    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], "llama3:8b");
    assert_eq!(body["data"][0]["owned_by"], "local");
}

#[tokio::test]
async fn health_is_healthy_when_probe_succeeds() {
    let backend = Arc::new(StubBackend::replying(""));

    let response = get(router(backend), "/health").await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend_available"], true);
    assert_eq!(body["backend_version"], "ollama version is 0.12.3");
}

#[tokio::test]
async fn health_is_degraded_when_probe_fails() {
    let backend =
        Arc::new(StubBackend::replying("").with_probe(Err(InvocationError::Timeout)));

    let response = get(router(backend), "/health").await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body, json!({"status": "degraded", "backend_available": false}));
}

#[tokio::test]
async fn bounded_admission_still_serves_requests() {
    let settings = ProxySettings {
        max_concurrent: 1,
        ..ProxySettings::default()
    };
    let backend = Arc::new(StubBackend::replying("one"));
    let app = create_router(AppState::new(backend.clone(), settings));

    let first = post_json(app.clone(), "/v1/chat/completions", HI).await;
    let second = post_json(app, "/v1/chat/completions", HI).await;

    assert_status(&first, StatusCode::OK);
    assert_status(&second, StatusCode::OK);
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let backend = Arc::new(StubBackend::replying(""));
    let response = get(router(backend), "/v1/embeddings").await;
    assert_status(&response, StatusCode::NOT_FOUND);
}
