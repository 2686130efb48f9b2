//! Shared test helpers: a scripted backend and request plumbing.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use clibridge_core::{
    BackendInvocationResult, GenerationBackend, InvocationError, ProxySettings,
};
use clibridge_proxy::{AppState, create_router};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub model: String,
    pub prompt: String,
    pub timeout: Duration,
}

/// Backend that returns a fixed outcome and records what it was asked.
pub struct StubBackend {
    invoke: Result<BackendInvocationResult, InvocationError>,
    probe: Result<String, InvocationError>,
    calls: Mutex<Vec<Call>>,
}

impl StubBackend {
    pub fn new(invoke: Result<BackendInvocationResult, InvocationError>) -> Self {
        Self {
            invoke,
            probe: Ok("ollama version is 0.12.3".to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Backend exiting 0 with `stdout`.
    pub fn replying(stdout: &str) -> Self {
        Self::new(Ok(BackendInvocationResult::completed(0, stdout, "")))
    }

    /// Backend exiting non-zero with `stderr`.
    pub fn failing(status: i32, stderr: &str) -> Self {
        Self::new(Ok(BackendInvocationResult::completed(status, "", stderr)))
    }

    /// Backend that ran out of time.
    pub fn timing_out() -> Self {
        Self::new(Ok(BackendInvocationResult::timed_out("")))
    }

    pub fn with_probe(mut self, probe: Result<String, InvocationError>) -> Self {
        self.probe = probe;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for StubBackend {
    async fn invoke(
        &self,
        model: &str,
        prompt: &str,
        timeout: Duration,
    ) -> Result<BackendInvocationResult, InvocationError> {
        self.calls.lock().unwrap().push(Call {
            model: model.to_string(),
            prompt: prompt.to_string(),
            timeout,
        });
        self.invoke.clone()
    }

    async fn probe(&self, _timeout: Duration) -> Result<String, InvocationError> {
        self.probe.clone()
    }
}

/// Router over `backend` with default settings.
pub fn router(backend: Arc<StubBackend>) -> Router {
    create_router(AppState::new(backend, ProxySettings::default()))
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Split an SSE body into its `data:` payloads.
pub fn sse_data(body: &str) -> Vec<String> {
    body.split("\n\n")
        .filter_map(|frame| frame.trim().strip_prefix("data: "))
        .map(ToString::to_string)
        .collect()
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
