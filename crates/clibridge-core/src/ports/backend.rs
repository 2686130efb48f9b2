//! Generation backend port.
//!
//! This port defines the interface for running the text-generation backend
//! once per request. Implementations handle all process details internally
//! and are constructed with their own configuration; nothing here reads
//! process-global state.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::BackendInvocationResult;
use crate::error::InvocationError;

/// A backend that turns a flat prompt into generated text.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run the backend once for `model` with `prompt` on its input.
    ///
    /// Blocks the calling task until the backend exits or `timeout`
    /// elapses. An unresponsive backend must be killed before returning.
    /// Returns the raw capture, or [`InvocationError::Launch`] when the
    /// backend could not be started at all. No retries.
    async fn invoke(
        &self,
        model: &str,
        prompt: &str,
        timeout: Duration,
    ) -> Result<BackendInvocationResult, InvocationError>;

    /// Check that the backend is reachable, returning its version string.
    async fn probe(&self, timeout: Duration) -> Result<String, InvocationError>;

    /// Run the backend and return its stdout, signaling any failure.
    ///
    /// Timeouts and non-zero exits become [`InvocationError::Timeout`] and
    /// [`InvocationError::Process`] respectively.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, InvocationError> {
        self.invoke(model, prompt, timeout).await?.into_output()
    }
}
