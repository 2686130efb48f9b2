//! Core domain types and port definitions for clibridge.
//!
//! This crate holds everything about translating an OpenAI-style chat
//! request into a single backend invocation and back again, without any
//! knowledge of HTTP or of how the backend process is actually spawned:
//!
//! - [`domain`]: conversation types, prompt composition, completion
//!   translation and stream framing
//! - [`error`]: the invocation error and the fixed proxy error taxonomy
//! - [`ports`]: the [`GenerationBackend`] trait implemented by adapters
//! - [`settings`]: backend and proxy configuration with defaults

pub mod domain;
pub mod error;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    BackendInvocationResult, CHUNK_SIZE, CompletionResponse, ConversationMessage, FinishReason,
    GenerationRequest, MessageRole, SIGNALED_EXIT_STATUS, StreamChunk, StreamEvent, Usage,
    compose_prompt, count_tokens, frame_chunks, frame_outcome, new_response_id,
};
pub use error::{ErrorKind, InvocationError, ProxyError};
pub use ports::GenerationBackend;
pub use settings::{
    BackendConfig, DEFAULT_CATALOG, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_OWNED_BY, DEFAULT_PROXY_HOST, DEFAULT_PROXY_PORT, DEFAULT_TEMPERATURE,
    InvocationTimeouts, ProxySettings, SettingsError, validate_settings,
};
