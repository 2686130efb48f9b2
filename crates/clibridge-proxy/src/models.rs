//! OpenAI API data models for request/response handling.
//!
//! This module contains types that match the OpenAI API specification.
//! Domain types live in `clibridge-core`; this module handles the API layer mapping.

use clibridge_core::{
    CompletionResponse, ConversationMessage, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, FinishReason, GenerationRequest, MessageRole, ProxyError, StreamChunk,
    Usage,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Chat Completion Request/Response Types
// =============================================================================

/// Request to /v1/chat/completions endpoint.
///
/// Every field is optional on the wire; defaults are applied by
/// [`ChatCompletionRequest::into_generation_request`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model name to use.
    #[serde(default)]
    pub model: Option<String>,
    /// Array of chat messages.
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
    /// Whether to stream the response. `null` means no.
    #[serde(default)]
    pub stream: Option<bool>,
    /// Sampling temperature (0-2).
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    /// Apply defaults and convert into the domain request.
    pub fn into_generation_request(self) -> GenerationRequest {
        let conversation = self
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(ChatMessage::into_conversation_message)
            .collect();

        GenerationRequest {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            conversation,
            stream: self.stream.unwrap_or(false),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user" or "assistant". Anything else is read as "user".
    pub role: String,
    /// Message content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatMessage {
    /// An assistant message carrying generated content.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant.as_str().to_string(),
            content: Some(content.into()),
        }
    }

    fn into_conversation_message(self) -> ConversationMessage {
        ConversationMessage::new(
            MessageRole::from_wire(&self.role),
            self.content.unwrap_or_default(),
        )
    }
}

/// Response from /v1/chat/completions endpoint (non-streaming).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

/// A single chat completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: Option<FinishReason>,
}

impl From<CompletionResponse> for ChatCompletionResponse {
    fn from(completion: CompletionResponse) -> Self {
        Self {
            id: completion.id,
            object: "chat.completion".to_string(),
            created: completion.created,
            model: completion.model,
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage::assistant(completion.content),
                finish_reason: completion.finish_reason,
            }],
            usage: completion.usage,
        }
    }
}

/// Streaming chunk from /v1/chat/completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChunkChoice>,
}

/// A single streaming choice.
///
/// `finish_reason` is always serialized, as `null` on content chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChunkChoice {
    pub index: u32,
    pub delta: ChatDelta,
    pub finish_reason: Option<FinishReason>,
}

/// Delta content in streaming response. Empty (`{}`) on the terminal chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl From<&StreamChunk> for ChatCompletionChunk {
    fn from(chunk: &StreamChunk) -> Self {
        let delta = if chunk.is_terminal() {
            ChatDelta::default()
        } else {
            ChatDelta {
                content: Some(chunk.delta_content.clone()),
            }
        };

        Self {
            id: chunk.id.clone(),
            object: "chat.completion.chunk".to_string(),
            created: chunk.created,
            model: chunk.model.clone(),
            choices: vec![ChatChunkChoice {
                index: 0,
                delta,
                finish_reason: chunk.finish_reason,
            }],
        }
    }
}

// =============================================================================
// Models Endpoint Types
// =============================================================================

/// Response from /v1/models endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub object: String,
    pub data: Vec<ModelInfo>,
}

/// Information about a single model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

impl ModelsResponse {
    /// Build the catalog listing from configured model ids.
    pub fn from_catalog(models: &[String], owned_by: &str, created: i64) -> Self {
        let data = models
            .iter()
            .filter(|id| !id.trim().is_empty())
            .map(|id| ModelInfo {
                id: id.clone(),
                object: "model".to_string(),
                created,
                owned_by: owned_by.to_string(),
            })
            .collect();

        Self {
            object: "list".to_string(),
            data,
        }
    }
}

// =============================================================================
// Health Endpoint Types
// =============================================================================

/// Overall proxy status reported by /health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Response from /health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub backend_available: bool,
    /// First line of the backend's version output, when it answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_version: Option<String>,
}

impl HealthResponse {
    pub fn healthy(version: String) -> Self {
        Self {
            status: HealthStatus::Healthy,
            backend_available: true,
            backend_version: (!version.is_empty()).then_some(version),
        }
    }

    pub const fn degraded() -> Self {
        Self {
            status: HealthStatus::Degraded,
            backend_available: false,
            backend_version: None,
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// OpenAI-compatible error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    pub code: u16,
}

impl From<&ProxyError> for ErrorResponse {
    fn from(err: &ProxyError) -> Self {
        Self {
            error: ErrorDetail {
                message: err.message.clone(),
                r#type: err.kind.as_str().to_string(),
                code: err.code(),
            },
        }
    }
}
