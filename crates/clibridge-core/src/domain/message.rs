//! Conversation domain types.
//!
//! These types represent an inbound chat request after it has been lifted
//! out of the wire format, independent of any transport concerns.

use serde::{Deserialize, Serialize};

use crate::settings::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Parse a role from its wire representation.
    ///
    /// Parsing is total: anything that is not `system` or `assistant`
    /// (including `tool`, `function` and unknown values) is a user turn.
    #[must_use]
    pub fn from_wire(s: &str) -> Self {
        match s {
            "system" => Self::System,
            "assistant" => Self::Assistant,
            _ => Self::User,
        }
    }

    /// Convert role to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Label used for this role in the flattened backend prompt.
    #[must_use]
    pub const fn prompt_label(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ConversationMessage {
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A chat completion request with all defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Backend model identifier, passed to the backend as an argument.
    pub model: String,
    /// Ordered conversation; may be empty.
    pub conversation: Vec<ConversationMessage>,
    /// Whether the caller asked for chunked delivery.
    pub stream: bool,
    /// Accepted for compatibility; the backend CLI has no knob for it.
    pub temperature: f32,
    /// Accepted for compatibility; the backend CLI has no knob for it.
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Create a request for `model` with default sampling options.
    #[must_use]
    pub fn new(model: impl Into<String>, conversation: Vec<ConversationMessage>) -> Self {
        Self {
            model: model.into(),
            conversation,
            stream: false,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Request chunked delivery.
    #[must_use]
    pub const fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, Vec::new())
    }
}
