//! Translation of a finished backend run into a completion response.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishReason {
    Stop,
}

/// Approximate token accounting.
///
/// Counts are whitespace-delimited words, not tokenizer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl Usage {
    /// Compute usage for a prompt and the content generated from it.
    #[must_use]
    pub fn estimate(prompt: &str, content: &str) -> Self {
        let prompt_tokens = count_tokens(prompt);
        let completion_tokens = count_tokens(content);
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// A complete (non-streamed) chat completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Unique per response, `chatcmpl-xxxxxxxx`.
    pub id: String,
    /// Unix seconds.
    pub created: i64,
    pub model: String,
    /// Trimmed backend output.
    pub content: String,
    pub finish_reason: Option<FinishReason>,
    pub usage: Usage,
}

impl CompletionResponse {
    /// Build the response for a successful backend run.
    ///
    /// `prompt` is the composed prompt sent to the backend and `stdout` its
    /// raw output; surrounding whitespace is stripped from the content.
    #[must_use]
    pub fn from_output(model: impl Into<String>, prompt: &str, stdout: &str) -> Self {
        let content = stdout.trim().to_string();
        let usage = Usage::estimate(prompt, &content);
        Self {
            id: new_response_id(),
            created: Utc::now().timestamp(),
            model: model.into(),
            content,
            finish_reason: Some(FinishReason::Stop),
            usage,
        }
    }
}

/// Count whitespace-delimited tokens.
#[must_use]
pub fn count_tokens(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Generate a fresh `chatcmpl-` identifier.
#[must_use]
pub fn new_response_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("chatcmpl-{}", &hex[..8])
}
