//! Re-framing a complete backend result as an incremental chunk stream.
//!
//! The backend is not treated as incrementally streaming: its output is
//! collected in full and then sliced into fixed-size deltas. What is
//! incremental is the framing handed to the transport.

use chrono::Utc;

use super::completion::{FinishReason, new_response_id};
use crate::error::ProxyError;

/// Number of characters carried by each content chunk.
pub const CHUNK_SIZE: usize = 10;

/// One incremental piece of a streamed completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamChunk {
    /// Shared by every chunk of one response.
    pub id: String,
    pub created: i64,
    pub model: String,
    /// Slice of the output; empty on the terminal chunk.
    pub delta_content: String,
    /// `None` on content chunks, `Some(Stop)` on the terminal chunk.
    pub finish_reason: Option<FinishReason>,
}

impl StreamChunk {
    /// Whether this is the empty-delta chunk that closes the content.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.finish_reason.is_some()
    }
}

/// An event handed to the transport, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A content or terminal chunk.
    Chunk(StreamChunk),
    /// End-of-stream sentinel following the terminal chunk.
    Done,
    /// The invocation failed; nothing follows this event.
    Failed(ProxyError),
}

/// Slice `text` into pieces of at most `size` characters, in order.
fn char_slices(text: &str, size: usize) -> impl Iterator<Item = &str> {
    let size = size.max(1);
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest
            .char_indices()
            .nth(size)
            .map_or(rest.len(), |(idx, _)| idx);
        let (head, tail) = rest.split_at(end);
        rest = tail;
        Some(head)
    })
}

/// Frame a successful backend output as a chunk sequence.
///
/// The output is trimmed, split into [`CHUNK_SIZE`]-character content
/// chunks, and closed with exactly one empty-delta chunk whose finish
/// reason is `stop`. All chunks share one id and timestamp.
#[must_use]
pub fn frame_chunks(model: &str, output: &str) -> Vec<StreamChunk> {
    let id = new_response_id();
    let created = Utc::now().timestamp();
    let chunk = |delta_content: &str, finish_reason| StreamChunk {
        id: id.clone(),
        created,
        model: model.to_string(),
        delta_content: delta_content.to_string(),
        finish_reason,
    };

    char_slices(output.trim(), CHUNK_SIZE)
        .map(|slice| chunk(slice, None))
        .chain(std::iter::once(chunk("", Some(FinishReason::Stop))))
        .collect()
}

/// Frame the outcome of a streaming invocation as transport events.
///
/// Success yields every chunk followed by [`StreamEvent::Done`]. Failure
/// yields a single [`StreamEvent::Failed`] with no terminal chunk and no
/// sentinel, so a consumer can tell it apart from a completed stream.
#[must_use]
pub fn frame_outcome(model: &str, outcome: Result<String, ProxyError>) -> Vec<StreamEvent> {
    match outcome {
        Ok(output) => frame_chunks(model, &output)
            .into_iter()
            .map(StreamEvent::Chunk)
            .chain(std::iter::once(StreamEvent::Done))
            .collect(),
        Err(err) => vec![StreamEvent::Failed(err)],
    }
}
