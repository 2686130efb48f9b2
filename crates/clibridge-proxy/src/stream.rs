//! SSE encoding of streamed completions.
//!
//! The backend result is awaited in full inside the stream, then re-framed
//! into `chat.completion.chunk` events. Nothing runs until the response
//! body is polled, and dropping the body (client gone) drops the pending
//! invocation with it.
//!
//! While the backend runs, axum's default keep-alive interleaves `:` comment
//! frames every 15 seconds. They carry no `data:` field, so SSE clients skip
//! them and the data events are still exactly the framed completion.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use clibridge_core::{StreamEvent, frame_outcome};
use futures_util::Stream;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{ChatCompletionChunk, ErrorResponse};
use crate::server::AppState;

/// End-of-stream sentinel.
const DONE: &str = "[DONE]";

/// Build the SSE response for a streamed completion.
pub(crate) fn completion_sse(
    state: AppState,
    model: String,
    prompt: String,
    limit: Duration,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    let events = async_stream::stream! {
        let outcome = state.generate(&model, &prompt, limit).await;
        let framed = frame_outcome(&model, outcome);
        debug!(model = %model, events = framed.len(), "Streaming completion");
        for event in &framed {
            yield Ok(to_sse_event(event));
        }
    };

    // Comment frames stop idle proxies from cutting long generations.
    Sse::new(events).keep_alive(KeepAlive::default())
}

fn to_sse_event(event: &StreamEvent) -> Event {
    match event {
        StreamEvent::Chunk(chunk) => json_event(&ChatCompletionChunk::from(chunk)),
        StreamEvent::Done => Event::default().data(DONE),
        StreamEvent::Failed(err) => {
            warn!(kind = %err.kind, message = %err.message, "Streamed completion failed");
            json_event(&ErrorResponse::from(err))
        }
    }
}

fn json_event<T: Serialize>(payload: &T) -> Event {
    Event::default().json_data(payload).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to serialize SSE payload");
        Event::default().data(
            r#"{"error":{"message":"Failed to serialize event","type":"internal_error","code":500}}"#,
        )
    })
}

