//! Domain types and pure translation logic.
//!
//! Nothing in here performs I/O. The proxy adapter feeds requests in and
//! maps the resulting values onto the OpenAI wire format.

mod completion;
mod invocation;
mod message;
mod prompt;
mod stream;

pub use completion::{CompletionResponse, FinishReason, Usage, count_tokens, new_response_id};
pub use invocation::{BackendInvocationResult, SIGNALED_EXIT_STATUS};
pub use message::{ConversationMessage, GenerationRequest, MessageRole};
pub use prompt::compose_prompt;
pub use stream::{CHUNK_SIZE, StreamChunk, StreamEvent, frame_chunks, frame_outcome};
