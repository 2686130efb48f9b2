//! OpenAI-compatible HTTP surface for clibridge.
//!
//! Exposes `/v1/chat/completions`, `/v1/models` and `/health` on top of
//! any [`GenerationBackend`](clibridge_core::GenerationBackend). The crate
//! knows nothing about subprocesses; the binary wires in the CLI backend.

#![deny(unsafe_code)]

mod admission;
mod error;
mod handlers;
pub mod models;
pub mod server;
mod stream;

pub use error::ApiError;
pub use server::{AppState, create_router, serve};
