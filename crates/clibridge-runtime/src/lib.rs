//! Process runtime for clibridge.
//!
//! Implements the [`GenerationBackend`](clibridge_core::GenerationBackend)
//! port by spawning the backend CLI once per request, feeding the prompt
//! on stdin and collecting its output under a timeout. Unresponsive
//! children are terminated and reaped before the call returns.

#![deny(unsafe_code)]

mod backend;
mod command;
mod shutdown;
mod version;

pub use backend::CliBackend;
