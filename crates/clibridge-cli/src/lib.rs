//! Command-line entry point for clibridge.
//!
//! Parses arguments, turns them into [`ProxySettings`](clibridge_core::ProxySettings)
//! and a [`BackendConfig`](clibridge_core::BackendConfig), and dispatches to
//! the command handlers. The binary in `main.rs` only adds logging setup.

#![deny(unsafe_code)]

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use commands::{BackendArgs, Commands, ServeArgs};
pub use error::CliError;
pub use parser::Cli;

/// Dispatch a parsed command line to its handler.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Serve(args) => handlers::serve::execute(args).await,
        Commands::Check(args) => handlers::check::execute(args).await,
    }
}
