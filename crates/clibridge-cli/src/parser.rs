//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the clibridge proxy.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Debug, Parser)]
#[command(name = "clibridge")]
#[command(about = "Serve an OpenAI-compatible API on top of a local generation CLI")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
