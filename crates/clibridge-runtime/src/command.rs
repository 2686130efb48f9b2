//! Command builder for the backend CLI.
//!
//! This module turns a [`BackendConfig`] into ready-to-spawn commands.
//! All stdio is piped and every child is killed if its handle is dropped,
//! so an abandoned invocation never outlives the request that started it.

use std::process::Stdio;

use clibridge_core::BackendConfig;
use tokio::process::Command;

/// Apply the settings shared by every backend command.
fn base_command(config: &BackendConfig) -> Command {
    let mut cmd = Command::new(&config.program);
    if let Some(host) = &config.host {
        cmd.env(&config.host_env, host);
    }
    cmd.kill_on_drop(true);
    cmd
}

/// Build the generation command: `<program> <subcommand> <model> <extra_args...>`.
///
/// stdin, stdout and stderr are all piped; the caller writes the prompt.
pub fn generation_command(config: &BackendConfig, model: &str) -> Command {
    let mut cmd = base_command(config);
    cmd.arg(&config.subcommand).arg(model);
    for arg in &config.extra_args {
        cmd.arg(arg);
    }
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Build the version probe command: `<program> <version_arg>`.
pub fn version_command(config: &BackendConfig) -> Command {
    let mut cmd = base_command(config);
    cmd.arg(&config.version_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Render a command line for logging.
pub fn describe(config: &BackendConfig, model: &str) -> String {
    let mut parts = vec![config.program_name(), config.subcommand.clone(), model.to_string()];
    parts.extend(config.extra_args.iter().cloned());
    parts.join(" ")
}
