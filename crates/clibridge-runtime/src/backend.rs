//! `GenerationBackend` implementation backed by a CLI subprocess.
//!
//! Each invocation spawns exactly one child, writes the prompt to its
//! stdin, drains stdout and stderr concurrently (so a chatty backend can
//! never block on a full pipe) and waits for it to exit. When the time
//! budget runs out the child is terminated and reaped before returning.

use std::io;
use std::process::ExitStatus;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use clibridge_core::{
    BackendConfig, BackendInvocationResult, GenerationBackend, InvocationError,
    SIGNALED_EXIT_STATUS,
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::ChildStdin;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::command::{describe, generation_command, version_command};
use crate::shutdown::terminate_child;
use crate::version::first_line;

/// Time a timed-out backend gets to exit after SIGTERM before SIGKILL.
const DEFAULT_KILL_GRACE: Duration = Duration::from_millis(500);

/// Number of prompt characters included in debug logs.
const PROMPT_PREVIEW_CHARS: usize = 100;

/// Backend that runs a generation CLI (e.g. `ollama run <model>`).
///
/// # Design
///
/// - Pure process concerns only, no HTTP or response shaping
/// - Configuration is fixed at construction and shared read-only
/// - No retries; every failure is returned to the caller as-is
#[derive(Debug, Clone)]
pub struct CliBackend {
    config: Arc<BackendConfig>,
    kill_grace: Duration,
}

impl CliBackend {
    /// Create a backend for the given configuration.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config: Arc::new(config),
            kill_grace: DEFAULT_KILL_GRACE,
        }
    }

    /// Override how long a timed-out child may take to exit after SIGTERM.
    #[must_use]
    pub const fn with_kill_grace(mut self, grace: Duration) -> Self {
        self.kill_grace = grace;
        self
    }

    /// The configuration this backend was built with.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn launch_error(&self, err: &io::Error) -> InvocationError {
        InvocationError::Launch {
            program: self.config.program_name(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl GenerationBackend for CliBackend {
    async fn invoke(
        &self,
        model: &str,
        prompt: &str,
        limit: Duration,
    ) -> Result<BackendInvocationResult, InvocationError> {
        debug!(
            command = %describe(&self.config, model),
            timeout_secs = limit.as_secs(),
            prompt = %preview(prompt),
            "Running backend"
        );

        let start = Instant::now();
        let mut child = generation_command(&self.config, model)
            .spawn()
            .map_err(|e| self.launch_error(&e))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| InvocationError::Io("Missing stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| InvocationError::Io("Missing stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| InvocationError::Io("Missing stderr".to_string()))?;

        let run = async {
            let (fed, out, err, status) = tokio::join!(
                feed_prompt(stdin, prompt),
                read_pipe(stdout),
                read_pipe(stderr),
                child.wait(),
            );
            fed?;
            Ok::<_, io::Error>(BackendInvocationResult::completed(
                exit_code(status?),
                out?,
                err?,
            ))
        };
        let outcome = timeout(limit, run).await;

        match outcome {
            Ok(Ok(result)) => {
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if result.exit_status == 0 {
                    info!(
                        model = %model,
                        elapsed_ms,
                        output_bytes = result.stdout.len(),
                        "Backend finished"
                    );
                } else {
                    warn!(
                        model = %model,
                        elapsed_ms,
                        exit_status = result.exit_status,
                        stderr = %result.stderr.trim(),
                        "Backend exited with failure"
                    );
                }
                Ok(result)
            }
            Ok(Err(e)) => {
                warn!(model = %model, error = %e, "Backend I/O failed");
                Err(InvocationError::Io(e.to_string()))
            }
            Err(_) => {
                warn!(
                    model = %model,
                    timeout_secs = limit.as_secs(),
                    "Backend timed out, terminating"
                );
                if let Err(e) = terminate_child(&mut child, self.kill_grace).await {
                    warn!(error = %e, "Failed to terminate timed-out backend");
                }
                Ok(BackendInvocationResult::timed_out(String::new()))
            }
        }
    }

    async fn probe(&self, limit: Duration) -> Result<String, InvocationError> {
        let child = version_command(&self.config)
            .spawn()
            .map_err(|e| self.launch_error(&e))?;

        // On timeout the child is dropped here and killed (kill_on_drop).
        let output = match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(InvocationError::Io(e.to_string())),
            Err(_) => return Err(InvocationError::Timeout),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(InvocationError::Process {
                status: exit_code(output.status),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(first_line(&stdout, &stderr).unwrap_or_default())
    }
}

/// Write the prompt to the child's stdin and close it.
///
/// A backend that exits without reading its input closes the pipe early;
/// that is not an error here, its exit status tells the story.
async fn feed_prompt(mut stdin: ChildStdin, prompt: &str) -> io::Result<()> {
    match stdin.write_all(prompt.as_bytes()).await {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

async fn read_pipe<R: AsyncRead + Unpin>(mut pipe: R) -> io::Result<String> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(SIGNALED_EXIT_STATUS)
}

fn preview(prompt: &str) -> String {
    let mut out: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    if out.len() < prompt.len() {
        out.push_str("...");
    }
    out
}
