//! Captured outcome of one backend process run.

use crate::error::InvocationError;

/// Exit status reported when the process was terminated by a signal.
pub const SIGNALED_EXIT_STATUS: i32 = -1;

/// Everything observed from a single backend invocation.
///
/// Produced once per invocation and consumed exactly once, either by
/// [`into_output`](Self::into_output) or by inspecting the fields directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInvocationResult {
    /// Process exit code, or [`SIGNALED_EXIT_STATUS`] when killed by a signal.
    pub exit_status: i32,
    /// Everything written to stdout (empty when timed out).
    pub stdout: String,
    /// Everything written to stderr.
    pub stderr: String,
    /// Whether the invocation was aborted because it ran out of time.
    pub timed_out: bool,
}

impl BackendInvocationResult {
    /// Result of a process that ran to completion.
    #[must_use]
    pub fn completed(exit_status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_status,
            stdout: stdout.into(),
            stderr: stderr.into(),
            timed_out: false,
        }
    }

    /// Result of a process that was killed after exceeding its time budget.
    #[must_use]
    pub fn timed_out(stderr: impl Into<String>) -> Self {
        Self {
            exit_status: SIGNALED_EXIT_STATUS,
            stdout: String::new(),
            stderr: stderr.into(),
            timed_out: true,
        }
    }

    /// True when the backend exited cleanly within its time budget.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !self.timed_out && self.exit_status == 0
    }

    /// Turn the raw capture into the generated text or a signaled error.
    ///
    /// A timeout wins over the exit status, since a killed process always
    /// reports a failing status.
    pub fn into_output(self) -> Result<String, InvocationError> {
        if self.timed_out {
            return Err(InvocationError::Timeout);
        }
        if self.exit_status != 0 {
            return Err(InvocationError::Process {
                status: self.exit_status,
                stderr: self.stderr,
            });
        }
        Ok(self.stdout)
    }
}
