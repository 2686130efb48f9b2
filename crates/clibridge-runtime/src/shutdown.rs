//! Termination of backend children with SIGTERM → SIGKILL escalation.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
#[cfg(unix)]
use tokio::time::timeout;
use tracing::debug;

#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Terminate a child process and reap it.
///
/// # Strategy
/// 1. Send SIGTERM and wait up to `grace` for the process to exit
/// 2. If still running, send SIGKILL
/// 3. Wait for process reaping (required to avoid zombies)
///
/// # Platform behavior
/// - Unix: Uses nix for SIGTERM, then SIGKILL via `.kill()`
/// - Windows: Immediately calls `.kill()` (no graceful shutdown available)
pub async fn terminate_child(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    #[cfg(unix)]
    {
        terminate_unix(child, grace).await
    }

    #[cfg(not(unix))]
    {
        let _ = grace;
        terminate_windows(child).await
    }
}

#[cfg(unix)]
async fn terminate_unix(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    let Some(pid) = child.id() else {
        // Already reaped.
        return child.wait().await;
    };

    let raw_pid = i32::try_from(pid)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "pid out of range"))?;

    if let Err(e) = signal::kill(Pid::from_raw(raw_pid), Signal::SIGTERM) {
        if e == nix::errno::Errno::ESRCH {
            return child.wait().await;
        }
        return Err(io::Error::other(e));
    }

    if let Ok(result) = timeout(grace, child.wait()).await {
        return result;
    }

    debug!(pid, "Backend ignored SIGTERM, sending SIGKILL");
    child.kill().await?;
    child.wait().await
}

#[cfg(not(unix))]
async fn terminate_windows(child: &mut Child) -> io::Result<ExitStatus> {
    child.kill().await?;
    child.wait().await
}
