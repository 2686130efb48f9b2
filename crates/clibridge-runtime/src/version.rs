//! Version string extraction for the backend probe.

/// Pick the version line out of a `--version` run.
///
/// Tries stdout first and falls back to stderr, since some tools print
/// their version there. Returns `None` when both are blank.
pub fn first_line(stdout: &str, stderr: &str) -> Option<String> {
    let text = if stdout.trim().is_empty() { stderr } else { stdout };
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(ToString::to_string)
}
