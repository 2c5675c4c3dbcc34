//! Thin wrapper around the system `git` binary.
//!
//! All operations shell out with `std::process::Command`, inheriting the
//! user's git config, hooks and credentials.

use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Captured result of one git invocation.
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// Trimmed stderr, for error messages.
    pub fn stderr_trimmed(&self) -> String {
        self.stderr.trim().to_string()
    }
}

/// Check that a `git` executable can be found on `PATH`.
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

/// Run git with `args` inside `workdir` and capture its output.
///
/// Only spawn failures are returned as `Err`; a non-zero exit is reported
/// through [`GitOutput::success`] so callers can map it to their own error.
pub fn run_git(workdir: &Path, args: &[&str]) -> std::io::Result<GitOutput> {
    debug!("git {}", args.join(" "));

    let output = Command::new("git").args(args).current_dir(workdir).output()?;

    Ok(GitOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
