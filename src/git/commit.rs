//! Staging and committing through the git CLI.

use std::path::PathBuf;

use tracing::debug;

use crate::error::CommitError;

use super::runner::run_git;

/// Creates the final commit once a message has been accepted.
///
/// This abstraction allows the refinement session to be tested without
/// touching a real repository.
#[cfg_attr(test, mockall::automock)]
pub trait CommitExecutor {
    /// Stage every change in the working tree and commit with `message`.
    fn commit(&self, message: &str) -> Result<(), CommitError>;
}

/// Commits with `git add -A` followed by `git commit -m`.
#[derive(Debug, Clone)]
pub struct GitCommitter {
    workdir: PathBuf,
}

impl GitCommitter {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl CommitExecutor for GitCommitter {
    fn commit(&self, message: &str) -> Result<(), CommitError> {
        // 1. Stage everything in the work tree, not just below workdir
        let add = run_git(&self.workdir, &["add", "-A"]).map_err(|source| {
            CommitError::SpawnFailed {
                operation: "add".to_string(),
                source,
            }
        })?;
        if !add.success {
            return Err(CommitError::StagingFailed(add.stderr_trimmed()));
        }

        // 2. Commit with the literal message
        let commit = run_git(&self.workdir, &["commit", "-m", message]).map_err(|source| {
            CommitError::SpawnFailed {
                operation: "commit".to_string(),
                source,
            }
        })?;
        if !commit.success {
            let stderr = commit.stderr_trimmed();
            // "nothing to commit" is reported on stdout
            let detail = if stderr.is_empty() {
                commit.stdout.trim().to_string()
            } else {
                stderr
            };
            return Err(CommitError::CommitFailed(detail));
        }

        debug!("{}", commit.stdout.trim());
        Ok(())
    }
}
