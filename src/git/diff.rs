//! Diff collection from the working tree via the git CLI.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::DiffError;

use super::runner::{git_available, run_git};

/// Which side of the index the diff was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffScope {
    Staged,
    Unstaged,
}

impl fmt::Display for DiffScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffScope::Staged => write!(f, "staged"),
            DiffScope::Unstaged => write!(f, "unstaged"),
        }
    }
}

/// The changes a session describes. `raw_text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSnapshot {
    pub raw_text: String,
    pub changed_files: Vec<String>,
    pub scope: DiffScope,
}

/// Collects staged (preferred) or unstaged changes from a working tree.
#[derive(Debug, Clone)]
pub struct DiffCollector {
    workdir: PathBuf,
}

impl DiffCollector {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Verify git is installed and the working directory is inside a work tree.
    pub fn check_environment(&self) -> Result<(), DiffError> {
        if !git_available() {
            return Err(DiffError::GitNotInstalled);
        }

        let output = run_git(&self.workdir, &["rev-parse", "--is-inside-work-tree"]).map_err(
            |source| DiffError::SpawnFailed {
                operation: "rev-parse".to_string(),
                source,
            },
        )?;

        if !output.success || output.stdout.trim() != "true" {
            return Err(DiffError::NotARepository);
        }

        Ok(())
    }

    /// Capture the diff to describe.
    ///
    /// Staged changes always take priority and are never merged with
    /// unstaged ones. The changed-file list is an independent query; if it
    /// fails the snapshot carries an empty list.
    pub fn collect(&self) -> Result<DiffSnapshot, DiffError> {
        self.check_environment()?;

        let (raw_text, scope) = self.raw_diff()?;
        debug!("Using {} diff ({} bytes)", scope, raw_text.len());

        let changed_files = match self.changed_files() {
            Ok(files) => files,
            Err(e) => {
                warn!("couldn't get changed files: {e}");
                Vec::new()
            }
        };

        Ok(DiffSnapshot {
            raw_text,
            changed_files,
            scope,
        })
    }

    /// List changed paths with the same staged-then-unstaged precedence.
    pub fn changed_files(&self) -> Result<Vec<String>, DiffError> {
        if !git_available() {
            return Err(DiffError::GitNotInstalled);
        }

        let staged = self.query(&["diff", "--staged", "--name-only"], "diff --staged --name-only")?;
        let names = if staged.trim().is_empty() {
            let unstaged = self.query(&["diff", "--name-only"], "diff --name-only")?;
            if unstaged.trim().is_empty() {
                return Err(DiffError::NoChanges);
            }
            unstaged
        } else {
            staged
        };

        Ok(names.trim().lines().map(str::to_string).collect())
    }

    fn raw_diff(&self) -> Result<(String, DiffScope), DiffError> {
        let staged = self.query(&["diff", "--staged"], "diff --staged")?;
        if !staged.is_empty() {
            return Ok((staged, DiffScope::Staged));
        }

        let unstaged = self.query(&["diff"], "diff")?;
        if unstaged.is_empty() {
            return Err(DiffError::NoChanges);
        }

        Ok((unstaged, DiffScope::Unstaged))
    }

    fn query(&self, args: &[&str], operation: &str) -> Result<String, DiffError> {
        let output = run_git(&self.workdir, args).map_err(|source| DiffError::SpawnFailed {
            operation: operation.to_string(),
            source,
        })?;

        if !output.success {
            return Err(DiffError::QueryFailed {
                operation: operation.to_string(),
                stderr: output.stderr_trimmed(),
            });
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use git2::{Repository, Signature};

    use super::*;

    /// Init a repo with `file.txt` committed as "original\n".
    fn repo_with_tracked_file() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        std::fs::write(dir.path().join("file.txt"), "original\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("file.txt")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        {
            let tree = repo.find_tree(tree_id).unwrap();
            let sig = Signature::now("Test", "test@test.com").unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
                .unwrap();
        }

        (dir, repo)
    }

    fn stage(repo: &Repository, path: &str) {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(path)).unwrap();
        index.write().unwrap();
    }

    #[test]
    fn test_diff_scope_display() {
        assert_eq!(DiffScope::Staged.to_string(), "staged");
        assert_eq!(DiffScope::Unstaged.to_string(), "unstaged");
    }

    #[test]
    fn test_collect_on_clean_repo_returns_no_changes() {
        let (dir, _repo) = repo_with_tracked_file();

        let result = DiffCollector::new(dir.path()).collect();
        assert!(matches!(result, Err(DiffError::NoChanges)));
    }

    #[test]
    fn test_collect_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();

        let result = DiffCollector::new(dir.path()).collect();
        assert!(matches!(result, Err(DiffError::NotARepository)));
    }

    #[test]
    fn test_collect_prefers_staged_over_unstaged() {
        let (dir, repo) = repo_with_tracked_file();

        std::fs::write(dir.path().join("file.txt"), "staged change\n").unwrap();
        stage(&repo, "file.txt");
        // Further unstaged edit on top of the staged one
        std::fs::write(dir.path().join("file.txt"), "unstaged change\n").unwrap();

        let collector = DiffCollector::new(dir.path());
        let snapshot = collector.collect().unwrap();

        let staged = collector.query(&["diff", "--staged"], "diff --staged").unwrap();
        assert_eq!(snapshot.scope, DiffScope::Staged);
        assert_eq!(snapshot.raw_text, staged);
        assert!(snapshot.raw_text.contains("+staged change"));
        assert!(!snapshot.raw_text.contains("unstaged change"));
        assert_eq!(snapshot.changed_files, vec!["file.txt".to_string()]);
    }

    #[test]
    fn test_collect_falls_back_to_unstaged() {
        let (dir, _repo) = repo_with_tracked_file();

        std::fs::write(dir.path().join("file.txt"), "modified\n").unwrap();

        let collector = DiffCollector::new(dir.path());
        let snapshot = collector.collect().unwrap();

        let unstaged = collector.query(&["diff"], "diff").unwrap();
        assert_eq!(snapshot.scope, DiffScope::Unstaged);
        assert_eq!(snapshot.raw_text, unstaged);
        assert!(snapshot.raw_text.contains("-original"));
        assert!(snapshot.raw_text.contains("+modified"));
    }

    #[test]
    fn test_untracked_files_are_not_changes() {
        let (dir, _repo) = repo_with_tracked_file();

        std::fs::write(dir.path().join("new.txt"), "hello\n").unwrap();

        let result = DiffCollector::new(dir.path()).collect();
        assert!(matches!(result, Err(DiffError::NoChanges)));
    }

    #[test]
    fn test_changed_files_uses_staged_list_only() {
        let (dir, repo) = repo_with_tracked_file();

        std::fs::write(dir.path().join("other.txt"), "other\n").unwrap();
        stage(&repo, "other.txt");
        std::fs::write(dir.path().join("file.txt"), "modified\n").unwrap();

        let files = DiffCollector::new(dir.path()).changed_files().unwrap();
        assert_eq!(files, vec!["other.txt".to_string()]);
    }

    #[test]
    fn test_changed_files_lists_every_unstaged_path() {
        let (dir, repo) = repo_with_tracked_file();

        std::fs::write(dir.path().join("second.txt"), "second\n").unwrap();
        stage(&repo, "second.txt");
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@test.com").unwrap();
        let parent = repo.head().unwrap().peel_to_commit().unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "second", &tree, &[&parent])
            .unwrap();

        std::fs::write(dir.path().join("file.txt"), "changed\n").unwrap();
        std::fs::write(dir.path().join("second.txt"), "changed\n").unwrap();

        let files = DiffCollector::new(dir.path()).changed_files().unwrap();
        assert_eq!(files, vec!["file.txt".to_string(), "second.txt".to_string()]);
    }

    #[test]
    fn test_changed_files_on_clean_repo_returns_no_changes() {
        let (dir, _repo) = repo_with_tracked_file();

        let result = DiffCollector::new(dir.path()).changed_files();
        assert!(matches!(result, Err(DiffError::NoChanges)));
    }
}
