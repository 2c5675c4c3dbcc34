//! Git operations through the system `git` binary.

pub mod commit;
pub mod diff;
pub mod runner;

pub use commit::{CommitExecutor, GitCommitter};
pub use diff::{DiffCollector, DiffScope, DiffSnapshot};
pub use runner::{GitOutput, git_available, run_git};
