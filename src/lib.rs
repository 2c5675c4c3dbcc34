//! rmit - A CLI tool that writes git commit messages with a hosted language model.
//!
//! # Overview
//!
//! rmit reads the staged (or else unstaged) diff of the current repository,
//! asks an OpenRouter-compatible chat-completion endpoint for a conventional
//! commit message, and lets the user accept, refine or discard it before
//! running `git add -A` and `git commit`.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{Instruction, ProjectContext, RefinementSession, SessionOutcome};
pub use config::{Config, ConfigKey, ConfigStore};
pub use error::{CommitError, ConfigError, DiffError, GenerationError, SessionError};
pub use git::{DiffCollector, DiffScope, DiffSnapshot, GitCommitter};
pub use llm::{CompletionClient, OpenRouterClient};
