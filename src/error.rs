//! Error types for rmit modules using thiserror.

use thiserror::Error;

/// Errors from collecting the diff to describe.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("git is not installed or not in PATH")]
    GitNotInstalled,

    #[error("current directory is not a git repository")]
    NotARepository,

    #[error("no changes detected in the repository")]
    NoChanges,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    QueryFailed { operation: String, stderr: String },
}

impl DiffError {
    /// Whether the error comes from the environment (missing tool or not a
    /// repository) rather than from the state of the working tree.
    pub fn is_environment(&self) -> bool {
        matches!(self, DiffError::GitNotInstalled | DiffError::NotARepository)
    }
}

/// Errors from a single chat-completion call.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API error: {body} (status code: {status})")]
    Remote { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("no response from AI model")]
    EmptyResponse,
}

/// Errors from staging and committing.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to stage changes: {0}")]
    StagingFailed(String),

    #[error("Failed to create commit: {0}")]
    CommitFailed(String),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from reading or writing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to get home directory")]
    HomeDirNotFound,

    #[error("Unknown configuration key: {0}. Valid keys are: api_key, api_url, default_model")]
    UnknownKey(String),

    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),

    #[error("API key not set. Run `rmit set api_key <KEY>` or export OPENROUTER_API_KEY")]
    MissingApiKey,

    #[error("failed to marshal config: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    #[error("failed to write config file: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Errors that end a refinement session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Error generating commit message: {0}")]
    Generation(#[from] GenerationError),

    #[error("Error creating commit: {0}")]
    Commit(#[from] CommitError),

    #[error("Error reading user input: {0}")]
    Input(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_errors_are_classified() {
        assert!(DiffError::GitNotInstalled.is_environment());
        assert!(DiffError::NotARepository.is_environment());
        assert!(!DiffError::NoChanges.is_environment());
    }

    #[test]
    fn test_remote_error_message_includes_status_and_body() {
        let err = GenerationError::Remote {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error: unauthorized (status code: 401)");
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let err = ConfigError::UnknownKey("model".to_string());
        assert!(err.to_string().contains("api_key, api_url, default_model"));
    }
}
