//! Single-shot chat-completion client.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::Config;
use crate::error::GenerationError;

use super::wire::{ChatRequest, GenerationResult, parse_completion};

/// Referrer sent with every request.
pub const REFERER: &str = "https://github.com/aixoio/rmit";

/// Trait for sending one prompt to a completion endpoint.
///
/// This abstraction allows mocking the remote model in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` to `model` once and return the first candidate's text.
    async fn complete(&self, model: &str, prompt: &str)
    -> Result<GenerationResult, GenerationError>;
}

/// OpenRouter-compatible client. No retries; transport-default timeouts.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone(), config.api_key.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerationResult, GenerationError> {
        let request = ChatRequest::user(model, prompt);

        debug!(
            "POST {} (model={}, prompt={} chars)",
            self.endpoint,
            model,
            prompt.len()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .json(&request)
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(GenerationError::Transport)?;
        debug!("Completion response status: {}", status);

        parse_completion(status.as_u16(), &body)
    }
}
