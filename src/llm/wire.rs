//! Chat-completion wire format and response decoding.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Request body: a model and a single user message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    pub fn user(model: &'a str, content: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Text produced by one successful completion; trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
}

/// Decode an HTTP status and body into the first candidate's text.
///
/// A non-success status never yields text. Later candidates are ignored.
pub fn parse_completion(status: u16, body: &str) -> Result<GenerationResult, GenerationError> {
    if !(200..300).contains(&status) {
        return Err(GenerationError::Remote {
            status,
            body: body.to_string(),
        });
    }

    let response: ChatResponse = serde_json::from_str(body).map_err(GenerationError::Parse)?;

    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    Ok(GenerationResult { text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_single_user_message() {
        let request = ChatRequest::user("openai/gpt-3.5-turbo", "describe this");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "model": "openai/gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "describe this"}]
            })
        );
    }

    #[test]
    fn test_parse_first_choice_trimmed() {
        let body = r#"{"choices": [{"message": {"content": "  feat: add login\n"}}, {"message": {"content": "fix: other"}}]}"#;
        let result = parse_completion(200, body).unwrap();
        assert_eq!(result.text, "feat: add login");
    }

    #[test]
    fn test_parse_zero_choices_is_empty_response() {
        let result = parse_completion(200, r#"{"choices": []}"#);
        assert!(matches!(result, Err(GenerationError::EmptyResponse)));
    }

    #[test]
    fn test_parse_blank_content_is_empty_response() {
        let result = parse_completion(200, r#"{"choices": [{"message": {"content": "   "}}]}"#);
        assert!(matches!(result, Err(GenerationError::EmptyResponse)));

        let result = parse_completion(200, r#"{"choices": [{"message": {"content": null}}]}"#);
        assert!(matches!(result, Err(GenerationError::EmptyResponse)));
    }

    #[test]
    fn test_parse_non_success_status_is_remote_error() {
        // Even a well-formed body must not produce text
        let body = r#"{"choices": [{"message": {"content": "feat: x"}}]}"#;
        match parse_completion(429, body) {
            Err(GenerationError::Remote { status, body: returned }) => {
                assert_eq!(status, 429);
                assert_eq!(returned, body);
            }
            other => panic!("Expected Remote error, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_body_is_parse_error() {
        let result = parse_completion(200, "<html>gateway</html>");
        assert!(matches!(result, Err(GenerationError::Parse(_))));

        let result = parse_completion(200, r#"{"error": "no choices key"}"#);
        assert!(matches!(result, Err(GenerationError::Parse(_))));
    }
}
