//! Text generation against the hosted generative-language API.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::build_http_client;
use crate::config::GeneratorSettings;

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("generator request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generator returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generator response malformed: {0}")]
    Decode(String),

    #[error("generator returned no text{}", reason_suffix(.reason))]
    Empty { reason: Option<String> },
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" ({r})"))
        .unwrap_or_default()
}

/// Produces text for a prompt.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

/// Extract the generated text from a `generateContent` response.
///
/// Concatenates every text part of the first candidate. Returns the block
/// reason (or finish reason) when no text is present.
pub fn parse_generate_response(body: &Value) -> Result<String, GeneratorError> {
    let parts = body
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array);

    let text: String = parts
        .into_iter()
        .flatten()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if !text.is_empty() {
        return Ok(text);
    }

    let reason = body
        .pointer("/promptFeedback/blockReason")
        .or_else(|| body.pointer("/candidates/0/finishReason"))
        .and_then(Value::as_str)
        .map(str::to_owned);
    Err(GeneratorError::Empty { reason })
}

/// Gemini `generateContent` client.
pub struct GeminiGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(
        settings: &GeneratorSettings,
        api_key: impl Into<String>,
    ) -> Result<Self, GeneratorError> {
        Ok(Self {
            client: build_http_client(settings.timeout_secs)?,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                settings.base_url.trim_end_matches('/'),
                settings.model
            ),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            return Err(GeneratorError::Status {
                status: status.as_u16(),
                body: body_text.trim().to_string(),
            });
        }

        let parsed: Value = serde_json::from_str(&body_text)
            .map_err(|e| GeneratorError::Decode(e.to_string()))?;
        parse_generate_response(&parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_joins_text_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [ {"text": "{\"a\": "}, {"text": "1}"} ] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(parse_generate_response(&body).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        match parse_generate_response(&body) {
            Err(GeneratorError::Empty { reason }) => assert_eq!(reason.as_deref(), Some("SAFETY")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_error_message() {
        let err = GeneratorError::Empty {
            reason: Some("MAX_TOKENS".to_string()),
        };
        assert_eq!(err.to_string(), "generator returned no text (MAX_TOKENS)");
        let err = GeneratorError::Empty { reason: None };
        assert_eq!(err.to_string(), "generator returned no text");
    }

    #[test]
    fn test_endpoint_includes_model() {
        let settings = GeneratorSettings {
            base_url: "http://localhost:1234".to_string(),
            model: "gemini-test".to_string(),
            timeout_secs: Some(5),
        };
        let generator = GeminiGenerator::new(&settings, "key").unwrap();
        assert_eq!(
            generator.endpoint,
            "http://localhost:1234/v1beta/models/gemini-test:generateContent"
        );
    }
}
