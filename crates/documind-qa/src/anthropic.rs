//! Anthropic messages API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use documind_core::{ChatModel, DocumindError, QaConfig, Result};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Client for the hosted Anthropic messages API.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicClient {
    /// Build a client from the QA configuration.
    ///
    /// The API key is read from the environment variable named in the
    /// configuration.
    pub fn new(config: &QaConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            DocumindError::config(format!(
                "API key not found: set the {} environment variable",
                config.api_key_env
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| DocumindError::generation(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(self.api_key.trim())
                .map_err(|_| DocumindError::config("invalid API key"))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl ChatModel for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Calling {} with model {}", MESSAGES_URL, self.model);

        let response = self
            .client
            .post(MESSAGES_URL)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| DocumindError::generation(format!("messages request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(DocumindError::generation(format!(
                "API returned {}: {}",
                status, text
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| DocumindError::generation(format!("failed to parse response: {}", e)))?;

        let answer = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if answer.is_empty() {
            return Err(DocumindError::generation("response missing text content"));
        }
        Ok(answer)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let body = MessagesRequest {
            model: "claude-3-5-haiku-20241022",
            max_tokens: 1024,
            temperature: 0.7,
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-3-5-haiku-20241022");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_response_text_blocks() {
        let body = r#"{"content": [
            {"type": "text", "text": "first"},
            {"type": "tool_use", "id": "x", "name": "n", "input": {}},
            {"type": "text", "text": "second"}
        ]}"#;
        let parsed: MessagesResponse = serde_json::from_str(body).unwrap();
        let texts: Vec<_> = parsed
            .content
            .into_iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }
}
