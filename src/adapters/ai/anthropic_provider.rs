//! Anthropic Provider - Implementation of AIProvider for Anthropic's Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-3-5-haiku-latest")
//!     .with_timeout(Duration::from_secs(5));
//!
//! let provider = AnthropicProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    pub model: String,
    /// Default: https://api.anthropic.com
    pub base_url: String,
    pub timeout: Duration,
    /// Retries on transient failures.
    pub max_retries: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: "claude-3-5-haiku-latest".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 1,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn to_anthropic_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        // System prompts travel in their own field
        let mut messages: Vec<AnthropicMessage> = request
            .messages
            .iter()
            .filter_map(|msg| {
                let role = match msg.role {
                    MessageRole::System => return None,
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                };
                Some(AnthropicMessage {
                    role: role.to_string(),
                    content: msg.content.clone(),
                })
            })
            .collect();

        if messages.is_empty() {
            messages.push(AnthropicMessage {
                role: "user".to_string(),
                content: "Hello".to_string(),
            });
        }

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.unwrap_or(1024),
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&self.to_anthropic_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(Self::parse_retry_after(&error_body))),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Seconds to wait, from "try again in Ns" in the error message.
    fn parse_retry_after(error_body: &str) -> u32 {
        serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|parsed| {
                let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
                let rest = &message[message.find("try again in ")? + 13..];
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().ok()
            })
            .unwrap_or(60)
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = Self::handle_response_status(response).await?;

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(anthropic_response.into_completion())
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut attempt = 0;

        loop {
            let result = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(completion) => return Ok(completion),
                Err(err) if !err.is_retryable() || attempt >= self.config.max_retries => {
                    return Err(err)
                }
                Err(err) => {
                    tracing::debug!(error = %err, attempt, "retrying anthropic request");
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            sleep(Duration::from_secs(1 << attempt)).await;
            attempt += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model, 200_000)
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

impl AnthropicResponse {
    fn into_completion(self) -> CompletionResponse {
        let content = self
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let finish_reason = match self.stop_reason.as_deref() {
            Some("max_tokens") => FinishReason::Length,
            _ => FinishReason::Stop,
        };

        CompletionResponse {
            content,
            usage: TokenUsage::new(self.usage.input_tokens, self.usage.output_tokens),
            model: self.model,
            finish_reason,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::RequestMetadata;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::new(AnthropicConfig::new(Secret::new("test-key".to_string()))).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = AnthropicConfig::new(Secret::new("test-key".to_string()))
            .with_model("claude-3-opus-20240229")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(3))
            .with_max_retries(0);

        assert_eq!(config.model, "claude-3-opus-20240229");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn system_messages_are_moved_out_of_the_message_list() {
        let request = CompletionRequest::new(RequestMetadata::new(
            UserId::new("u").unwrap(),
            "trace",
        ))
        .with_message(MessageRole::System, "ignored")
        .with_message(MessageRole::User, "Explain this match")
        .with_system_prompt("Be brief");

        let body = provider().to_anthropic_request(&request);

        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
        assert_eq!(body.system.as_deref(), Some("Be brief"));
    }

    #[test]
    fn response_text_blocks_are_joined() {
        let response: AnthropicResponse = serde_json::from_value(serde_json::json!({
            "model": "claude-3-5-haiku-latest",
            "content": [
                {"type": "text", "text": "Strong "},
                {"type": "tool_use"},
                {"type": "text", "text": "fit."}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 40, "output_tokens": 5}
        }))
        .unwrap();

        let completion = response.into_completion();

        assert_eq!(completion.content, "Strong fit.");
        assert_eq!(completion.usage.total_tokens, 45);
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn parse_retry_after_reads_message() {
        let error = r#"{"error":{"message":"Rate limited, try again in 12s"}}"#;
        assert_eq!(AnthropicProvider::parse_retry_after(error), 12);
    }

    #[test]
    fn parse_retry_after_default() {
        let error = r#"{"error":{"message":"Rate limit exceeded"}}"#;
        assert_eq!(AnthropicProvider::parse_retry_after(error), 60);
    }

    #[test]
    fn provider_info_reports_model() {
        let info = provider().provider_info();
        assert_eq!(info.name, "anthropic");
        assert_eq!(info.model, "claude-3-5-haiku-latest");
    }
}
