//! Mock AI Provider for testing.
//!
//! Queued responses, simulated delays for timeout tests, error injection
//! and call tracking.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Strong sector fit.")
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Consumed in order.
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Success { content: String, usage: TokenUsage },
    Error(MockError),
}

/// Errors the mock can inject.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContentFiltered { reason } => AIError::content_filtered(reason),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1", 128_000),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success {
            content: content.into(),
            usage: TokenUsage::new(10, 20),
        });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: "Mock response".to_string(),
                usage: TokenUsage::new(5, 10),
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success { content, usage } => Ok(CompletionResponse {
                content,
                usage,
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::RequestMetadata;

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(UserId::new("u").unwrap(), "t"))
            .with_message(crate::ports::MessageRole::User, "hi")
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let provider = MockAIProvider::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        assert_eq!(provider.complete(request()).await.unwrap().content, "second");
        assert_eq!(provider.complete(request()).await.unwrap().content, "Mock response");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn injects_errors() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        assert!(matches!(
            provider.complete(request()).await,
            Err(AIError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn records_calls() {
        let provider = MockAIProvider::new();
        provider.complete(request()).await.unwrap();
        assert_eq!(provider.get_calls()[0].messages[0].content, "hi");
    }
}
