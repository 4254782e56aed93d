//! AI adapters.
//!
//! - `AnthropicProvider` - Anthropic Messages API
//! - `MockAIProvider` - Configurable mock for testing
//! - `AiMatchExplainer` / `TemplateExplainer` - `MatchExplainer` implementations

mod anthropic_provider;
mod match_explainer;
mod mock_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use match_explainer::{AiMatchExplainer, TemplateExplainer};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
