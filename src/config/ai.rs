//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration for match explanations
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Use the AI explainer when a key is available
    #[serde(default)]
    pub enabled: bool,

    /// Anthropic API key
    pub anthropic_api_key: Option<Secret<String>>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Explanation timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Token ceiling for one explanation
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Returns the key when the AI explainer should be used.
    pub fn active_key(&self) -> Option<&Secret<String>> {
        if self.enabled && self.has_anthropic() {
            self.anthropic_api_key.as_ref()
        } else {
            None
        }
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && !self.has_anthropic() {
            return Err(ValidationError::MissingRequired("AI__ANTHROPIC_API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            anthropic_api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_max_tokens() -> u32 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_tokens, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 10,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_enabled_requires_key() {
        let config = AiConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_active_key_needs_enabled_flag() {
        let config = AiConfig {
            anthropic_api_key: Some(Secret::new("sk-ant-xxx".to_string())),
            ..Default::default()
        };
        assert!(config.has_anthropic());
        assert!(config.active_key().is_none());

        let config = AiConfig {
            enabled: true,
            ..config
        };
        assert!(config.active_key().is_some());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
