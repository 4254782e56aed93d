//! Matching engine configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingConfig {
    /// Matches must score strictly above this value
    #[serde(default)]
    pub min_score: u8,

    /// YAML file with sector families and region mappings
    pub reference_data_path: Option<PathBuf>,
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_score > 100 {
            return Err(ValidationError::InvalidMinScore);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchingConfig::default();
        assert_eq!(config.min_score, 0);
        assert!(config.reference_data_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_min_score_above_100_fails() {
        let config = MatchingConfig {
            min_score: 101,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
