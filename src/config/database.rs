//! PostgreSQL pool settings (`BRIDGEWAY__DATABASE__*`).

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Without a `url` the service runs on the in-memory store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Apply `migrations/` before serving.
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// The configured URL, ignoring blank values.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = self.url() {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(ValidationError::InvalidDatabaseUrl);
            }
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

fn default_min_connections() -> u32 {
    2
}

fn default_max_connections() -> u32 {
    20
}

fn default_acquire_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn no_url_means_in_memory() {
        let config = DatabaseConfig::default();
        assert!(config.url().is_none());
        assert!(!config.run_migrations);
        assert!(config.validate().is_ok());
        assert!(with_url("   ").url().is_none());
    }

    #[test]
    fn only_postgres_urls_are_accepted() {
        assert!(with_url("postgres://bridgeway@localhost/bridgeway").validate().is_ok());
        assert!(with_url("postgresql://localhost/bridgeway").validate().is_ok());
        assert!(matches!(
            with_url("mysql://localhost/bridgeway").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        ));
    }

    #[test]
    fn pool_bounds_are_checked() {
        let inverted = DatabaseConfig {
            min_connections: 10,
            max_connections: 5,
            ..Default::default()
        };
        assert!(matches!(inverted.validate(), Err(ValidationError::InvalidPoolSize)));

        let oversized = DatabaseConfig {
            max_connections: 150,
            ..Default::default()
        };
        assert!(matches!(oversized.validate(), Err(ValidationError::PoolSizeTooLarge)));
    }

    #[test]
    fn acquire_timeout_in_seconds() {
        let config = DatabaseConfig {
            acquire_timeout_secs: 10,
            ..Default::default()
        };
        assert_eq!(config.acquire_timeout(), Duration::from_secs(10));
    }
}
