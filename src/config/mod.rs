//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BRIDGEWAY__` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use bridgeway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod audit;
mod auth;
mod database;
mod error;
mod matching;
mod server;

pub use ai::AiConfig;
pub use audit::{AuditConfig, MIN_SIGNING_KEY_LENGTH};
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use matching::MatchingConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration; absent URL selects the in-memory store
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration (OIDC, development tokens)
    #[serde(default)]
    pub auth: AuthConfig,

    /// Match explanation provider
    #[serde(default)]
    pub ai: AiConfig,

    /// Audit chain signing key
    #[serde(default)]
    pub audit: AuditConfig,

    /// Match scoring options
    #[serde(default)]
    pub matching: MatchingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables such as
    /// `BRIDGEWAY__SERVER__PORT=8080` into `server.port`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BRIDGEWAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        self.audit.validate(&self.server.environment)?;
        self.matching.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
