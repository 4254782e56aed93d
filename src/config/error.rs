//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Auth issuer must use HTTPS in production")]
    AuthorityMustBeHttps,

    #[error("No authentication method configured")]
    NoAuthConfigured,

    #[error("Development tokens are not allowed in production")]
    DevTokensInProduction,

    #[error("Invalid development token entry: {0}")]
    InvalidDevToken(String),

    #[error("Audit signing key must be at least {0} bytes")]
    SigningKeyTooShort(usize),

    #[error("Minimum match score must be between 0 and 100")]
    InvalidMinScore,
}
