//! Audit log configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

pub const MIN_SIGNING_KEY_LENGTH: usize = 32;

/// Key material for the audit hash chain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// HMAC key sealing each audit entry
    pub signing_key: Option<Secret<String>>,
}

impl AuditConfig {
    /// Validate audit configuration
    ///
    /// Outside development a key of at least `MIN_SIGNING_KEY_LENGTH` bytes
    /// is required.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match &self.signing_key {
            Some(key) if key.expose_secret().len() >= MIN_SIGNING_KEY_LENGTH => Ok(()),
            Some(_) => Err(ValidationError::SigningKeyTooShort(MIN_SIGNING_KEY_LENGTH)),
            None if *environment == Environment::Development => Ok(()),
            None => Err(ValidationError::MissingRequired("AUDIT__SIGNING_KEY")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(len: usize) -> AuditConfig {
        AuditConfig {
            signing_key: Some(Secret::new("k".repeat(len))),
        }
    }

    #[test]
    fn test_missing_key_allowed_in_development() {
        assert!(AuditConfig::default().validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_missing_key_rejected_in_production() {
        assert!(AuditConfig::default().validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_short_key_rejected() {
        assert!(matches!(
            key(8).validate(&Environment::Development),
            Err(ValidationError::SigningKeyTooShort(32))
        ));
    }

    #[test]
    fn test_long_key_accepted() {
        assert!(key(32).validate(&Environment::Production).is_ok());
    }
}
