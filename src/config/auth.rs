//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (OIDC bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// OIDC issuer URL, also used for JWKS discovery
    pub issuer_url: Option<String>,

    /// Expected audience for tokens
    pub audience: Option<String>,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,

    /// Static development tokens, `token=subject` pairs separated by commas
    pub dev_tokens: Option<String>,

    /// Subjects provisioned as `admin` on first login, separated by commas
    pub bootstrap_admins: Option<String>,
}

impl AuthConfig {
    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    /// Returns true when an OIDC issuer is configured.
    pub fn has_oidc(&self) -> bool {
        self.issuer_url.as_ref().is_some_and(|u| !u.trim().is_empty())
    }

    /// Parses `dev_tokens` into `(token, subject)` pairs.
    pub fn dev_token_entries(&self) -> Result<Vec<(String, String)>, ValidationError> {
        let Some(raw) = self.dev_tokens.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once('=') {
                Some((token, subject)) if !token.trim().is_empty() && !subject.trim().is_empty() => {
                    Ok((token.trim().to_string(), subject.trim().to_string()))
                }
                _ => Err(ValidationError::InvalidDevToken(entry.to_string())),
            })
            .collect()
    }

    /// Parses `bootstrap_admins` into subjects.
    pub fn bootstrap_admin_subjects(&self) -> Vec<String> {
        self.bootstrap_admins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate authentication configuration
    ///
    /// Production requires an HTTPS issuer and rejects development tokens.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let dev_tokens = self.dev_token_entries()?;

        if *environment == Environment::Production && !dev_tokens.is_empty() {
            return Err(ValidationError::DevTokensInProduction);
        }

        if self.has_oidc() {
            if self.audience.as_ref().map_or(true, |a| a.trim().is_empty()) {
                return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
            }
            let issuer = self.issuer_url.as_deref().unwrap_or_default();
            if *environment == Environment::Production && !issuer.starts_with("https://") {
                return Err(ValidationError::AuthorityMustBeHttps);
            }
        } else if dev_tokens.is_empty() {
            return Err(ValidationError::NoAuthConfigured);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer_url: None,
            audience: None,
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
            dev_tokens: None,
            bootstrap_admins: None,
        }
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}
