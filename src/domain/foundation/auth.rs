//! Authentication types produced by the identity provider boundary.
//!
//! The login flow itself is external. Adapters behind the `SessionValidator`
//! port turn a bearer token into an `AuthenticatedUser`; everything past the
//! HTTP layer works with the subject it carries.

use super::UserId;
use thiserror::Error;

/// Identity asserted by a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Identity provider subject.
    pub id: UserId,

    /// Email claim, if the provider released one.
    pub email: Option<String>,

    /// `name` or `preferred_username` claim.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email,
            display_name,
        }
    }

    /// Display name, falling back to email and then the subject.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_else(|| self.id.as_str())
    }
}

/// Token validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// The identity provider could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefers_display_name() {
        let user = AuthenticatedUser::new(
            UserId::new("sub-1").unwrap(),
            Some("ada@example.com".to_string()),
            Some("Ada".to_string()),
        );
        assert_eq!(user.label(), "Ada");
    }

    #[test]
    fn label_falls_back_to_subject() {
        let user = AuthenticatedUser::new(UserId::new("sub-1").unwrap(), None, None);
        assert_eq!(user.label(), "sub-1");
    }

    #[test]
    fn only_service_unavailable_is_transient() {
        assert!(AuthError::service_unavailable("down").is_transient());
        assert!(!AuthError::TokenExpired.is_transient());
    }
}
