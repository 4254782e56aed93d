//! Bearer token validation.
//!
//! Login happens at the identity provider. This port turns the token it
//! issued into the subject Bridgeway keys users by; whether that subject is
//! a provisioned, active user is decided by the `AuthorizationGuard`.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Implementations check signature, issuer, audience and expiry.
///
/// - malformed token or bad signature: `AuthError::InvalidToken`
/// - valid signature past `exp`: `AuthError::TokenExpired`
/// - key set or provider unreachable: `AuthError::ServiceUnavailable`
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the raw JWT without the `Bearer ` prefix.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    struct FixedSubject;

    #[async_trait]
    impl SessionValidator for FixedSubject {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            match token {
                "expired" => Err(AuthError::TokenExpired),
                "investor-jwt" => Ok(AuthenticatedUser::new(
                    UserId::new("auth0|investor").unwrap(),
                    None,
                    None,
                )),
                _ => Err(AuthError::InvalidToken),
            }
        }
    }

    #[tokio::test]
    async fn usable_as_a_shared_trait_object() {
        let validator: std::sync::Arc<dyn SessionValidator> = std::sync::Arc::new(FixedSubject);

        let user = validator.validate("investor-jwt").await.unwrap();
        assert_eq!(user.id.as_str(), "auth0|investor");
        assert!(matches!(validator.validate("expired").await, Err(AuthError::TokenExpired)));
        assert!(matches!(validator.validate("junk").await, Err(AuthError::InvalidToken)));
    }
}
