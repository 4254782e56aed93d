//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` - validates Bearer tokens and injects the user into extensions
//! - `Caller` - extractor that requires authentication
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → Caller extractor reads from extensions
//! ```
//!
//! The middleware only establishes the external identity. Mapping the
//! subject to a provisioned, active platform user happens in the
//! application layer.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser, CommandMetadata};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Header set by the request-id layer.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Validates the `Authorization: Bearer <token>` header.
///
/// A missing header passes through without a user; handlers that need one
/// reject with 401 through [`Caller`]. A present but invalid token is
/// rejected here.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => auth_failure(&e),
    }
}

fn auth_failure(err: &AuthError) -> Response {
    let (status, body) = match err {
        AuthError::TokenExpired => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::unauthenticated("Token expired"),
        ),
        AuthError::InvalidToken => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::unauthenticated("Invalid token"),
        ),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!(error = %msg, "Auth service unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("AUTH_UNAVAILABLE", "Authentication service unavailable"),
            )
        }
    };
    (status, Json(body)).into_response()
}

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: AuthenticatedUser,
    pub request_id: Option<String>,
}

impl Caller {
    /// Command metadata for mutations issued by this caller.
    pub fn metadata(&self) -> CommandMetadata {
        let metadata = CommandMetadata::new(self.user.id.clone()).with_source("http");
        match &self.request_id {
            Some(id) => metadata.with_correlation_id(id.clone()),
            None => metadata,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthRejection::Unauthenticated)?;
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(Caller { user, request_id })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthenticated("Authentication required")),
            )
                .into_response(),
        }
    }
}
