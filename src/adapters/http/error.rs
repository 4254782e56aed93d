//! Error bodies and the error code to HTTP status mapping.
//!
//! Every failure leaves the API as `{ "code": ..., "message": ... }`.

use std::str::FromStr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::business::BusinessError;
use crate::domain::connection::ConnectionError;
use crate::domain::foundation::{AccessError, ErrorCode};
use crate::domain::matching::MatchingError;
use crate::domain::milestone::MilestoneError;
use crate::domain::user::UserError;

/// Standard error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthenticated.to_string(), message)
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::Unauthorized => StatusCode::FORBIDDEN,
        ErrorCode::InvalidStateTransition | ErrorCode::ConcurrentModification => {
            StatusCode::CONFLICT
        }
        c if c.is_not_found() => StatusCode::NOT_FOUND,
        c if c.is_validation() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error returned by every API handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn from_code(code: ErrorCode, message: String) -> Self {
        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(code = %code, error = %message, "Request failed");
            // Infrastructure detail stays in the log.
            return Self {
                status,
                body: ErrorResponse::new(code.to_string(), "Internal server error"),
            };
        }
        Self {
            status,
            body: ErrorResponse::new(code.to_string(), message),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::bad_request(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

macro_rules! impl_from_module_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl From<$error> for ApiError {
                fn from(err: $error) -> Self {
                    ApiError::from_code(err.code(), err.message())
                }
            }
        )*
    };
}

impl_from_module_error!(
    AccessError,
    UserError,
    BusinessError,
    MatchingError,
    ConnectionError,
    MilestoneError,
);

/// Parses a path segment into a typed identifier.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse::<T>()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID", what)))
}
