//! User-specific error types.

use crate::domain::foundation::{AccessError, DomainError, ErrorCode, UserId};

/// User management errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    NotFound(UserId),
    Unauthenticated,
    Unauthorized(String),
    /// Admins may not change their own role or status.
    SelfModification,
    InvalidTransition(String),
    ValidationFailed { field: String, message: String },
    Conflict,
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(id: UserId) -> Self {
        UserError::NotFound(id)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::Unauthenticated => ErrorCode::Unauthenticated,
            UserError::Unauthorized(_) | UserError::SelfModification => ErrorCode::Unauthorized,
            UserError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::Conflict => ErrorCode::ConcurrentModification,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(id) => format!("User not found: {}", id),
            UserError::Unauthenticated => "Authentication required".to_string(),
            UserError::Unauthorized(reason) => reason.clone(),
            UserError::SelfModification => {
                "Administrators cannot change their own role or status".to_string()
            }
            UserError::InvalidTransition(msg) => format!("Invalid state: {}", msg),
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::Conflict => "User was modified concurrently".to_string(),
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<AccessError> for UserError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => UserError::Unauthenticated,
            AccessError::Unauthorized(reason) => UserError::Unauthorized(reason),
            AccessError::Infrastructure(msg) => UserError::Infrastructure(msg),
        }
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => UserError::InvalidTransition(err.message),
            code if code.is_validation() => UserError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::ConcurrentModification => UserError::Conflict,
            ErrorCode::Unauthorized => UserError::Unauthorized(err.message),
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}
