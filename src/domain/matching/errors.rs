//! Matching error types.

use crate::domain::foundation::{AccessError, BusinessId, DomainError, ErrorCode, UserId};

/// Errors raised by match queries and dismissals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    /// The investor has not saved preferences yet.
    PreferencesNotFound(UserId),
    BusinessNotFound(BusinessId),
    Unauthenticated,
    Unauthorized(String),
    ValidationFailed { field: String, message: String },
    Conflict,
    Infrastructure(String),
}

impl MatchingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MatchingError::PreferencesNotFound(_) => ErrorCode::PreferencesNotFound,
            MatchingError::BusinessNotFound(_) => ErrorCode::BusinessNotFound,
            MatchingError::Unauthenticated => ErrorCode::Unauthenticated,
            MatchingError::Unauthorized(_) => ErrorCode::Unauthorized,
            MatchingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MatchingError::Conflict => ErrorCode::ConcurrentModification,
            MatchingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            MatchingError::PreferencesNotFound(id) => {
                format!("No investor preferences for user: {}", id)
            }
            MatchingError::BusinessNotFound(id) => format!("Business not found: {}", id),
            MatchingError::Unauthenticated => "Authentication required".to_string(),
            MatchingError::Unauthorized(reason) => reason.clone(),
            MatchingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MatchingError::Conflict => "Preferences were modified concurrently".to_string(),
            MatchingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MatchingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MatchingError {}

impl From<AccessError> for MatchingError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => MatchingError::Unauthenticated,
            AccessError::Unauthorized(reason) => MatchingError::Unauthorized(reason),
            AccessError::Infrastructure(msg) => MatchingError::Infrastructure(msg),
        }
    }
}

impl From<DomainError> for MatchingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            code if code.is_validation() => MatchingError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::ConcurrentModification => MatchingError::Conflict,
            _ => MatchingError::Infrastructure(err.to_string()),
        }
    }
}
