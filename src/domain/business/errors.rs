//! Business and verification error types.

use crate::domain::foundation::{
    AccessError, BusinessId, DocumentId, DomainError, ErrorCode, UserId,
};

/// Errors raised by business profile and verification operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusinessError {
    NotFound(BusinessId),
    /// The owner has not created a profile yet.
    NoProfile(UserId),
    DocumentNotFound(DocumentId),
    Unauthenticated,
    Unauthorized(String),
    InvalidTransition(String),
    ValidationFailed { field: String, message: String },
    Conflict,
    Infrastructure(String),
}

impl BusinessError {
    pub fn not_found(id: BusinessId) -> Self {
        BusinessError::NotFound(id)
    }

    pub fn document_not_found(id: DocumentId) -> Self {
        BusinessError::DocumentNotFound(id)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BusinessError::NotFound(_) | BusinessError::NoProfile(_) => ErrorCode::BusinessNotFound,
            BusinessError::DocumentNotFound(_) => ErrorCode::DocumentNotFound,
            BusinessError::Unauthenticated => ErrorCode::Unauthenticated,
            BusinessError::Unauthorized(_) => ErrorCode::Unauthorized,
            BusinessError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            BusinessError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BusinessError::Conflict => ErrorCode::ConcurrentModification,
            BusinessError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            BusinessError::NotFound(id) => format!("Business not found: {}", id),
            BusinessError::NoProfile(owner) => {
                format!("No business profile for user: {}", owner)
            }
            BusinessError::DocumentNotFound(id) => format!("Document not found: {}", id),
            BusinessError::Unauthenticated => "Authentication required".to_string(),
            BusinessError::Unauthorized(reason) => reason.clone(),
            BusinessError::InvalidTransition(msg) => format!("Invalid state: {}", msg),
            BusinessError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BusinessError::Conflict => "Record was modified concurrently".to_string(),
            BusinessError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for BusinessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BusinessError {}

impl From<AccessError> for BusinessError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => BusinessError::Unauthenticated,
            AccessError::Unauthorized(reason) => BusinessError::Unauthorized(reason),
            AccessError::Infrastructure(msg) => BusinessError::Infrastructure(msg),
        }
    }
}

impl From<DomainError> for BusinessError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => BusinessError::InvalidTransition(err.message),
            code if code.is_validation() => BusinessError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::ConcurrentModification => BusinessError::Conflict,
            _ => BusinessError::Infrastructure(err.to_string()),
        }
    }
}
