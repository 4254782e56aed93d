//! Milestone error types.

use crate::domain::foundation::{AccessError, ConnectionId, DomainError, ErrorCode, MilestoneId};

/// Errors raised by the milestone and milestone-document workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilestoneError {
    NotFound(MilestoneId),
    ConnectionNotFound(ConnectionId),
    Unauthenticated,
    Unauthorized(String),
    InvalidTransition(String),
    ValidationFailed { field: String, message: String },
    Conflict,
    Infrastructure(String),
}

impl MilestoneError {
    pub fn not_found(id: MilestoneId) -> Self {
        MilestoneError::NotFound(id)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            MilestoneError::NotFound(_) => ErrorCode::MilestoneNotFound,
            MilestoneError::ConnectionNotFound(_) => ErrorCode::ConnectionNotFound,
            MilestoneError::Unauthenticated => ErrorCode::Unauthenticated,
            MilestoneError::Unauthorized(_) => ErrorCode::Unauthorized,
            MilestoneError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            MilestoneError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MilestoneError::Conflict => ErrorCode::ConcurrentModification,
            MilestoneError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            MilestoneError::NotFound(id) => format!("Milestone not found: {}", id),
            MilestoneError::ConnectionNotFound(id) => format!("Connection not found: {}", id),
            MilestoneError::Unauthenticated => "Authentication required".to_string(),
            MilestoneError::Unauthorized(reason) => reason.clone(),
            MilestoneError::InvalidTransition(msg) => format!("Invalid state: {}", msg),
            MilestoneError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MilestoneError::Conflict => "Record was modified concurrently".to_string(),
            MilestoneError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MilestoneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MilestoneError {}

impl From<AccessError> for MilestoneError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => MilestoneError::Unauthenticated,
            AccessError::Unauthorized(reason) => MilestoneError::Unauthorized(reason),
            AccessError::Infrastructure(msg) => MilestoneError::Infrastructure(msg),
        }
    }
}

impl From<DomainError> for MilestoneError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => MilestoneError::InvalidTransition(err.message),
            code if code.is_validation() => MilestoneError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::ConcurrentModification => MilestoneError::Conflict,
            ErrorCode::Unauthorized => MilestoneError::Unauthorized(err.message),
            _ => MilestoneError::Infrastructure(err.to_string()),
        }
    }
}
