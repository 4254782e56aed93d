//! Connection error types.

use crate::domain::foundation::{
    AccessError, BusinessId, ConnectionId, DomainError, ErrorCode, MessageId,
};

/// Errors raised by connection lifecycle and messaging operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    NotFound(ConnectionId),
    BusinessNotFound(BusinessId),
    MessageNotFound(MessageId),
    Unauthenticated,
    Unauthorized(String),
    InvalidTransition(String),
    ValidationFailed { field: String, message: String },
    Conflict,
    Infrastructure(String),
}

impl ConnectionError {
    pub fn not_found(id: ConnectionId) -> Self {
        ConnectionError::NotFound(id)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ConnectionError::NotFound(_) => ErrorCode::ConnectionNotFound,
            ConnectionError::BusinessNotFound(_) => ErrorCode::BusinessNotFound,
            ConnectionError::MessageNotFound(_) => ErrorCode::MessageNotFound,
            ConnectionError::Unauthenticated => ErrorCode::Unauthenticated,
            ConnectionError::Unauthorized(_) => ErrorCode::Unauthorized,
            ConnectionError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            ConnectionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ConnectionError::Conflict => ErrorCode::ConcurrentModification,
            ConnectionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ConnectionError::NotFound(id) => format!("Connection not found: {}", id),
            ConnectionError::BusinessNotFound(id) => format!("Business not found: {}", id),
            ConnectionError::MessageNotFound(id) => format!("Message not found: {}", id),
            ConnectionError::Unauthenticated => "Authentication required".to_string(),
            ConnectionError::Unauthorized(reason) => reason.clone(),
            ConnectionError::InvalidTransition(msg) => format!("Invalid state: {}", msg),
            ConnectionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ConnectionError::Conflict => "Record was modified concurrently".to_string(),
            ConnectionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConnectionError {}

impl From<AccessError> for ConnectionError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => ConnectionError::Unauthenticated,
            AccessError::Unauthorized(reason) => ConnectionError::Unauthorized(reason),
            AccessError::Infrastructure(msg) => ConnectionError::Infrastructure(msg),
        }
    }
}

impl From<DomainError> for ConnectionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => ConnectionError::InvalidTransition(err.message),
            code if code.is_validation() => ConnectionError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::ConcurrentModification => ConnectionError::Conflict,
            ErrorCode::Unauthorized => ConnectionError::Unauthorized(err.message),
            _ => ConnectionError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_connection_code() {
        let err = ConnectionError::not_found(ConnectionId::new());
        assert_eq!(err.code(), ErrorCode::ConnectionNotFound);
    }

    #[test]
    fn conflict_converts_from_concurrent_modification() {
        let err: ConnectionError =
            DomainError::new(ErrorCode::ConcurrentModification, "stale").into();
        assert_eq!(err, ConnectionError::Conflict);
    }
}
