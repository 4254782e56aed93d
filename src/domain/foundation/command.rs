//! Command infrastructure for application handlers.
//!
//! Every handler accepts a single `CommandMetadata` instead of loose
//! `user_id`/`correlation_id` parameters. The metadata identifies the caller
//! (the identity provider subject) and is copied into audit records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Metadata context for command and query handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The authenticated subject executing this command.
    pub user_id: UserId,

    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "admin-cli").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata with required user ID.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> UserId {
        UserId::new("investor-1").unwrap()
    }

    #[test]
    fn new_has_no_optional_fields() {
        let metadata = CommandMetadata::new(subject());
        assert!(metadata.correlation_id_opt().is_none());
        assert!(metadata.source().is_none());
    }

    #[test]
    fn correlation_id_is_generated_when_missing() {
        let metadata = CommandMetadata::new(subject());
        assert!(Uuid::parse_str(&metadata.correlation_id()).is_ok());
    }

    #[test]
    fn builders_set_fields() {
        let metadata = CommandMetadata::new(subject())
            .with_correlation_id("req-42")
            .with_source("api");
        assert_eq!(metadata.correlation_id(), "req-42");
        assert_eq!(metadata.source(), Some("api"));
    }

    #[test]
    fn serialization_skips_empty_fields() {
        let json = serde_json::to_value(CommandMetadata::new(subject())).unwrap();
        assert_eq!(json, serde_json::json!({ "user_id": "investor-1" }));
    }
}
