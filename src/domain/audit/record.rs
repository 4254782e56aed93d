//! Audit records and sealed log entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{AuditEntryId, Timestamp, UserId};

use super::AuditAction;

/// An audit entry before it is sealed into the log.
///
/// Stores attach exactly one record to each mutation and write both
/// in the same transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: AuditEntryId,
    pub actor_id: Option<UserId>,
    pub action: AuditAction,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub previous_state: Option<Value>,
    pub new_state: Option<Value>,
    pub metadata: Value,
    pub timestamp: Timestamp,
}

impl AuditRecord {
    pub fn new(actor_id: Option<UserId>, action: AuditAction) -> Self {
        Self {
            id: AuditEntryId::new(),
            actor_id,
            action,
            entity_type: None,
            entity_id: None,
            previous_state: None,
            new_state: None,
            metadata: Value::Object(Default::default()),
            timestamp: Timestamp::now(),
        }
    }

    /// Record attributed to a known actor.
    pub fn by(actor_id: &UserId, action: AuditAction) -> Self {
        Self::new(Some(actor_id.clone()), action)
    }

    pub fn on(mut self, entity_type: &str, entity_id: impl ToString) -> Self {
        self.entity_type = Some(entity_type.to_string());
        self.entity_id = Some(entity_id.to_string());
        self
    }

    pub fn with_transition(mut self, previous: impl Serialize, new: impl Serialize) -> Self {
        self.previous_state = serde_json::to_value(previous).ok();
        self.new_state = serde_json::to_value(new).ok();
        self
    }

    pub fn with_new_state(mut self, new: impl Serialize) -> Self {
        self.new_state = serde_json::to_value(new).ok();
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Sealed, immutable audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Position in the chain, starting at 1.
    pub sequence: u64,
    #[serde(flatten)]
    pub record: AuditRecord,
    pub previous_hash: String,
    pub hash: String,
}

impl AuditLogEntry {
    pub fn id(&self) -> &AuditEntryId {
        &self.record.id
    }

    pub fn action(&self) -> AuditAction {
        self.record.action
    }

    pub fn actor_id(&self) -> Option<&UserId> {
        self.record.actor_id.as_ref()
    }
}

/// Filter for audit log queries.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuditQuery {
    pub actor_id: Option<UserId>,
    pub action: Option<AuditAction>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub limit: Option<usize>,
}

impl AuditQuery {
    pub const DEFAULT_LIMIT: usize = 100;
    pub const MAX_LIMIT: usize = 1000;

    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        let record = &entry.record;
        self.actor_id
            .as_ref()
            .map_or(true, |a| record.actor_id.as_ref() == Some(a))
            && self.action.map_or(true, |a| record.action == a)
            && self
                .entity_type
                .as_ref()
                .map_or(true, |t| record.entity_type.as_ref() == Some(t))
            && self
                .entity_id
                .as_ref()
                .map_or(true, |i| record.entity_id.as_ref() == Some(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn actor() -> UserId {
        UserId::new("admin-1").unwrap()
    }

    #[test]
    fn builder_sets_entity_and_transition() {
        let record = AuditRecord::by(&actor(), AuditAction::ConnectionStatusChanged)
            .on("connection", "c-1")
            .with_transition("lead", "connected");

        assert_eq!(record.entity_type.as_deref(), Some("connection"));
        assert_eq!(record.entity_id.as_deref(), Some("c-1"));
        assert_eq!(record.previous_state, Some(json!("lead")));
        assert_eq!(record.new_state, Some(json!("connected")));
    }

    #[test]
    fn metadata_defaults_to_empty_object() {
        let record = AuditRecord::new(None, AuditAction::UserProvisioned);
        assert_eq!(record.metadata, json!({}));
    }

    #[test]
    fn query_limit_is_clamped() {
        let query = AuditQuery {
            limit: Some(50_000),
            ..Default::default()
        };
        assert_eq!(query.effective_limit(), AuditQuery::MAX_LIMIT);
        assert_eq!(AuditQuery::default().effective_limit(), 100);
    }

    #[test]
    fn query_matches_on_action_and_actor() {
        let entry = AuditLogEntry {
            sequence: 1,
            record: AuditRecord::by(&actor(), AuditAction::MatchDismissed),
            previous_hash: String::new(),
            hash: String::new(),
        };
        let query = AuditQuery {
            actor_id: Some(actor()),
            action: Some(AuditAction::MatchDismissed),
            ..Default::default()
        };
        assert!(query.matches(&entry));

        let other = AuditQuery {
            action: Some(AuditAction::UserRoleUpdated),
            ..Default::default()
        };
        assert!(!other.matches(&entry));
    }
}
