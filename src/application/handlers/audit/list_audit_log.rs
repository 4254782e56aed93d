//! ListAuditLogHandler - filtered, newest-first audit queries.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditLogEntry, AuditQuery};
use crate::domain::foundation::{AccessError, Role, UserId};
use crate::ports::AuditLog;

/// Roles allowed to read the audit trail.
pub const AUDIT_READERS: [Role; 4] = [
    Role::Admin,
    Role::SystemAdmin,
    Role::Regulator,
    Role::DataAnalyst,
];

#[derive(Debug, Clone)]
pub struct ListAuditLogQuery {
    pub user_id: UserId,
    pub filter: AuditQuery,
}

pub struct ListAuditLogHandler {
    audit_log: Arc<dyn AuditLog>,
    guard: Arc<AuthorizationGuard>,
}

impl ListAuditLogHandler {
    pub fn new(audit_log: Arc<dyn AuditLog>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { audit_log, guard }
    }

    pub async fn handle(&self, query: ListAuditLogQuery) -> Result<Vec<AuditLogEntry>, AccessError> {
        self.guard
            .require_role(&query.user_id, &AUDIT_READERS, AccessMode::Query)
            .await?;
        Ok(self.audit_log.list(&query.filter).await?)
    }
}
