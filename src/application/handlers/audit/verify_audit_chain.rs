//! VerifyAuditChainHandler - recomputes every hash in the audit chain.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditSigner, ChainVerification};
use crate::domain::foundation::{AccessError, Role, UserId};
use crate::ports::AuditLog;

#[derive(Debug, Clone)]
pub struct VerifyAuditChainQuery {
    pub user_id: UserId,
}

pub struct VerifyAuditChainHandler {
    audit_log: Arc<dyn AuditLog>,
    signer: AuditSigner,
    guard: Arc<AuthorizationGuard>,
}

impl VerifyAuditChainHandler {
    pub fn new(
        audit_log: Arc<dyn AuditLog>,
        signer: AuditSigner,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self {
            audit_log,
            signer,
            guard,
        }
    }

    pub async fn handle(&self, query: VerifyAuditChainQuery) -> Result<ChainVerification, AccessError> {
        self.guard
            .require_role(&query.user_id, &Role::ADMINS, AccessMode::Query)
            .await?;

        let entries = self.audit_log.all_in_order().await?;
        let result = self.signer.verify_chain(&entries);
        if result.valid {
            tracing::info!(entries = result.entries_checked, "Audit chain verified");
        }
        Ok(result)
    }
}
