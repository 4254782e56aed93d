//! AuthorizationGuard - resolves callers and enforces access predicates.
//!
//! The predicates in `domain::foundation::authorization` only decide. The
//! guard adds the side effect: on mutation paths a denial is appended to the
//! audit log before the error is returned, on query paths it is only logged.

use std::sync::Arc;

use serde_json::json;

use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::business::BusinessProfile;
use crate::domain::connection::Connection;
use crate::domain::foundation::{
    check_jurisdiction, check_participant, check_role, jurisdiction_covers, AccessDecision,
    AccessError, Denial, DenialKind, Principal, Role, UserId,
};
use crate::domain::user::User;
use crate::ports::{AuditLog, UserRepository};

/// Whether a denial is recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Denials are audited before the error is returned.
    Mutation,
    /// Denials are logged only; queries never write.
    Query,
}

/// Loads principals and turns denials into audit entries and errors.
pub struct AuthorizationGuard {
    users: Arc<dyn UserRepository>,
    audit_log: Arc<dyn AuditLog>,
}

impl AuthorizationGuard {
    pub fn new(users: Arc<dyn UserRepository>, audit_log: Arc<dyn AuditLog>) -> Self {
        Self { users, audit_log }
    }

    /// Maps the authenticated subject to an active user.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` when the subject was never provisioned or the user
    ///   is suspended
    pub async fn resolve_principal(&self, subject: &UserId) -> Result<Principal, AccessError> {
        self.users
            .find_by_id(subject)
            .await?
            .filter(User::is_active)
            .map(|user| user.principal())
            .ok_or(AccessError::Unauthenticated)
    }

    /// Resolves the caller and requires one of `roles`.
    pub async fn require_role(
        &self,
        subject: &UserId,
        roles: &[Role],
        mode: AccessMode,
    ) -> Result<Principal, AccessError> {
        let principal = self.resolve_principal(subject).await?;
        self.enforce(&principal, check_role(&principal, roles), mode, None)
            .await?;
        Ok(principal)
    }

    /// Requires a regulator to be scoped to `scope`.
    pub async fn require_jurisdiction(
        &self,
        principal: &Principal,
        scope: &str,
        mode: AccessMode,
    ) -> Result<(), AccessError> {
        self.enforce(principal, check_jurisdiction(principal, scope), mode, None)
            .await
    }

    /// Requires a regulator to cover the business's country or state.
    pub async fn require_business_jurisdiction(
        &self,
        principal: &Principal,
        business: &BusinessProfile,
        mode: AccessMode,
    ) -> Result<(), AccessError> {
        let scopes = business.jurisdiction_scopes();
        let decision = if jurisdiction_covers(principal, &scopes) {
            AccessDecision::Granted
        } else {
            check_jurisdiction(principal, &scopes.join("/"))
        };
        self.enforce(
            principal,
            decision,
            mode,
            Some(("business", business.id().to_string())),
        )
        .await
    }

    /// Requires the caller to be one of the two connection parties.
    pub async fn require_participant(
        &self,
        principal: &Principal,
        connection: &Connection,
        mode: AccessMode,
    ) -> Result<(), AccessError> {
        let decision = check_participant(
            principal,
            connection.investor_id(),
            connection.business_owner_id(),
        );
        self.enforce(
            principal,
            decision,
            mode,
            Some(("connection", connection.id().to_string())),
        )
        .await
    }

    /// Requires the caller to own the business.
    pub async fn require_owner(
        &self,
        principal: &Principal,
        business: &BusinessProfile,
        mode: AccessMode,
    ) -> Result<(), AccessError> {
        let decision = if business.is_owner(&principal.user_id) {
            AccessDecision::Granted
        } else {
            AccessDecision::Denied(Denial {
                kind: DenialKind::Participant,
                reason: "Caller does not own this business".to_string(),
                metadata: json!({ "actualRole": principal.role.as_str() }),
            })
        };
        self.enforce(
            principal,
            decision,
            mode,
            Some(("business", business.id().to_string())),
        )
        .await
    }

    /// Participants may not act on an exchange step they performed themselves.
    pub async fn require_other_party(
        &self,
        principal: &Principal,
        acted_by: Option<&UserId>,
        reason: &str,
        entity: (&'static str, String),
    ) -> Result<(), AccessError> {
        let decision = if acted_by == Some(&principal.user_id) {
            AccessDecision::Denied(Denial {
                kind: DenialKind::Participant,
                reason: reason.to_string(),
                metadata: json!({ "actualRole": principal.role.as_str() }),
            })
        } else {
            AccessDecision::Granted
        };
        self.enforce(principal, decision, AccessMode::Mutation, Some(entity))
            .await
    }

    /// Applies a decision, auditing it in mutation mode.
    pub async fn enforce(
        &self,
        principal: &Principal,
        decision: AccessDecision,
        mode: AccessMode,
        entity: Option<(&'static str, String)>,
    ) -> Result<(), AccessError> {
        let denial = match decision.into_result() {
            Ok(()) => return Ok(()),
            Err(denial) => denial,
        };

        match mode {
            AccessMode::Mutation => {
                let mut record =
                    AuditRecord::by(&principal.user_id, AuditAction::for_denial(denial.kind))
                        .with_metadata(denial.metadata.clone());
                if let Some((entity_type, entity_id)) = entity {
                    record = record.on(entity_type, entity_id);
                }
                self.audit_log.append(&record).await?;
                tracing::warn!(
                    user_id = %principal.user_id,
                    kind = ?denial.kind,
                    reason = %denial.reason,
                    "Access denied"
                );
            }
            AccessMode::Query => {
                tracing::warn!(
                    user_id = %principal.user_id,
                    kind = ?denial.kind,
                    reason = %denial.reason,
                    "Query access denied"
                );
            }
        }
        Err(AccessError::Unauthorized(denial.reason))
    }
}
