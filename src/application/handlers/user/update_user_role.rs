//! UpdateUserRoleHandler - admin-gated role assignment.

use std::sync::Arc;

use serde_json::json;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::foundation::{CommandMetadata, Role, UserId};
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Command to change another user's role.
///
/// `jurisdiction` is required with `Role::Regulator` and cleared otherwise.
#[derive(Debug, Clone)]
pub struct UpdateUserRoleCommand {
    pub target_id: UserId,
    pub role: Role,
    pub jurisdiction: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateUserRoleResult {
    pub user: User,
    pub previous_role: Role,
}

pub struct UpdateUserRoleHandler {
    users: Arc<dyn UserRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl UpdateUserRoleHandler {
    pub fn new(users: Arc<dyn UserRepository>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { users, guard }
    }

    pub async fn handle(
        &self,
        cmd: UpdateUserRoleCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateUserRoleResult, UserError> {
        // 1. Authorize
        let admin = self
            .guard
            .require_role(&metadata.user_id, &Role::ADMINS, AccessMode::Mutation)
            .await?;
        if admin.user_id == cmd.target_id {
            return Err(UserError::SelfModification);
        }

        // 2. Load target
        let mut user = self
            .users
            .find_by_id(&cmd.target_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.target_id.clone()))?;
        let previous_jurisdiction = user.jurisdiction().map(str::to_string);

        // 3. Apply
        let previous_role = user.change_role(cmd.role, cmd.jurisdiction)?;

        // 4. Persist with audit
        let audit = AuditRecord::by(&admin.user_id, AuditAction::UserRoleUpdated)
            .on("user", user.id())
            .with_transition(
                json!({ "role": previous_role.as_str(), "jurisdiction": previous_jurisdiction }),
                json!({ "role": user.role().as_str(), "jurisdiction": user.jurisdiction() }),
            )
            .with_metadata(json!({ "correlationId": metadata.correlation_id() }));
        self.users.update(&user, &audit).await?;

        tracing::info!(
            admin_id = %admin.user_id,
            target_id = %user.id(),
            from = %previous_role,
            to = %user.role(),
            "User role updated"
        );

        Ok(UpdateUserRoleResult {
            user,
            previous_role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::audit::AuditQuery;

    fn handler(ctx: &TestContext) -> UpdateUserRoleHandler {
        UpdateUserRoleHandler::new(ctx.store.clone(), ctx.guard.clone())
    }

    fn command(target: &UserId, role: Role, jurisdiction: Option<&str>) -> UpdateUserRoleCommand {
        UpdateUserRoleCommand {
            target_id: target.clone(),
            role,
            jurisdiction: jurisdiction.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn admin_assigns_regulator_with_jurisdiction() {
        let ctx = TestContext::new();
        let admin = ctx.user("admin", Role::Admin).await;
        let target = ctx.user("target", Role::User).await;

        let result = handler(&ctx)
            .handle(command(&target, Role::Regulator, Some("Lagos")), meta(&admin))
            .await
            .unwrap();

        assert_eq!(result.previous_role, Role::User);
        assert_eq!(result.user.role(), Role::Regulator);
        assert_eq!(result.user.jurisdiction(), Some("Lagos"));

        let entries = ctx
            .audit_entries(AuditQuery {
                action: Some(AuditAction::UserRoleUpdated),
                ..Default::default()
            })
            .await;
        assert_eq!(entries.len(), 1);
        let record = &entries[0].record;
        assert_eq!(record.previous_state.as_ref().unwrap()["role"], "user");
        assert_eq!(record.new_state.as_ref().unwrap()["role"], "regulator");
        assert_eq!(record.new_state.as_ref().unwrap()["jurisdiction"], "Lagos");
    }

    #[tokio::test]
    async fn regulator_without_jurisdiction_fails_validation() {
        let ctx = TestContext::new();
        let admin = ctx.user("admin", Role::Admin).await;
        let target = ctx.user("target", Role::User).await;

        let err = handler(&ctx)
            .handle(command(&target, Role::Regulator, None), meta(&admin))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::ValidationFailed { ref field, .. } if field == "jurisdiction"));
    }

    #[tokio::test]
    async fn admin_cannot_change_own_role() {
        let ctx = TestContext::new();
        let admin = ctx.user("admin", Role::Admin).await;

        let err = handler(&ctx)
            .handle(command(&admin, Role::User, None), meta(&admin))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::SelfModification);
    }

    #[tokio::test]
    async fn non_admin_is_denied_and_audited() {
        let ctx = TestContext::new();
        let investor = ctx.user("investor", Role::Investor).await;
        let target = ctx.user("target", Role::User).await;

        let err = handler(&ctx)
            .handle(command(&target, Role::Admin, None), meta(&investor))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Unauthorized(_)));
        assert_eq!(
            ctx.count_action(AuditAction::UnauthorizedRoleEscalationAttempt).await,
            1
        );
        assert_eq!(ctx.count_action(AuditAction::UserRoleUpdated).await, 0);
    }

    #[tokio::test]
    async fn unknown_target_is_not_found() {
        let ctx = TestContext::new();
        let admin = ctx.user("admin", Role::SystemAdmin).await;

        let err = handler(&ctx)
            .handle(
                command(&UserId::new("ghost").unwrap(), Role::Investor, None),
                meta(&admin),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::NotFound(_)));
    }
}
