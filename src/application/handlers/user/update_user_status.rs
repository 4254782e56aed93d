//! UpdateUserStatusHandler - suspension and reactivation.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::foundation::{CommandMetadata, Role, UserId};
use crate::domain::user::{User, UserError, UserStatus};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct UpdateUserStatusCommand {
    pub target_id: UserId,
    pub status: UserStatus,
}

#[derive(Debug, Clone)]
pub struct UpdateUserStatusResult {
    pub user: User,
    pub previous_status: UserStatus,
}

pub struct UpdateUserStatusHandler {
    users: Arc<dyn UserRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl UpdateUserStatusHandler {
    pub fn new(users: Arc<dyn UserRepository>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { users, guard }
    }

    pub async fn handle(
        &self,
        cmd: UpdateUserStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateUserStatusResult, UserError> {
        let admin = self
            .guard
            .require_role(&metadata.user_id, &Role::ADMINS, AccessMode::Mutation)
            .await?;
        if admin.user_id == cmd.target_id {
            return Err(UserError::SelfModification);
        }

        let mut user = self
            .users
            .find_by_id(&cmd.target_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.target_id.clone()))?;

        let previous_status = user.change_status(cmd.status)?;

        let audit = AuditRecord::by(&admin.user_id, AuditAction::UserStatusUpdated)
            .on("user", user.id())
            .with_transition(previous_status, user.status());
        self.users.update(&user, &audit).await?;

        tracing::info!(
            admin_id = %admin.user_id,
            target_id = %user.id(),
            status = user.status().as_str(),
            "User status updated"
        );

        Ok(UpdateUserStatusResult {
            user,
            previous_status,
        })
    }
}
