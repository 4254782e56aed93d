//! ProvisionUserHandler - first-login account creation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata, UserId};
use crate::domain::user::{User, UserError};
use crate::ports::{SaveResult, UserRepository};

/// Command to create the caller's account if it does not exist yet.
#[derive(Debug, Clone)]
pub struct ProvisionUserCommand {
    pub identity: AuthenticatedUser,
}

#[derive(Debug, Clone)]
pub struct ProvisionUserResult {
    pub user: User,
    /// False when the account already existed.
    pub created: bool,
}

/// Handler for provisioning users. Idempotent.
pub struct ProvisionUserHandler {
    users: Arc<dyn UserRepository>,
    bootstrap_admins: Arc<HashSet<UserId>>,
}

impl ProvisionUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            bootstrap_admins: Arc::default(),
        }
    }

    /// Subjects that start as `admin` instead of `user`. Only applies to
    /// accounts that do not exist yet.
    pub fn with_bootstrap_admins(mut self, subjects: Arc<HashSet<UserId>>) -> Self {
        self.bootstrap_admins = subjects;
        self
    }

    pub async fn handle(
        &self,
        cmd: ProvisionUserCommand,
        metadata: CommandMetadata,
    ) -> Result<ProvisionUserResult, UserError> {
        if let Some(existing) = self.users.find_by_id(&cmd.identity.id).await? {
            return Ok(ProvisionUserResult {
                user: existing,
                created: false,
            });
        }

        let user = if self.bootstrap_admins.contains(&cmd.identity.id) {
            User::provision_admin(&cmd.identity)
        } else {
            User::provision(&cmd.identity)
        };
        let audit = AuditRecord::by(&metadata.user_id, AuditAction::UserProvisioned)
            .on("user", user.id())
            .with_new_state(serde_json::json!({
                "role": user.role().as_str(),
                "status": user.status().as_str(),
            }));

        // A concurrent first login may have won the insert.
        match self.users.insert_if_absent(&user, &audit).await? {
            SaveResult::Inserted => {
                tracing::info!(user_id = %user.id(), "User provisioned");
                Ok(ProvisionUserResult {
                    user,
                    created: true,
                })
            }
            SaveResult::AlreadyExists(existing) => Ok(ProvisionUserResult {
                user: existing,
                created: false,
            }),
        }
    }
}
