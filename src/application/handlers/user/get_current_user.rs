//! GetCurrentUserHandler - Query handler for the caller's own account.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Query for the authenticated caller.
#[derive(Debug, Clone)]
pub struct GetCurrentUserQuery {
    pub user_id: UserId,
}

pub struct GetCurrentUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetCurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns the caller's account.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if the caller was never provisioned or is suspended
    pub async fn handle(&self, query: GetCurrentUserQuery) -> Result<User, UserError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .filter(User::is_active)
            .ok_or(UserError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::TestContext;
    use crate::domain::foundation::Role;
    use crate::domain::user::UserStatus;

    #[tokio::test]
    async fn returns_active_user() {
        let ctx = TestContext::new();
        let id = ctx.user("investor", Role::Investor).await;
        let handler = GetCurrentUserHandler::new(ctx.store.clone());

        let user = handler
            .handle(GetCurrentUserQuery { user_id: id })
            .await
            .unwrap();
        assert_eq!(user.role(), Role::Investor);
    }

    #[tokio::test]
    async fn unprovisioned_subject_is_unauthenticated() {
        let ctx = TestContext::new();
        let handler = GetCurrentUserHandler::new(ctx.store.clone());

        let err = handler
            .handle(GetCurrentUserQuery {
                user_id: UserId::new("nobody").unwrap(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, UserError::Unauthenticated);
    }

    #[tokio::test]
    async fn suspended_user_is_unauthenticated() {
        let ctx = TestContext::new();
        let id = ctx.user("investor", Role::Investor).await;
        ctx.set_status(&id, UserStatus::Suspended).await;
        let handler = GetCurrentUserHandler::new(ctx.store.clone());

        let err = handler
            .handle(GetCurrentUserQuery { user_id: id })
            .await
            .unwrap_err();
        assert_eq!(err, UserError::Unauthenticated);
    }
}
