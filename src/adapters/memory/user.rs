use async_trait::async_trait;

use super::{check_version, InMemoryStore};
use crate::domain::audit::AuditRecord;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::{SaveResult, UserRepository};

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert_if_absent(&self, user: &User, audit: &AuditRecord) -> Result<SaveResult<User>, DomainError> {
        let mut state = self.state.write().await;
        if let Some(existing) = state.users.get(user.id()) {
            return Ok(SaveResult::AlreadyExists(existing.clone()));
        }
        state.users.insert(user.id().clone(), user.clone());
        state.append_audit(&self.signer, audit);
        Ok(SaveResult::Inserted)
    }

    async fn update(&self, user: &User, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state.users.get(user.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", user.id()))
        })?;
        check_version(stored.version(), user.version(), "User")?;
        state.users.insert(user.id().clone(), user.clone());
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_store;
    use super::*;
    use crate::domain::audit::AuditAction;
    use crate::domain::foundation::{AuthenticatedUser, Role};

    fn provisioned(id: &str) -> User {
        User::provision(&AuthenticatedUser::new(UserId::new(id).unwrap(), None, None))
    }

    #[tokio::test]
    async fn insert_if_absent_is_idempotent() {
        let store = test_store();
        let user = provisioned("sub-1");
        let audit = AuditRecord::by(user.id(), AuditAction::UserProvisioned);

        assert!(store.insert_if_absent(&user, &audit).await.unwrap().is_inserted());
        let second = store.insert_if_absent(&user, &audit).await.unwrap();
        assert!(matches!(second, SaveResult::AlreadyExists(_)));
        assert_eq!(store.audit_len().await, 1);
    }

    #[tokio::test]
    async fn stale_update_is_rejected_without_audit() {
        let store = test_store();
        let user = provisioned("sub-1");
        let audit = AuditRecord::by(user.id(), AuditAction::UserProvisioned);
        store.insert_if_absent(&user, &audit).await.unwrap();

        let mut first = user.clone();
        first.change_role(Role::Investor, None).unwrap();
        let mut second = user.clone();
        second.change_role(Role::BusinessOwner, None).unwrap();

        let role_audit = AuditRecord::by(user.id(), AuditAction::UserRoleUpdated);
        store.update(&first, &role_audit).await.unwrap();
        let err = store.update(&second, &role_audit).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrentModification);
        assert_eq!(store.audit_len().await, 2);

        let stored = store.find_by_id(user.id()).await.unwrap().unwrap();
        assert_eq!(stored.role(), Role::Investor);
    }
}
