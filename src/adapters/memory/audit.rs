use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::audit::{AuditLogEntry, AuditQuery, AuditRecord};
use crate::domain::foundation::DomainError;
use crate::ports::AuditLog;

#[async_trait]
impl AuditLog for InMemoryStore {
    async fn append(&self, record: &AuditRecord) -> Result<AuditLogEntry, DomainError> {
        let mut state = self.state.write().await;
        Ok(state.append_audit(&self.signer, record))
    }

    async fn list(&self, query: &AuditQuery) -> Result<Vec<AuditLogEntry>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .audit
            .iter()
            .rev()
            .filter(|e| query.matches(e))
            .take(query.effective_limit())
            .cloned()
            .collect())
    }

    async fn all_in_order(&self) -> Result<Vec<AuditLogEntry>, DomainError> {
        Ok(self.state.read().await.audit.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_store;
    use super::*;
    use crate::domain::audit::AuditAction;
    use crate::domain::foundation::UserId;

    #[tokio::test]
    async fn appends_form_a_valid_chain() {
        let store = test_store();
        let actor = UserId::new("admin").unwrap();
        for _ in 0..3 {
            store
                .append(&AuditRecord::by(&actor, AuditAction::UserRoleUpdated))
                .await
                .unwrap();
        }

        let entries = store.all_in_order().await.unwrap();
        assert_eq!(entries.iter().map(|e| e.sequence).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(store.signer.verify_chain(&entries).valid);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filtered() {
        let store = test_store();
        let actor = UserId::new("admin").unwrap();
        store
            .append(&AuditRecord::by(&actor, AuditAction::UserRoleUpdated))
            .await
            .unwrap();
        store
            .append(&AuditRecord::by(&actor, AuditAction::UserStatusUpdated))
            .await
            .unwrap();
        store
            .append(&AuditRecord::by(&actor, AuditAction::UserRoleUpdated))
            .await
            .unwrap();

        let query = AuditQuery {
            action: Some(AuditAction::UserRoleUpdated),
            ..Default::default()
        };
        let listed = store.list(&query).await.unwrap();
        assert_eq!(listed.iter().map(|e| e.sequence).collect::<Vec<_>>(), vec![3, 1]);
    }
}
