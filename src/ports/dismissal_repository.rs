//! Match dismissal repository port. Append and exists only.

use std::collections::HashSet;

use async_trait::async_trait;

use super::SaveResult;
use crate::domain::audit::AuditRecord;
use crate::domain::foundation::{BusinessId, DomainError, UserId};
use crate::domain::matching::MatchDismissal;

#[async_trait]
pub trait DismissalRepository: Send + Sync {
    /// Inserts the pair. The audit record is only written on `Inserted`.
    async fn insert_if_absent(
        &self,
        dismissal: &MatchDismissal,
        audit: &AuditRecord,
    ) -> Result<SaveResult<MatchDismissal>, DomainError>;

    async fn dismissed_for(&self, investor_id: &UserId) -> Result<HashSet<BusinessId>, DomainError>;
}
