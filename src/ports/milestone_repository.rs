//! Milestone repository port.

use async_trait::async_trait;

use crate::domain::audit::AuditRecord;
use crate::domain::foundation::{ConnectionId, DomainError, MilestoneId};
use crate::domain::milestone::Milestone;

#[async_trait]
pub trait MilestoneRepository: Send + Sync {
    async fn insert(&self, milestone: &Milestone, audit: &AuditRecord) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `MilestoneNotFound` if the milestone doesn't exist
    /// - `ConcurrentModification` on a version mismatch
    async fn update(&self, milestone: &Milestone, audit: &AuditRecord) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &MilestoneId) -> Result<Option<Milestone>, DomainError>;

    /// Milestones of a connection ordered by deadline, then creation.
    async fn list_by_connection(&self, connection_id: &ConnectionId) -> Result<Vec<Milestone>, DomainError>;
}
