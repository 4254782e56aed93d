use async_trait::async_trait;

use super::{check_version, InMemoryStore};
use crate::domain::audit::AuditRecord;
use crate::domain::foundation::{ConnectionId, DomainError, ErrorCode, MilestoneId};
use crate::domain::milestone::Milestone;
use crate::ports::MilestoneRepository;

#[async_trait]
impl MilestoneRepository for InMemoryStore {
    async fn insert(&self, milestone: &Milestone, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.milestones.push(milestone.clone());
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn update(&self, milestone: &Milestone, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let slot = state
            .milestones
            .iter_mut()
            .find(|m| m.id() == milestone.id())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::MilestoneNotFound,
                    format!("Milestone not found: {}", milestone.id()),
                )
            })?;
        check_version(slot.version(), milestone.version(), "Milestone")?;
        *slot = milestone.clone();
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn find_by_id(&self, id: &MilestoneId) -> Result<Option<Milestone>, DomainError> {
        let state = self.state.read().await;
        Ok(state.milestones.iter().find(|m| m.id() == id).cloned())
    }

    async fn list_by_connection(&self, connection_id: &ConnectionId) -> Result<Vec<Milestone>, DomainError> {
        let state = self.state.read().await;
        let mut milestones: Vec<Milestone> = state
            .milestones
            .iter()
            .filter(|m| m.connection_id() == connection_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal deadlines.
        milestones.sort_by_key(|m| m.deadline());
        Ok(milestones)
    }
}
