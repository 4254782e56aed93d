//! ListMilestonesHandler - milestones of one connection.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::foundation::{ConnectionId, UserId};
use crate::domain::milestone::{Milestone, MilestoneError};
use crate::ports::{ConnectionRepository, MilestoneRepository};

#[derive(Debug, Clone)]
pub struct ListMilestonesQuery {
    pub user_id: UserId,
    pub connection_id: ConnectionId,
}

pub struct ListMilestonesHandler {
    connections: Arc<dyn ConnectionRepository>,
    milestones: Arc<dyn MilestoneRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl ListMilestonesHandler {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        milestones: Arc<dyn MilestoneRepository>,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self {
            connections,
            milestones,
            guard,
        }
    }

    /// Ordered by deadline, then creation.
    pub async fn handle(&self, query: ListMilestonesQuery) -> Result<Vec<Milestone>, MilestoneError> {
        let principal = self.guard.resolve_principal(&query.user_id).await?;
        let connection = self
            .connections
            .find_by_id(&query.connection_id)
            .await?
            .ok_or(MilestoneError::ConnectionNotFound(query.connection_id))?;
        self.guard
            .require_participant(&principal, &connection, AccessMode::Query)
            .await?;

        Ok(self.milestones.list_by_connection(connection.id()).await?)
    }
}
