//! ProposeMilestoneHandler - a participant proposes a deliverable.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::foundation::{CommandMetadata, ConnectionId, MilestoneId, Timestamp};
use crate::domain::milestone::{Milestone, MilestoneError, MilestoneProposal};
use crate::ports::{ConnectionRepository, MilestoneRepository};

#[derive(Debug, Clone)]
pub struct ProposeMilestoneCommand {
    pub connection_id: ConnectionId,
    pub proposal: MilestoneProposal,
}

pub struct ProposeMilestoneHandler {
    connections: Arc<dyn ConnectionRepository>,
    milestones: Arc<dyn MilestoneRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl ProposeMilestoneHandler {
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

    /// # Errors
    ///
    /// - `ConnectionNotFound` if the connection doesn't exist
    /// - `Unauthorized` if the caller is not a participant (audited)
    /// - `InvalidTransition` on a closed connection
    /// - `ValidationFailed` for a blank title or a past deadline
    pub async fn handle(
        &self,
        cmd: ProposeMilestoneCommand,
        metadata: CommandMetadata,
    ) -> Result<Milestone, MilestoneError> {
        let principal = self.guard.resolve_principal(&metadata.user_id).await?;
        let connection = self
            .connections
            .find_by_id(&cmd.connection_id)
            .await?
            .ok_or(MilestoneError::ConnectionNotFound(cmd.connection_id))?;
        self.guard
            .require_participant(&principal, &connection, AccessMode::Mutation)
            .await?;

        let today = Timestamp::now().date();
        let milestone = Milestone::propose(
            MilestoneId::new(),
            &connection,
            principal.user_id.clone(),
            cmd.proposal,
            today,
        )?;
        let audit = AuditRecord::by(&principal.user_id, AuditAction::MilestoneProposed)
            .on("milestone", milestone.id())
            .with_new_state(milestone.status())
            .with_metadata(serde_json::json!({
                "connectionId": connection.id().to_string(),
                "deadline": milestone.deadline().to_string(),
            }));
        self.milestones.insert(&milestone, &audit).await?;

        tracing::info!(
            milestone_id = %milestone.id(),
            connection_id = %connection.id(),
            "Milestone proposed"
        );
        Ok(milestone)
    }
}
