//! Milestone handlers.

mod agree_to_milestone;
mod list_milestones;
mod propose_milestone;
mod submit_milestone_document;
mod verify_milestone_document;

pub use agree_to_milestone::{AgreeToMilestoneCommand, AgreeToMilestoneHandler};
pub use list_milestones::{ListMilestonesHandler, ListMilestonesQuery};
pub use propose_milestone::{ProposeMilestoneCommand, ProposeMilestoneHandler};
pub use submit_milestone_document::{SubmitMilestoneDocumentCommand, SubmitMilestoneDocumentHandler};
pub use verify_milestone_document::{VerifyMilestoneDocumentCommand, VerifyMilestoneDocumentHandler};

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::foundation::{MilestoneId, Principal, UserId};
use crate::domain::milestone::{Milestone, MilestoneError};
use crate::ports::{ConnectionRepository, MilestoneRepository};

/// Loads a milestone whose connection the caller participates in.
async fn load_for_participant(
    guard: &AuthorizationGuard,
    connections: &dyn ConnectionRepository,
    milestones: &dyn MilestoneRepository,
    user_id: &UserId,
    milestone_id: MilestoneId,
) -> Result<(Principal, Milestone), MilestoneError> {
    let principal = guard.resolve_principal(user_id).await?;
    let milestone = milestones
        .find_by_id(&milestone_id)
        .await?
        .ok_or(MilestoneError::NotFound(milestone_id))?;
    let connection = connections
        .find_by_id(milestone.connection_id())
        .await?
        .ok_or(MilestoneError::ConnectionNotFound(*milestone.connection_id()))?;
    guard
        .require_participant(&principal, &connection, AccessMode::Mutation)
        .await?;
    Ok((principal, milestone))
}
