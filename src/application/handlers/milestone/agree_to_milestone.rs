//! AgreeToMilestoneHandler - the counter-party accepts a proposal.

use std::sync::Arc;

use super::load_for_participant;
use crate::application::AuthorizationGuard;
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::foundation::{CommandMetadata, MilestoneId};
use crate::domain::milestone::{Milestone, MilestoneError};
use crate::ports::{ConnectionRepository, MilestoneRepository};

#[derive(Debug, Clone)]
pub struct AgreeToMilestoneCommand {
    pub milestone_id: MilestoneId,
}

pub struct AgreeToMilestoneHandler {
    connections: Arc<dyn ConnectionRepository>,
    milestones: Arc<dyn MilestoneRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl AgreeToMilestoneHandler {
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

    /// `proposed -> agreed`, once, by the participant who did not propose.
    pub async fn handle(
        &self,
        cmd: AgreeToMilestoneCommand,
        metadata: CommandMetadata,
    ) -> Result<Milestone, MilestoneError> {
        let (principal, mut milestone) = load_for_participant(
            &self.guard,
            self.connections.as_ref(),
            self.milestones.as_ref(),
            &metadata.user_id,
            cmd.milestone_id,
        )
        .await?;

        let previous = milestone.agree(&principal.user_id)?;
        let audit = AuditRecord::by(&principal.user_id, AuditAction::MilestoneAgreed)
            .on("milestone", milestone.id())
            .with_transition(previous, milestone.status());
        self.milestones.update(&milestone, &audit).await?;

        tracing::info!(milestone_id = %milestone.id(), "Milestone agreed");
        Ok(milestone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::milestone::{ProposeMilestoneCommand, ProposeMilestoneHandler};
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::milestone::{fixtures::proposal, MilestoneStatus};

    async fn proposed_by_investor(ctx: &TestContext) -> (UserId, UserId, Milestone) {
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let connection = ctx.connection(&business, &investor).await;
        let milestone = ProposeMilestoneHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
            .handle(
                ProposeMilestoneCommand {
                    connection_id: *connection.id(),
                    proposal: proposal(false),
                },
                meta(&investor),
            )
            .await
            .unwrap();
        (investor, owner, milestone)
    }

    fn handler(ctx: &TestContext) -> AgreeToMilestoneHandler {
        AgreeToMilestoneHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
    }

    fn command(milestone: &Milestone) -> AgreeToMilestoneCommand {
        AgreeToMilestoneCommand {
            milestone_id: *milestone.id(),
        }
    }

    #[tokio::test]
    async fn proposer_cannot_agree() {
        let ctx = TestContext::new();
        let (investor, _, milestone) = proposed_by_investor(&ctx).await;

        let err = handler(&ctx)
            .handle(command(&milestone), meta(&investor))
            .await
            .unwrap_err();
        assert!(matches!(err, MilestoneError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn counter_party_agrees_exactly_once() {
        let ctx = TestContext::new();
        let (_, owner, milestone) = proposed_by_investor(&ctx).await;

        let agreed = handler(&ctx)
            .handle(command(&milestone), meta(&owner))
            .await
            .unwrap();
        assert_eq!(agreed.status(), MilestoneStatus::Agreed);
        assert_eq!(agreed.agreed_by(), Some(&owner));

        let err = handler(&ctx)
            .handle(command(&milestone), meta(&owner))
            .await
            .unwrap_err();
        assert!(matches!(err, MilestoneError::InvalidTransition(_)));

        let stored = MilestoneRepository::find_by_id(ctx.store.as_ref(), milestone.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.version(), agreed.version());
        assert_eq!(ctx.count_action(AuditAction::MilestoneAgreed).await, 1);
    }

    #[tokio::test]
    async fn outsider_is_denied() {
        let ctx = TestContext::new();
        let (_, _, milestone) = proposed_by_investor(&ctx).await;
        let outsider = ctx.user("outsider", Role::BusinessOwner).await;

        let err = handler(&ctx)
            .handle(command(&milestone), meta(&outsider))
            .await
            .unwrap_err();
        assert!(matches!(err, MilestoneError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_milestone_is_not_found() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let missing = MilestoneId::new();

        let err = handler(&ctx)
            .handle(AgreeToMilestoneCommand { milestone_id: missing }, meta(&owner))
            .await
            .unwrap_err();
        assert_eq!(err, MilestoneError::NotFound(missing));
    }
}
