//! SubmitMilestoneDocumentHandler - attaches the deliverable document.

use std::sync::Arc;

use super::load_for_participant;
use crate::application::AuthorizationGuard;
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::foundation::{CommandMetadata, MilestoneId};
use crate::domain::milestone::{Milestone, MilestoneError};
use crate::ports::{ConnectionRepository, MilestoneRepository};

#[derive(Debug, Clone)]
pub struct SubmitMilestoneDocumentCommand {
    pub milestone_id: MilestoneId,
    pub document_url: String,
}

pub struct SubmitMilestoneDocumentHandler {
    connections: Arc<dyn ConnectionRepository>,
    milestones: Arc<dyn MilestoneRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl SubmitMilestoneDocumentHandler {
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

    pub async fn handle(
        &self,
        cmd: SubmitMilestoneDocumentCommand,
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
        self.guard
            .require_other_party(
                &principal,
                Some(milestone.proposed_by()),
                "The proposer cannot submit the milestone document",
                ("milestone", milestone.id().to_string()),
            )
            .await?;

        let previous = milestone.submit_document(cmd.document_url, &principal.user_id)?;
        let audit = AuditRecord::by(&principal.user_id, AuditAction::MilestoneDocumentSubmitted)
            .on("milestone", milestone.id())
            .with_transition(previous, milestone.document_status());
        self.milestones.update(&milestone, &audit).await?;
        Ok(milestone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::exchange::ExchangeStatus;
    use crate::domain::foundation::{Role, Timestamp, UserId};
    use crate::domain::milestone::fixtures::proposal;

    async fn stored_milestone(ctx: &TestContext, requires_document: bool) -> (UserId, UserId, Milestone) {
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let connection = ctx.connection(&business, &investor).await;
        let milestone = Milestone::propose(
            MilestoneId::new(),
            &connection,
            investor.clone(),
            proposal(requires_document),
            Timestamp::now().date(),
        )
        .unwrap();
        MilestoneRepository::insert(
            ctx.store.as_ref(),
            &milestone,
            &AuditRecord::by(&investor, AuditAction::MilestoneProposed),
        )
        .await
        .unwrap();
        (investor, owner, milestone)
    }

    fn handler(ctx: &TestContext) -> SubmitMilestoneDocumentHandler {
        SubmitMilestoneDocumentHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
    }

    fn command(milestone: &Milestone) -> SubmitMilestoneDocumentCommand {
        SubmitMilestoneDocumentCommand {
            milestone_id: *milestone.id(),
            document_url: "s3://docs/accounts.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn submission_moves_document_to_submitted() {
        let ctx = TestContext::new();
        let (_, owner, milestone) = stored_milestone(&ctx, true).await;

        let updated = handler(&ctx).handle(command(&milestone), meta(&owner)).await.unwrap();

        assert_eq!(updated.document_status(), ExchangeStatus::Submitted);
        assert_eq!(updated.document().submitted_by(), Some(&owner));
        assert_eq!(ctx.count_action(AuditAction::MilestoneDocumentSubmitted).await, 1);
    }

    #[tokio::test]
    async fn no_document_required_rejects_submission() {
        let ctx = TestContext::new();
        let (_, owner, milestone) = stored_milestone(&ctx, false).await;

        let err = handler(&ctx)
            .handle(command(&milestone), meta(&owner))
            .await
            .unwrap_err();
        assert!(matches!(err, MilestoneError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn pending_submission_blocks_another() {
        let ctx = TestContext::new();
        let (_, owner, milestone) = stored_milestone(&ctx, true).await;
        handler(&ctx).handle(command(&milestone), meta(&owner)).await.unwrap();

        let err = handler(&ctx)
            .handle(command(&milestone), meta(&owner))
            .await
            .unwrap_err();
        assert!(matches!(err, MilestoneError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn proposer_cannot_submit_the_document() {
        let ctx = TestContext::new();
        let (investor, _, milestone) = stored_milestone(&ctx, true).await;

        let err = handler(&ctx)
            .handle(command(&milestone), meta(&investor))
            .await
            .unwrap_err();

        assert!(matches!(err, MilestoneError::Unauthorized(_)));
        assert_eq!(ctx.count_action(AuditAction::UnauthorizedParticipantAccessAttempt).await, 1);
        assert_eq!(ctx.count_action(AuditAction::MilestoneDocumentSubmitted).await, 0);
        let stored = MilestoneRepository::find_by_id(ctx.store.as_ref(), milestone.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.document_status(), ExchangeStatus::None);
    }
}
