//! VerifyMilestoneDocumentHandler - the other party reviews the document.

use std::sync::Arc;

use super::load_for_participant;
use crate::application::AuthorizationGuard;
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::foundation::{CommandMetadata, MilestoneId};
use crate::domain::milestone::{Milestone, MilestoneError};
use crate::ports::{ConnectionRepository, MilestoneRepository};

#[derive(Debug, Clone)]
pub struct VerifyMilestoneDocumentCommand {
    pub milestone_id: MilestoneId,
    pub approved: bool,
}

pub struct VerifyMilestoneDocumentHandler {
    connections: Arc<dyn ConnectionRepository>,
    milestones: Arc<dyn MilestoneRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl VerifyMilestoneDocumentHandler {
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

    /// `submitted -> verified | rejected`. The submitter may not review.
    pub async fn handle(
        &self,
        cmd: VerifyMilestoneDocumentCommand,
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
                milestone.document().submitted_by(),
                "The submitter cannot review their own document",
                ("milestone", milestone.id().to_string()),
            )
            .await?;

        let previous = milestone.review_document(cmd.approved, &principal.user_id)?;
        let audit = AuditRecord::by(&principal.user_id, AuditAction::MilestoneDocumentReviewed)
            .on("milestone", milestone.id())
            .with_transition(previous, milestone.document_status());
        self.milestones.update(&milestone, &audit).await?;

        tracing::info!(
            milestone_id = %milestone.id(),
            outcome = milestone.document_status().as_str(),
            "Milestone document reviewed"
        );
        Ok(milestone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::milestone::{
        SubmitMilestoneDocumentCommand, SubmitMilestoneDocumentHandler,
    };
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::exchange::ExchangeStatus;
    use crate::domain::foundation::{Role, Timestamp, UserId};
    use crate::domain::milestone::fixtures::proposal;

    /// Milestone proposed by the investor, document submitted by the owner.
    async fn submitted(ctx: &TestContext) -> (UserId, UserId, Milestone) {
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let connection = ctx.connection(&business, &investor).await;
        let milestone = Milestone::propose(
            MilestoneId::new(),
            &connection,
            investor.clone(),
            proposal(true),
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
        submit(ctx, &milestone, &owner, "s3://docs/accounts.pdf").await;
        (investor, owner, milestone)
    }

    async fn submit(ctx: &TestContext, milestone: &Milestone, by: &UserId, url: &str) -> Milestone {
        SubmitMilestoneDocumentHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
            .handle(
                SubmitMilestoneDocumentCommand {
                    milestone_id: *milestone.id(),
                    document_url: url.to_string(),
                },
                meta(by),
            )
            .await
            .unwrap()
    }

    fn handler(ctx: &TestContext) -> VerifyMilestoneDocumentHandler {
        VerifyMilestoneDocumentHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
    }

    fn command(milestone: &Milestone, approved: bool) -> VerifyMilestoneDocumentCommand {
        VerifyMilestoneDocumentCommand {
            milestone_id: *milestone.id(),
            approved,
        }
    }

    #[tokio::test]
    async fn other_party_verifies_and_reference_is_kept() {
        let ctx = TestContext::new();
        let (investor, _, milestone) = submitted(&ctx).await;

        let verified = handler(&ctx)
            .handle(command(&milestone, true), meta(&investor))
            .await
            .unwrap();

        assert_eq!(verified.document_status(), ExchangeStatus::Verified);
        assert_eq!(verified.document().document_url(), Some("s3://docs/accounts.pdf"));
        assert_eq!(ctx.count_action(AuditAction::MilestoneDocumentReviewed).await, 1);
    }

    #[tokio::test]
    async fn submitter_review_is_denied_and_audited() {
        let ctx = TestContext::new();
        let (_, owner, milestone) = submitted(&ctx).await;

        let err = handler(&ctx)
            .handle(command(&milestone, true), meta(&owner))
            .await
            .unwrap_err();

        assert!(matches!(err, MilestoneError::Unauthorized(_)));
        assert_eq!(
            ctx.count_action(AuditAction::UnauthorizedParticipantAccessAttempt).await,
            1
        );
    }

    #[tokio::test]
    async fn rejection_keeps_history_on_resubmission() {
        let ctx = TestContext::new();
        let (investor, owner, milestone) = submitted(&ctx).await;
        let rejected = handler(&ctx)
            .handle(command(&milestone, false), meta(&investor))
            .await
            .unwrap();
        assert_eq!(rejected.document_status(), ExchangeStatus::Rejected);

        let resubmitted = submit(&ctx, &milestone, &owner, "s3://docs/accounts-v2.pdf").await;

        assert_eq!(resubmitted.document_status(), ExchangeStatus::Submitted);
        assert_eq!(resubmitted.document().history().len(), 1);
        assert_eq!(
            resubmitted.document().history()[0].document_url,
            "s3://docs/accounts.pdf"
        );
    }

    #[tokio::test]
    async fn verified_document_cannot_be_reviewed_again() {
        let ctx = TestContext::new();
        let (investor, _, milestone) = submitted(&ctx).await;
        handler(&ctx)
            .handle(command(&milestone, true), meta(&investor))
            .await
            .unwrap();

        let err = handler(&ctx)
            .handle(command(&milestone, false), meta(&investor))
            .await
            .unwrap_err();
        assert!(matches!(err, MilestoneError::InvalidTransition(_)));
    }
}
