//! SubmitForVerificationHandler - owner asks for review of their profile.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::business::{BusinessError, BusinessProfile};
use crate::domain::foundation::{CommandMetadata, Role};
use crate::ports::BusinessRepository;

pub struct SubmitForVerificationHandler {
    businesses: Arc<dyn BusinessRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl SubmitForVerificationHandler {
    pub fn new(businesses: Arc<dyn BusinessRepository>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { businesses, guard }
    }

    /// Moves the caller's profile to `pending`.
    ///
    /// # Errors
    ///
    /// - `NoProfile` if the owner has not saved a profile
    /// - `InvalidTransition` unless the profile is unverified or rejected
    pub async fn handle(&self, metadata: CommandMetadata) -> Result<BusinessProfile, BusinessError> {
        let owner = self
            .guard
            .require_role(&metadata.user_id, &[Role::BusinessOwner], AccessMode::Mutation)
            .await?;

        let mut business = self
            .businesses
            .find_by_owner(&owner.user_id)
            .await?
            .ok_or_else(|| BusinessError::NoProfile(owner.user_id.clone()))?;

        let previous = business.submit_for_verification()?;

        let audit = AuditRecord::by(&owner.user_id, AuditAction::BusinessSubmittedForVerification)
            .on("business", business.id())
            .with_transition(previous, business.verification_status());
        self.businesses.update(&business, &audit).await?;

        Ok(business)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::business::VerificationStatus;

    #[tokio::test]
    async fn unverified_profile_becomes_pending() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        ctx.business(&owner, "Fintech", "Lagos").await;
        let handler = SubmitForVerificationHandler::new(ctx.store.clone(), ctx.guard.clone());

        let business = handler.handle(meta(&owner)).await.unwrap();

        assert_eq!(business.verification_status(), VerificationStatus::Pending);
        assert_eq!(
            ctx.count_action(AuditAction::BusinessSubmittedForVerification).await,
            1
        );
    }

    #[tokio::test]
    async fn pending_profile_cannot_be_resubmitted() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        ctx.business(&owner, "Fintech", "Lagos").await;
        let handler = SubmitForVerificationHandler::new(ctx.store.clone(), ctx.guard.clone());
        handler.handle(meta(&owner)).await.unwrap();

        let err = handler.handle(meta(&owner)).await.unwrap_err();
        assert!(matches!(err, BusinessError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn owner_without_profile_gets_no_profile() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let handler = SubmitForVerificationHandler::new(ctx.store.clone(), ctx.guard.clone());

        let err = handler.handle(meta(&owner)).await.unwrap_err();
        assert_eq!(err, BusinessError::NoProfile(owner));
    }
}
