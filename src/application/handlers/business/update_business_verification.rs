//! UpdateBusinessVerificationHandler - officer or regulator decision on a
//! business as a whole.

use std::sync::Arc;

use serde_json::json;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::business::{BusinessError, BusinessProfile, VerificationStatus};
use crate::domain::foundation::{BusinessId, CommandMetadata};
use crate::ports::BusinessRepository;

use super::REVIEWERS;

#[derive(Debug, Clone)]
pub struct UpdateBusinessVerificationCommand {
    pub business_id: BusinessId,
    pub status: VerificationStatus,
    pub credibility_score: Option<u8>,
}

pub struct UpdateBusinessVerificationHandler {
    businesses: Arc<dyn BusinessRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl UpdateBusinessVerificationHandler {
    pub fn new(businesses: Arc<dyn BusinessRepository>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { businesses, guard }
    }

    pub async fn handle(
        &self,
        cmd: UpdateBusinessVerificationCommand,
        metadata: CommandMetadata,
    ) -> Result<BusinessProfile, BusinessError> {
        let reviewer = self
            .guard
            .require_role(&metadata.user_id, &REVIEWERS, AccessMode::Mutation)
            .await?;

        let mut business = self
            .businesses
            .find_by_id(&cmd.business_id)
            .await?
            .ok_or(BusinessError::NotFound(cmd.business_id))?;

        self.guard
            .require_business_jurisdiction(&reviewer, &business, AccessMode::Mutation)
            .await?;

        let previous_score = business.credibility_score();
        let previous = business.update_verification(cmd.status, cmd.credibility_score)?;

        let audit = AuditRecord::by(&reviewer.user_id, AuditAction::BusinessVerificationUpdated)
            .on("business", business.id())
            .with_transition(
                json!({ "status": previous, "credibilityScore": previous_score }),
                json!({
                    "status": business.verification_status(),
                    "credibilityScore": business.credibility_score(),
                }),
            );
        self.businesses.update(&business, &audit).await?;

        tracing::info!(
            business_id = %business.id(),
            reviewer_id = %reviewer.user_id,
            status = business.verification_status().as_str(),
            "Business verification updated"
        );
        Ok(business)
    }
}
