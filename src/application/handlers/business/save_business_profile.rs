//! SaveBusinessProfileHandler - create or update the caller's own profile.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::business::{BusinessError, BusinessProfile, BusinessProfileDraft};
use crate::domain::foundation::{BusinessId, CommandMetadata, Role};
use crate::ports::BusinessRepository;

#[derive(Debug, Clone)]
pub struct SaveBusinessProfileCommand {
    pub details: BusinessProfileDraft,
}

#[derive(Debug, Clone)]
pub struct SaveBusinessProfileResult {
    pub business: BusinessProfile,
    pub created: bool,
}

pub struct SaveBusinessProfileHandler {
    businesses: Arc<dyn BusinessRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl SaveBusinessProfileHandler {
    pub fn new(businesses: Arc<dyn BusinessRepository>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { businesses, guard }
    }

    pub async fn handle(
        &self,
        cmd: SaveBusinessProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<SaveBusinessProfileResult, BusinessError> {
        let owner = self
            .guard
            .require_role(&metadata.user_id, &[Role::BusinessOwner], AccessMode::Mutation)
            .await?;

        match self.businesses.find_by_owner(&owner.user_id).await? {
            Some(mut business) => {
                business.update_details(cmd.details)?;
                let audit = AuditRecord::by(&owner.user_id, AuditAction::BusinessProfileUpdated)
                    .on("business", business.id())
                    .with_new_state(business.details());
                self.businesses.update(&business, &audit).await?;
                Ok(SaveBusinessProfileResult {
                    business,
                    created: false,
                })
            }
            None => {
                let business =
                    BusinessProfile::new(BusinessId::new(), owner.user_id.clone(), cmd.details)?;
                let audit = AuditRecord::by(&owner.user_id, AuditAction::BusinessProfileCreated)
                    .on("business", business.id())
                    .with_new_state(business.details());
                self.businesses.insert(&business, &audit).await?;
                tracing::info!(
                    business_id = %business.id(),
                    owner_id = %owner.user_id,
                    "Business profile created"
                );
                Ok(SaveBusinessProfileResult {
                    business,
                    created: true,
                })
            }
        }
    }
}
