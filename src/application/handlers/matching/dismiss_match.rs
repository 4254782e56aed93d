//! DismissMatchHandler - permanently hide a business from an investor.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::foundation::{BusinessId, CommandMetadata, Role};
use crate::domain::matching::{MatchDismissal, MatchingError};
use crate::ports::{BusinessRepository, DismissalRepository, SaveResult};

#[derive(Debug, Clone)]
pub struct DismissMatchCommand {
    pub business_id: BusinessId,
}

#[derive(Debug, Clone)]
pub struct DismissMatchResult {
    pub dismissal: MatchDismissal,
    /// False when the business was already dismissed.
    pub created: bool,
}

pub struct DismissMatchHandler {
    businesses: Arc<dyn BusinessRepository>,
    dismissals: Arc<dyn DismissalRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl DismissMatchHandler {
    pub fn new(
        businesses: Arc<dyn BusinessRepository>,
        dismissals: Arc<dyn DismissalRepository>,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self {
            businesses,
            dismissals,
            guard,
        }
    }

    /// Idempotent. Only the first dismissal is audited.
    pub async fn handle(
        &self,
        cmd: DismissMatchCommand,
        metadata: CommandMetadata,
    ) -> Result<DismissMatchResult, MatchingError> {
        let investor = self
            .guard
            .require_role(&metadata.user_id, &[Role::Investor], AccessMode::Mutation)
            .await?;

        if self.businesses.find_by_id(&cmd.business_id).await?.is_none() {
            return Err(MatchingError::BusinessNotFound(cmd.business_id));
        }

        let dismissal = MatchDismissal::new(investor.user_id.clone(), cmd.business_id);
        let audit = AuditRecord::by(&investor.user_id, AuditAction::MatchDismissed)
            .on("business", cmd.business_id);

        match self.dismissals.insert_if_absent(&dismissal, &audit).await? {
            SaveResult::Inserted => Ok(DismissMatchResult {
                dismissal,
                created: true,
            }),
            SaveResult::AlreadyExists(existing) => Ok(DismissMatchResult {
                dismissal: existing,
                created: false,
            }),
        }
    }
}
