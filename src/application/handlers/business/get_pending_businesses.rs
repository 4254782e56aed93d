//! GetPendingBusinessesHandler - review queue for verifiers and regulators.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::business::{BusinessError, BusinessProfile, VerificationStatus};
use crate::domain::foundation::{jurisdiction_covers, UserId};
use crate::ports::BusinessRepository;

use super::REVIEWERS;

#[derive(Debug, Clone)]
pub struct GetPendingBusinessesQuery {
    pub user_id: UserId,
}

pub struct GetPendingBusinessesHandler {
    businesses: Arc<dyn BusinessRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl GetPendingBusinessesHandler {
    pub fn new(businesses: Arc<dyn BusinessRepository>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { businesses, guard }
    }

    /// Verifiers see every pending business, a regulator only those in
    /// their jurisdiction.
    pub async fn handle(
        &self,
        query: GetPendingBusinessesQuery,
    ) -> Result<Vec<BusinessProfile>, BusinessError> {
        let principal = self
            .guard
            .require_role(&query.user_id, &REVIEWERS, AccessMode::Query)
            .await?;

        let pending = self
            .businesses
            .list_by_status(VerificationStatus::Pending)
            .await?;
        Ok(pending
            .into_iter()
            .filter(|b| jurisdiction_covers(&principal, &b.jurisdiction_scopes()))
            .collect())
    }
}
