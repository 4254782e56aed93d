//! GetMatchedBusinessesHandler - ranked matches for an investor.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::business::BusinessProfile;
use crate::domain::foundation::{check_role, Role, UserId};
use crate::domain::matching::{rank, MatchScore, MatchingError, ReferenceData};
use crate::ports::{BusinessRepository, DismissalRepository, InvestorPreferencesRepository};

#[derive(Debug, Clone)]
pub struct GetMatchedBusinessesQuery {
    pub user_id: UserId,
    pub investor_id: UserId,
}

/// A business with its score for the investor.
#[derive(Debug, Clone)]
pub struct MatchedBusiness {
    pub business: BusinessProfile,
    pub score: MatchScore,
}

pub struct GetMatchedBusinessesHandler {
    businesses: Arc<dyn BusinessRepository>,
    preferences: Arc<dyn InvestorPreferencesRepository>,
    dismissals: Arc<dyn DismissalRepository>,
    reference: Arc<ReferenceData>,
    min_score: u8,
    guard: Arc<AuthorizationGuard>,
}

impl GetMatchedBusinessesHandler {
    pub fn new(
        businesses: Arc<dyn BusinessRepository>,
        preferences: Arc<dyn InvestorPreferencesRepository>,
        dismissals: Arc<dyn DismissalRepository>,
        reference: Arc<ReferenceData>,
        min_score: u8,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self {
            businesses,
            preferences,
            dismissals,
            reference,
            min_score,
            guard,
        }
    }

    /// Returns non-dismissed, non-rejected businesses scoring above the
    /// configured minimum, best first.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless the caller is that investor or an admin
    /// - `PreferencesNotFound` if the investor has not saved preferences
    pub async fn handle(
        &self,
        query: GetMatchedBusinessesQuery,
    ) -> Result<Vec<MatchedBusiness>, MatchingError> {
        let principal = self.guard.resolve_principal(&query.user_id).await?;
        let allowed: &[Role] = if principal.user_id == query.investor_id {
            &[Role::Investor, Role::Admin, Role::SystemAdmin]
        } else {
            &Role::ADMINS
        };
        self.guard
            .enforce(&principal, check_role(&principal, allowed), AccessMode::Query, None)
            .await?;

        let prefs = self
            .preferences
            .find_by_investor(&query.investor_id)
            .await?
            .ok_or_else(|| MatchingError::PreferencesNotFound(query.investor_id.clone()))?;
        let catalog = self.businesses.list_all().await?;
        let dismissed = self.dismissals.dismissed_for(&query.investor_id).await?;

        let ranked = rank(&prefs, &catalog, &dismissed, &self.reference, self.min_score);
        tracing::debug!(
            investor_id = %query.investor_id,
            candidates = catalog.len(),
            matches = ranked.len(),
            "Matches ranked"
        );

        Ok(ranked
            .into_iter()
            .map(|m| MatchedBusiness {
                business: m.business.clone(),
                score: m.score,
            })
            .collect())
    }
}
