use std::collections::HashSet;

use async_trait::async_trait;

use super::{check_version, InMemoryStore};
use crate::domain::audit::AuditRecord;
use crate::domain::foundation::{BusinessId, DomainError, ErrorCode, UserId};
use crate::domain::investor::InvestorPreferences;
use crate::domain::matching::MatchDismissal;
use crate::ports::{DismissalRepository, InvestorPreferencesRepository, SaveResult};

#[async_trait]
impl InvestorPreferencesRepository for InMemoryStore {
    async fn save(&self, preferences: &InvestorPreferences, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.preferences.get(preferences.investor_id()) {
            Some(stored) => check_version(stored.version(), preferences.version(), "Preferences")?,
            None if preferences.version() != 1 => {
                return Err(DomainError::new(
                    ErrorCode::PreferencesNotFound,
                    format!("No preferences for investor: {}", preferences.investor_id()),
                ))
            }
            None => {}
        }
        state
            .preferences
            .insert(preferences.investor_id().clone(), preferences.clone());
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn find_by_investor(&self, investor_id: &UserId) -> Result<Option<InvestorPreferences>, DomainError> {
        Ok(self.state.read().await.preferences.get(investor_id).cloned())
    }
}

#[async_trait]
impl DismissalRepository for InMemoryStore {
    async fn insert_if_absent(
        &self,
        dismissal: &MatchDismissal,
        audit: &AuditRecord,
    ) -> Result<SaveResult<MatchDismissal>, DomainError> {
        let mut state = self.state.write().await;
        let key = (dismissal.investor_id.clone(), dismissal.business_id);
        if let Some(existing) = state.dismissals.get(&key) {
            return Ok(SaveResult::AlreadyExists(existing.clone()));
        }
        state.dismissals.insert(key, dismissal.clone());
        state.append_audit(&self.signer, audit);
        Ok(SaveResult::Inserted)
    }

    async fn dismissed_for(&self, investor_id: &UserId) -> Result<HashSet<BusinessId>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .dismissals
            .keys()
            .filter(|(investor, _)| investor == investor_id)
            .map(|(_, business)| *business)
            .collect())
    }
}
