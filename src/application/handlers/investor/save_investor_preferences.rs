//! SaveInvestorPreferencesHandler - create or replace the caller's preferences.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::foundation::{CommandMetadata, Role};
use crate::domain::investor::{InvestorPreferences, PreferencesInput};
use crate::domain::matching::MatchingError;
use crate::ports::InvestorPreferencesRepository;

#[derive(Debug, Clone)]
pub struct SaveInvestorPreferencesCommand {
    pub input: PreferencesInput,
}

pub struct SaveInvestorPreferencesHandler {
    preferences: Arc<dyn InvestorPreferencesRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl SaveInvestorPreferencesHandler {
    pub fn new(
        preferences: Arc<dyn InvestorPreferencesRepository>,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self { preferences, guard }
    }

    pub async fn handle(
        &self,
        cmd: SaveInvestorPreferencesCommand,
        metadata: CommandMetadata,
    ) -> Result<InvestorPreferences, MatchingError> {
        let investor = self
            .guard
            .require_role(&metadata.user_id, &[Role::Investor], AccessMode::Mutation)
            .await?;

        let prefs = match self.preferences.find_by_investor(&investor.user_id).await? {
            Some(mut existing) => {
                existing.replace(cmd.input)?;
                existing
            }
            None => InvestorPreferences::new(investor.user_id.clone(), cmd.input)?,
        };

        let audit = AuditRecord::by(&investor.user_id, AuditAction::InvestorPreferencesSaved)
            .on("investor_preferences", &investor.user_id)
            .with_new_state(&prefs);
        self.preferences.save(&prefs, &audit).await?;

        Ok(prefs)
    }
}
