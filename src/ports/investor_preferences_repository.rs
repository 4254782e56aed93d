//! Investor preferences repository port.

use async_trait::async_trait;

use crate::domain::audit::AuditRecord;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::investor::InvestorPreferences;

#[async_trait]
pub trait InvestorPreferencesRepository: Send + Sync {
    /// Inserts version 1 or replaces the stored previous version.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` when the stored version is not
    ///   `preferences.version() - 1`
    async fn save(&self, preferences: &InvestorPreferences, audit: &AuditRecord) -> Result<(), DomainError>;

    async fn find_by_investor(&self, investor_id: &UserId) -> Result<Option<InvestorPreferences>, DomainError>;
}
