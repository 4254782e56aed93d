//! Business profile repository port.

use async_trait::async_trait;

use crate::domain::audit::AuditRecord;
use crate::domain::business::{BusinessProfile, VerificationStatus};
use crate::domain::foundation::{BusinessId, DomainError, UserId};

/// Persistence for business profiles. One profile per owner.
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// # Errors
    ///
    /// - `ConcurrentModification` if the owner already has a profile
    async fn insert(&self, business: &BusinessProfile, audit: &AuditRecord) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `BusinessNotFound` if the profile doesn't exist
    /// - `ConcurrentModification` on a version mismatch
    async fn update(&self, business: &BusinessProfile, audit: &AuditRecord) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<BusinessProfile>, DomainError>;

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Option<BusinessProfile>, DomainError>;

    /// The full catalog, ordered by id.
    async fn list_all(&self) -> Result<Vec<BusinessProfile>, DomainError>;

    async fn list_by_status(&self, status: VerificationStatus) -> Result<Vec<BusinessProfile>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn BusinessRepository) {}
    }
}
