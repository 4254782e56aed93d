use async_trait::async_trait;

use super::{check_version, InMemoryStore};
use crate::domain::audit::AuditRecord;
use crate::domain::business::{BusinessProfile, VerificationDocument, VerificationStatus};
use crate::domain::foundation::{BusinessId, DocumentId, DomainError, ErrorCode, UserId};
use crate::ports::{BusinessRepository, VerificationDocumentRepository};

#[async_trait]
impl BusinessRepository for InMemoryStore {
    async fn insert(&self, business: &BusinessProfile, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.businesses.values().any(|b| b.owner_id() == business.owner_id()) {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                "Owner already has a business profile",
            ));
        }
        state.businesses.insert(*business.id(), business.clone());
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn update(&self, business: &BusinessProfile, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state.businesses.get(business.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::BusinessNotFound,
                format!("Business not found: {}", business.id()),
            )
        })?;
        check_version(stored.version(), business.version(), "Business")?;
        state.businesses.insert(*business.id(), business.clone());
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<BusinessProfile>, DomainError> {
        Ok(self.state.read().await.businesses.get(id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Option<BusinessProfile>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .businesses
            .values()
            .find(|b| b.owner_id() == owner_id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<BusinessProfile>, DomainError> {
        Ok(self.state.read().await.businesses.values().cloned().collect())
    }

    async fn list_by_status(&self, status: VerificationStatus) -> Result<Vec<BusinessProfile>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .businesses
            .values()
            .filter(|b| b.verification_status() == status)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VerificationDocumentRepository for InMemoryStore {
    async fn insert(&self, document: &VerificationDocument, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.documents.push(document.clone());
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn update(&self, document: &VerificationDocument, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let slot = state
            .documents
            .iter_mut()
            .find(|d| d.id() == document.id())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DocumentNotFound,
                    format!("Document not found: {}", document.id()),
                )
            })?;
        check_version(slot.version(), document.version(), "Document")?;
        *slot = document.clone();
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<VerificationDocument>, DomainError> {
        let state = self.state.read().await;
        Ok(state.documents.iter().find(|d| d.id() == id).cloned())
    }

    async fn list_by_business(&self, business_id: &BusinessId) -> Result<Vec<VerificationDocument>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .documents
            .iter()
            .filter(|d| d.business_id() == business_id)
            .cloned()
            .collect())
    }
}
