//! Verification document repository port.

use async_trait::async_trait;

use crate::domain::audit::AuditRecord;
use crate::domain::business::VerificationDocument;
use crate::domain::foundation::{BusinessId, DocumentId, DomainError};

#[async_trait]
pub trait VerificationDocumentRepository: Send + Sync {
    async fn insert(&self, document: &VerificationDocument, audit: &AuditRecord) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `DocumentNotFound` if the document doesn't exist
    /// - `ConcurrentModification` on a version mismatch
    async fn update(&self, document: &VerificationDocument, audit: &AuditRecord) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<VerificationDocument>, DomainError>;

    /// Documents of one business in upload order.
    async fn list_by_business(&self, business_id: &BusinessId) -> Result<Vec<VerificationDocument>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_document_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn VerificationDocumentRepository) {}
    }
}
