//! UploadVerificationDocumentHandler - owner attaches a document for review.

use std::sync::Arc;

use serde_json::json;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::business::{BusinessError, DocumentCategory, VerificationDocument};
use crate::domain::foundation::{BusinessId, CommandMetadata, Role};
use crate::ports::{BusinessRepository, VerificationDocumentRepository};

#[derive(Debug, Clone)]
pub struct UploadVerificationDocumentCommand {
    pub business_id: BusinessId,
    pub document_type: String,
    pub category: DocumentCategory,
    /// Opaque object storage reference.
    pub file_ref: String,
}

pub struct UploadVerificationDocumentHandler {
    businesses: Arc<dyn BusinessRepository>,
    documents: Arc<dyn VerificationDocumentRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl UploadVerificationDocumentHandler {
    pub fn new(
        businesses: Arc<dyn BusinessRepository>,
        documents: Arc<dyn VerificationDocumentRepository>,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self {
            businesses,
            documents,
            guard,
        }
    }

    pub async fn handle(
        &self,
        cmd: UploadVerificationDocumentCommand,
        metadata: CommandMetadata,
    ) -> Result<VerificationDocument, BusinessError> {
        let owner = self
            .guard
            .require_role(&metadata.user_id, &[Role::BusinessOwner], AccessMode::Mutation)
            .await?;

        let business = self
            .businesses
            .find_by_id(&cmd.business_id)
            .await?
            .ok_or(BusinessError::NotFound(cmd.business_id))?;
        self.guard
            .require_owner(&owner, &business, AccessMode::Mutation)
            .await?;

        let document = VerificationDocument::upload(
            *business.id(),
            owner.user_id.clone(),
            cmd.document_type,
            cmd.category,
            cmd.file_ref,
        )?;

        let audit = AuditRecord::by(&owner.user_id, AuditAction::VerificationDocumentUploaded)
            .on("verification_document", document.id())
            .with_new_state(document.status())
            .with_metadata(json!({
                "businessId": business.id().to_string(),
                "documentType": document.document_type(),
                "category": document.category().as_str(),
            }));
        self.documents.insert(&document, &audit).await?;

        Ok(document)
    }
}
