//! ReviewVerificationDocumentHandler - approve, reject or expire a document.
//!
//! Reviews are final. Any decision on a document that is not in the state
//! the decision starts from fails with `InvalidTransition`.

use std::sync::Arc;

use serde_json::json;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::business::{BusinessError, VerificationDocument};
use crate::domain::foundation::{CommandMetadata, DocumentId, Role};
use crate::ports::VerificationDocumentRepository;

/// Officer decision on a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentDecision {
    /// `pending -> verified`
    Approve,
    /// `pending -> rejected`
    Reject { reason: String },
    /// `verified -> expired`
    Expire,
}

impl DocumentDecision {
    fn audit_action(&self) -> AuditAction {
        match self {
            DocumentDecision::Approve => AuditAction::VerificationDocumentApproved,
            DocumentDecision::Reject { .. } => AuditAction::VerificationDocumentRejected,
            DocumentDecision::Expire => AuditAction::VerificationDocumentExpired,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewVerificationDocumentCommand {
    pub document_id: DocumentId,
    pub decision: DocumentDecision,
}

pub struct ReviewVerificationDocumentHandler {
    documents: Arc<dyn VerificationDocumentRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl ReviewVerificationDocumentHandler {
    pub fn new(
        documents: Arc<dyn VerificationDocumentRepository>,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self { documents, guard }
    }

    pub async fn handle(
        &self,
        cmd: ReviewVerificationDocumentCommand,
        metadata: CommandMetadata,
    ) -> Result<VerificationDocument, BusinessError> {
        let officer = self
            .guard
            .require_role(&metadata.user_id, &Role::VERIFIERS, AccessMode::Mutation)
            .await?;

        let mut document = self
            .documents
            .find_by_id(&cmd.document_id)
            .await?
            .ok_or(BusinessError::DocumentNotFound(cmd.document_id))?;

        let action = cmd.decision.audit_action();
        let previous = match &cmd.decision {
            DocumentDecision::Approve => document.approve(&officer.user_id)?,
            DocumentDecision::Reject { reason } => document.reject(&officer.user_id, reason)?,
            DocumentDecision::Expire => document.expire(&officer.user_id)?,
        };

        let audit = AuditRecord::by(&officer.user_id, action)
            .on("verification_document", document.id())
            .with_transition(previous, document.status())
            .with_metadata(json!({
                "businessId": document.business_id().to_string(),
                "reason": document.rejection_reason(),
            }));
        self.documents.update(&document, &audit).await?;

        tracing::info!(
            document_id = %document.id(),
            officer_id = %officer.user_id,
            status = document.status().as_str(),
            "Verification document reviewed"
        );
        Ok(document)
    }
}
