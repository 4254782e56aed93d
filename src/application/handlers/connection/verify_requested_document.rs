//! VerifyRequestedDocumentHandler - reviews a document submitted against a
//! request.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::connection::{ConnectionError, ConnectionMessage};
use crate::domain::foundation::{CommandMetadata, MessageId};
use crate::ports::{ConnectionRepository, MessageRepository};

#[derive(Debug, Clone)]
pub struct VerifyRequestedDocumentCommand {
    pub message_id: MessageId,
    pub approved: bool,
}

pub struct VerifyRequestedDocumentHandler {
    connections: Arc<dyn ConnectionRepository>,
    messages: Arc<dyn MessageRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl VerifyRequestedDocumentHandler {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        messages: Arc<dyn MessageRepository>,
        guard: Arc<AuthorizationGuard>,
    ) -> Self {
        Self {
            connections,
            messages,
            guard,
        }
    }

    /// Only the participant who did not submit may review. Closed
    /// connections still accept reviews of pending submissions.
    pub async fn handle(
        &self,
        cmd: VerifyRequestedDocumentCommand,
        metadata: CommandMetadata,
    ) -> Result<ConnectionMessage, ConnectionError> {
        let principal = self.guard.resolve_principal(&metadata.user_id).await?;
        let mut message = self
            .messages
            .find_by_id(&cmd.message_id)
            .await?
            .ok_or(ConnectionError::MessageNotFound(cmd.message_id))?;
        let connection = self
            .connections
            .find_by_id(message.connection_id())
            .await?
            .ok_or(ConnectionError::NotFound(*message.connection_id()))?;
        self.guard
            .require_participant(&principal, &connection, AccessMode::Mutation)
            .await?;

        let submitter = message
            .request()
            .and_then(|r| r.exchange.submitted_by())
            .cloned();
        self.guard
            .require_other_party(
                &principal,
                submitter.as_ref(),
                "The submitter cannot review their own document",
                ("message", message.id().to_string()),
            )
            .await?;

        message.review_document(cmd.approved, &principal.user_id)?;
        let outcome = message.request().map(|r| r.exchange.status());
        let audit = AuditRecord::by(&principal.user_id, AuditAction::RequestedDocumentReviewed)
            .on("message", message.id())
            .with_new_state(outcome);
        self.messages.update(&message, &audit).await?;

        tracing::info!(
            message_id = %message.id(),
            approved = cmd.approved,
            "Requested document reviewed"
        );
        Ok(message)
    }
}
