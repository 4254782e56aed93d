//! RequestDocumentHandler - asks the other party for an ad-hoc document.

use std::sync::Arc;

use super::send_message::open_connection;
use crate::application::AuthorizationGuard;
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::connection::{ConnectionError, ConnectionMessage};
use crate::domain::foundation::{CommandMetadata, ConnectionId};
use crate::ports::{ConnectionRepository, MessageRepository};

#[derive(Debug, Clone)]
pub struct RequestDocumentCommand {
    pub connection_id: ConnectionId,
    pub document_type: String,
    pub template_url: Option<String>,
    pub note: Option<String>,
}

pub struct RequestDocumentHandler {
    connections: Arc<dyn ConnectionRepository>,
    messages: Arc<dyn MessageRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl RequestDocumentHandler {
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

    pub async fn handle(
        &self,
        cmd: RequestDocumentCommand,
        metadata: CommandMetadata,
    ) -> Result<ConnectionMessage, ConnectionError> {
        let (principal, _) =
            open_connection(&self.guard, self.connections.as_ref(), &metadata, cmd.connection_id)
                .await?;

        let message = ConnectionMessage::document_request(
            cmd.connection_id,
            principal.user_id.clone(),
            cmd.document_type,
            cmd.template_url,
            cmd.note,
        )?;
        let document_type = message
            .request()
            .map(|r| r.document_type.clone())
            .unwrap_or_default();
        let audit = AuditRecord::by(&principal.user_id, AuditAction::DocumentRequested)
            .on("message", message.id())
            .with_metadata(serde_json::json!({
                "connectionId": cmd.connection_id.to_string(),
                "documentType": document_type,
            }));
        self.messages.insert(&message, &audit).await?;

        tracing::info!(
            connection_id = %cmd.connection_id,
            message_id = %message.id(),
            document_type = %document_type,
            "Document requested"
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::exchange::ExchangeStatus;
    use crate::domain::foundation::Role;

    #[tokio::test]
    async fn request_starts_with_no_submission() {
        let ctx = TestContext::new();
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let connection = ctx.connection(&business, &investor).await;

        let message = RequestDocumentHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
            .handle(
                RequestDocumentCommand {
                    connection_id: *connection.id(),
                    document_type: "bank_statement".to_string(),
                    template_url: Some("s3://templates/bank.pdf".to_string()),
                    note: None,
                },
                meta(&investor),
            )
            .await
            .unwrap();

        let request = message.request().unwrap();
        assert_eq!(request.document_type, "bank_statement");
        assert_eq!(request.exchange.status(), ExchangeStatus::None);
        assert_eq!(message.body(), "Requested document: bank_statement");
        assert_eq!(ctx.count_action(AuditAction::DocumentRequested).await, 1);
    }

    #[tokio::test]
    async fn blank_document_type_fails_validation() {
        let ctx = TestContext::new();
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let connection = ctx.connection(&business, &investor).await;

        let err = RequestDocumentHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
            .handle(
                RequestDocumentCommand {
                    connection_id: *connection.id(),
                    document_type: " ".to_string(),
                    template_url: None,
                    note: None,
                },
                meta(&owner),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::ValidationFailed { .. }));
    }
}
