//! SubmitRequestedDocumentHandler - answers a document request.

use std::sync::Arc;

use super::send_message::open_connection;
use crate::application::AuthorizationGuard;
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::connection::{ConnectionError, ConnectionMessage};
use crate::domain::foundation::{CommandMetadata, MessageId};
use crate::ports::{ConnectionRepository, MessageRepository};

#[derive(Debug, Clone)]
pub struct SubmitRequestedDocumentCommand {
    pub message_id: MessageId,
    pub document_url: String,
}

pub struct SubmitRequestedDocumentHandler {
    connections: Arc<dyn ConnectionRepository>,
    messages: Arc<dyn MessageRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl SubmitRequestedDocumentHandler {
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

    /// Only the participant who did not make the request may submit.
    ///
    /// # Errors
    ///
    /// - `MessageNotFound` if the message doesn't exist
    /// - `Unauthorized` for outsiders or the requester (audited)
    /// - `InvalidTransition` for text messages or a pending/verified exchange
    pub async fn handle(
        &self,
        cmd: SubmitRequestedDocumentCommand,
        metadata: CommandMetadata,
    ) -> Result<ConnectionMessage, ConnectionError> {
        let mut message = self
            .messages
            .find_by_id(&cmd.message_id)
            .await?
            .ok_or(ConnectionError::MessageNotFound(cmd.message_id))?;
        let (principal, _) = open_connection(
            &self.guard,
            self.connections.as_ref(),
            &metadata,
            *message.connection_id(),
        )
        .await?;
        self.guard
            .require_other_party(
                &principal,
                Some(message.sender_id()),
                "The requester cannot submit their own requested document",
                ("message", message.id().to_string()),
            )
            .await?;

        let previous = message.request().map(|r| r.exchange.status());
        message.submit_document(cmd.document_url, &principal.user_id)?;
        let current = message.request().map(|r| r.exchange.status());
        let audit = AuditRecord::by(&principal.user_id, AuditAction::RequestedDocumentSubmitted)
            .on("message", message.id())
            .with_transition(previous, current);
        self.messages.update(&message, &audit).await?;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::exchange::ExchangeStatus;
    use crate::domain::foundation::{Role, UserId};

    async fn requested(ctx: &TestContext) -> (UserId, UserId, ConnectionMessage) {
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let connection = ctx.connection(&business, &investor).await;
        let message = ctx.document_request(&connection, &investor).await;
        (investor, owner, message)
    }

    fn handler(ctx: &TestContext) -> SubmitRequestedDocumentHandler {
        SubmitRequestedDocumentHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone())
    }

    fn command(message: &ConnectionMessage) -> SubmitRequestedDocumentCommand {
        SubmitRequestedDocumentCommand {
            message_id: *message.id(),
            document_url: "s3://docs/statement.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn counter_party_submits() {
        let ctx = TestContext::new();
        let (_, owner, message) = requested(&ctx).await;

        let updated = handler(&ctx).handle(command(&message), meta(&owner)).await.unwrap();

        let exchange = &updated.request().unwrap().exchange;
        assert_eq!(exchange.status(), ExchangeStatus::Submitted);
        assert_eq!(exchange.submitted_by(), Some(&owner));
        assert_eq!(ctx.count_action(AuditAction::RequestedDocumentSubmitted).await, 1);
    }

    #[tokio::test]
    async fn requester_cannot_answer_own_request() {
        let ctx = TestContext::new();
        let (investor, _, message) = requested(&ctx).await;

        let err = handler(&ctx)
            .handle(command(&message), meta(&investor))
            .await
            .unwrap_err();

        assert!(matches!(err, ConnectionError::Unauthorized(_)));
        assert_eq!(
            ctx.count_action(AuditAction::UnauthorizedParticipantAccessAttempt).await,
            1
        );
    }

    #[tokio::test]
    async fn second_submission_while_pending_fails() {
        let ctx = TestContext::new();
        let (_, owner, message) = requested(&ctx).await;
        handler(&ctx).handle(command(&message), meta(&owner)).await.unwrap();

        let err = handler(&ctx)
            .handle(command(&message), meta(&owner))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn text_message_cannot_take_a_document() {
        let ctx = TestContext::new();
        let (investor, owner, request) = requested(&ctx).await;
        let text = ConnectionMessage::text(*request.connection_id(), investor.clone(), "hi").unwrap();
        MessageRepository::insert(
            ctx.store.as_ref(),
            &text,
            &AuditRecord::by(&investor, AuditAction::MessageSent),
        )
        .await
        .unwrap();

        let err = handler(&ctx).handle(command(&text), meta(&owner)).await.unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidTransition(_)));
    }
}
