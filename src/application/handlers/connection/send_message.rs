//! SendMessageHandler - appends a text message to a connection thread.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::connection::{Connection, ConnectionError, ConnectionMessage};
use crate::domain::foundation::{CommandMetadata, ConnectionId, Principal};
use crate::ports::{ConnectionRepository, MessageRepository};

#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub connection_id: ConnectionId,
    pub body: String,
}

pub struct SendMessageHandler {
    connections: Arc<dyn ConnectionRepository>,
    messages: Arc<dyn MessageRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl SendMessageHandler {
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
        cmd: SendMessageCommand,
        metadata: CommandMetadata,
    ) -> Result<ConnectionMessage, ConnectionError> {
        let (principal, _) =
            open_connection(&self.guard, self.connections.as_ref(), &metadata, cmd.connection_id)
                .await?;

        let message = ConnectionMessage::text(cmd.connection_id, principal.user_id.clone(), cmd.body)?;
        let audit = AuditRecord::by(&principal.user_id, AuditAction::MessageSent)
            .on("connection", cmd.connection_id)
            .with_metadata(serde_json::json!({ "messageId": message.id().to_string() }));
        self.messages.insert(&message, &audit).await?;
        Ok(message)
    }
}

/// Loads a connection the caller participates in and that still accepts
/// new messages.
pub(super) async fn open_connection(
    guard: &AuthorizationGuard,
    connections: &dyn ConnectionRepository,
    metadata: &CommandMetadata,
    connection_id: ConnectionId,
) -> Result<(Principal, Connection), ConnectionError> {
    let principal = guard.resolve_principal(&metadata.user_id).await?;
    let connection = connections
        .find_by_id(&connection_id)
        .await?
        .ok_or(ConnectionError::NotFound(connection_id))?;
    guard
        .require_participant(&principal, &connection, AccessMode::Mutation)
        .await?;
    if connection.is_closed() {
        return Err(ConnectionError::InvalidTransition(
            "Connection is closed".to_string(),
        ));
    }
    Ok((principal, connection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{meta, TestContext};
    use crate::domain::connection::ConnectionStatus;
    use crate::domain::foundation::Role;

    #[tokio::test]
    async fn participant_message_is_stored_and_audited() {
        let ctx = TestContext::new();
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let connection = ctx.connection(&business, &investor).await;
        let handler = SendMessageHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone());

        let message = handler
            .handle(
                SendMessageCommand {
                    connection_id: *connection.id(),
                    body: "  Hello there  ".to_string(),
                },
                meta(&investor),
            )
            .await
            .unwrap();

        assert_eq!(message.body(), "Hello there");
        assert_eq!(message.sender_id(), &investor);
        assert_eq!(ctx.count_action(AuditAction::MessageSent).await, 1);
    }

    #[tokio::test]
    async fn closed_connection_rejects_messages() {
        let ctx = TestContext::new();
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let mut connection = ctx.connection(&business, &investor).await;
        for target in [
            ConnectionStatus::Connected,
            ConnectionStatus::Contract,
            ConnectionStatus::Closed,
        ] {
            connection.advance(target, &owner).unwrap();
            ConnectionRepository::update(
                ctx.store.as_ref(),
                &connection,
                &AuditRecord::by(&owner, AuditAction::ConnectionStatusChanged),
            )
            .await
            .unwrap();
        }
        let handler = SendMessageHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone());

        let err = handler
            .handle(
                SendMessageCommand {
                    connection_id: *connection.id(),
                    body: "Still there?".to_string(),
                },
                meta(&investor),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn empty_body_fails_validation() {
        let ctx = TestContext::new();
        let investor = ctx.user("investor", Role::Investor).await;
        let owner = ctx.user("owner", Role::BusinessOwner).await;
        let business = ctx.business(&owner, "Fintech", "Lagos").await;
        let connection = ctx.connection(&business, &investor).await;
        let handler = SendMessageHandler::new(ctx.store.clone(), ctx.store.clone(), ctx.guard.clone());

        let err = handler
            .handle(
                SendMessageCommand {
                    connection_id: *connection.id(),
                    body: "   ".to_string(),
                },
                meta(&owner),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::ValidationFailed { .. }));
    }
}
