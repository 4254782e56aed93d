//! ListMessagesHandler - a connection thread in insertion order.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::connection::{ConnectionError, ConnectionMessage};
use crate::domain::foundation::{ConnectionId, UserId};
use crate::ports::{ConnectionRepository, MessageRepository};

#[derive(Debug, Clone)]
pub struct ListMessagesQuery {
    pub user_id: UserId,
    pub connection_id: ConnectionId,
}

pub struct ListMessagesHandler {
    connections: Arc<dyn ConnectionRepository>,
    messages: Arc<dyn MessageRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl ListMessagesHandler {
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

    pub async fn handle(&self, query: ListMessagesQuery) -> Result<Vec<ConnectionMessage>, ConnectionError> {
        let principal = self.guard.resolve_principal(&query.user_id).await?;
        let connection = self
            .connections
            .find_by_id(&query.connection_id)
            .await?
            .ok_or(ConnectionError::NotFound(query.connection_id))?;
        self.guard
            .require_participant(&principal, &connection, AccessMode::Query)
            .await?;

        Ok(self.messages.list_by_connection(connection.id()).await?)
    }
}
