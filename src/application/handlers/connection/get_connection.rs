//! GetConnectionHandler - one connection with its status history.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::connection::{Connection, ConnectionError};
use crate::domain::foundation::{ConnectionId, UserId};
use crate::ports::ConnectionRepository;

#[derive(Debug, Clone)]
pub struct GetConnectionQuery {
    pub user_id: UserId,
    pub connection_id: ConnectionId,
}

pub struct GetConnectionHandler {
    connections: Arc<dyn ConnectionRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl GetConnectionHandler {
    pub fn new(connections: Arc<dyn ConnectionRepository>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { connections, guard }
    }

    /// Participants and admins only.
    pub async fn handle(&self, query: GetConnectionQuery) -> Result<Connection, ConnectionError> {
        let principal = self.guard.resolve_principal(&query.user_id).await?;
        let connection = self
            .connections
            .find_by_id(&query.connection_id)
            .await?
            .ok_or(ConnectionError::NotFound(query.connection_id))?;

        if !principal.is_admin() {
            self.guard
                .require_participant(&principal, &connection, AccessMode::Query)
                .await?;
        }
        Ok(connection)
    }
}
