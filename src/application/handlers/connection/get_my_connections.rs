//! GetMyConnectionsHandler - the caller's side of their relationships.

use std::sync::Arc;

use crate::application::AuthorizationGuard;
use crate::domain::connection::{Connection, ConnectionError};
use crate::domain::foundation::{Role, UserId};
use crate::ports::ConnectionRepository;

#[derive(Debug, Clone)]
pub struct GetMyConnectionsQuery {
    pub user_id: UserId,
}

pub struct GetMyConnectionsHandler {
    connections: Arc<dyn ConnectionRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl GetMyConnectionsHandler {
    pub fn new(connections: Arc<dyn ConnectionRepository>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { connections, guard }
    }

    /// Investors see connections they initiated, business owners see
    /// connections on their businesses, all other roles get an empty list.
    pub async fn handle(&self, query: GetMyConnectionsQuery) -> Result<Vec<Connection>, ConnectionError> {
        let principal = self.guard.resolve_principal(&query.user_id).await?;
        let side: fn(&Connection) -> &UserId = match principal.role {
            Role::Investor => Connection::investor_id,
            Role::BusinessOwner => Connection::business_owner_id,
            _ => return Ok(Vec::new()),
        };

        let connections = self
            .connections
            .list_for_participant(&principal.user_id)
            .await?
            .into_iter()
            .filter(|c| side(c) == &principal.user_id)
            .collect();
        Ok(connections)
    }
}
