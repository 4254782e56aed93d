//! AdvanceConnectionHandler - moves a connection to its next stage.

use std::sync::Arc;

use crate::application::{AccessMode, AuthorizationGuard};
use crate::domain::audit::{AuditAction, AuditRecord};
use crate::domain::connection::{Connection, ConnectionError, ConnectionStatus};
use crate::domain::foundation::{CommandMetadata, ConnectionId};
use crate::ports::ConnectionRepository;

#[derive(Debug, Clone)]
pub struct AdvanceConnectionCommand {
    pub connection_id: ConnectionId,
    pub target: ConnectionStatus,
}

pub struct AdvanceConnectionHandler {
    connections: Arc<dyn ConnectionRepository>,
    guard: Arc<AuthorizationGuard>,
}

impl AdvanceConnectionHandler {
    pub fn new(connections: Arc<dyn ConnectionRepository>, guard: Arc<AuthorizationGuard>) -> Self {
        Self { connections, guard }
    }

    /// # Errors
    ///
    /// - `NotFound` if the connection doesn't exist
    /// - `Unauthorized` if the caller is not a participant (audited)
    /// - `InvalidTransition` unless `target` is the next stage
    /// - `Conflict` if the connection changed since it was read
    pub async fn handle(
        &self,
        cmd: AdvanceConnectionCommand,
        metadata: CommandMetadata,
    ) -> Result<Connection, ConnectionError> {
        let principal = self.guard.resolve_principal(&metadata.user_id).await?;
        let mut connection = self
            .connections
            .find_by_id(&cmd.connection_id)
            .await?
            .ok_or(ConnectionError::NotFound(cmd.connection_id))?;
        self.guard
            .require_participant(&principal, &connection, AccessMode::Mutation)
            .await?;

        let previous = connection.advance(cmd.target, &principal.user_id)?;
        let audit = AuditRecord::by(&principal.user_id, AuditAction::ConnectionStatusChanged)
            .on("connection", connection.id())
            .with_transition(previous, connection.status());
        self.connections.update(&connection, &audit).await?;

        tracing::info!(
            connection_id = %connection.id(),
            from = previous.as_str(),
            to = connection.status().as_str(),
            "Connection advanced"
        );
        Ok(connection)
    }
}
