use async_trait::async_trait;

use super::{check_version, InMemoryStore};
use crate::domain::audit::AuditRecord;
use crate::domain::connection::{Connection, ConnectionMessage};
use crate::domain::foundation::{BusinessId, ConnectionId, DomainError, ErrorCode, MessageId, UserId};
use crate::ports::{ConnectionRepository, MessageRepository, SaveResult};

#[async_trait]
impl ConnectionRepository for InMemoryStore {
    async fn insert_if_absent(
        &self,
        connection: &Connection,
        audit: &AuditRecord,
    ) -> Result<SaveResult<Connection>, DomainError> {
        let mut state = self.state.write().await;
        let existing = state.connections.values().find(|c| {
            c.business_id() == connection.business_id() && c.investor_id() == connection.investor_id()
        });
        if let Some(existing) = existing {
            return Ok(SaveResult::AlreadyExists(existing.clone()));
        }
        state.connections.insert(*connection.id(), connection.clone());
        state.append_audit(&self.signer, audit);
        Ok(SaveResult::Inserted)
    }

    async fn update(&self, connection: &Connection, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state.connections.get(connection.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ConnectionNotFound,
                format!("Connection not found: {}", connection.id()),
            )
        })?;
        check_version(stored.version(), connection.version(), "Connection")?;
        state.connections.insert(*connection.id(), connection.clone());
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn find_by_id(&self, id: &ConnectionId) -> Result<Option<Connection>, DomainError> {
        Ok(self.state.read().await.connections.get(id).cloned())
    }

    async fn find_by_pair(
        &self,
        business_id: &BusinessId,
        investor_id: &UserId,
    ) -> Result<Option<Connection>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .connections
            .values()
            .find(|c| c.business_id() == business_id && c.investor_id() == investor_id)
            .cloned())
    }

    async fn list_for_participant(&self, user_id: &UserId) -> Result<Vec<Connection>, DomainError> {
        let state = self.state.read().await;
        let mut connections: Vec<Connection> = state
            .connections
            .values()
            .filter(|c| c.is_participant(user_id))
            .cloned()
            .collect();
        connections.sort_by(|a, b| {
            b.created_at()
                .as_datetime()
                .cmp(a.created_at().as_datetime())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(connections)
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn insert(&self, message: &ConnectionMessage, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.messages.push(message.clone());
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn update(&self, message: &ConnectionMessage, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let slot = state
            .messages
            .iter_mut()
            .find(|m| m.id() == message.id())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::MessageNotFound,
                    format!("Message not found: {}", message.id()),
                )
            })?;
        check_version(slot.version(), message.version(), "Message")?;
        *slot = message.clone();
        state.append_audit(&self.signer, audit);
        Ok(())
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<ConnectionMessage>, DomainError> {
        let state = self.state.read().await;
        Ok(state.messages.iter().find(|m| m.id() == id).cloned())
    }

    async fn list_by_connection(&self, connection_id: &ConnectionId) -> Result<Vec<ConnectionMessage>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.connection_id() == connection_id)
            .cloned()
            .collect())
    }
}
