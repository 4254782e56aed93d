//! Connection repository port.

use async_trait::async_trait;

use super::SaveResult;
use crate::domain::audit::AuditRecord;
use crate::domain::connection::Connection;
use crate::domain::foundation::{BusinessId, ConnectionId, DomainError, UserId};

/// Persistence for connections, unique per `(business_id, investor_id)`.
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Inserts unless the pair already has a connection, in which case the
    /// existing one is returned unchanged.
    async fn insert_if_absent(
        &self,
        connection: &Connection,
        audit: &AuditRecord,
    ) -> Result<SaveResult<Connection>, DomainError>;

    /// # Errors
    ///
    /// - `ConnectionNotFound` if the connection doesn't exist
    /// - `ConcurrentModification` on a version mismatch
    async fn update(&self, connection: &Connection, audit: &AuditRecord) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ConnectionId) -> Result<Option<Connection>, DomainError>;

    async fn find_by_pair(
        &self,
        business_id: &BusinessId,
        investor_id: &UserId,
    ) -> Result<Option<Connection>, DomainError>;

    /// Connections where the user is the investor or the business owner,
    /// newest first.
    async fn list_for_participant(&self, user_id: &UserId) -> Result<Vec<Connection>, DomainError>;
}
