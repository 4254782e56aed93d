//! Connection message repository port.
//!
//! Messages are append-only and read back in insertion order. Only the
//! document exchange of a document request is ever updated.

use async_trait::async_trait;

use crate::domain::audit::AuditRecord;
use crate::domain::connection::ConnectionMessage;
use crate::domain::foundation::{ConnectionId, DomainError, MessageId};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn insert(&self, message: &ConnectionMessage, audit: &AuditRecord) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `MessageNotFound` if the message doesn't exist
    /// - `ConcurrentModification` on a version mismatch
    async fn update(&self, message: &ConnectionMessage, audit: &AuditRecord) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<ConnectionMessage>, DomainError>;

    async fn list_by_connection(&self, connection_id: &ConnectionId) -> Result<Vec<ConnectionMessage>, DomainError>;
}
