//! Audit log port.
//!
//! Append-only. Implementations assign the next sequence number and seal
//! the record into the hash chain under a single writer lock.

use async_trait::async_trait;

use crate::domain::audit::{AuditLogEntry, AuditQuery, AuditRecord};
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Appends a standalone entry. Used for authorization denials, which
    /// have no accompanying aggregate write.
    async fn append(&self, record: &AuditRecord) -> Result<AuditLogEntry, DomainError>;

    /// Matching entries, newest first, capped at the query limit.
    async fn list(&self, query: &AuditQuery) -> Result<Vec<AuditLogEntry>, DomainError>;

    /// Every entry in sequence order, for chain verification.
    async fn all_in_order(&self) -> Result<Vec<AuditLogEntry>, DomainError>;
}
