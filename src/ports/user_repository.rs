//! User repository port.
//!
//! Writes carry the audit record of the mutation; implementations persist
//! both in one transaction so a mutation is never committed unaudited.

use async_trait::async_trait;

use super::SaveResult;
use crate::domain::audit::AuditRecord;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a first-login user unless one exists for the subject.
    async fn insert_if_absent(&self, user: &User, audit: &AuditRecord) -> Result<SaveResult<User>, DomainError>;

    /// Persists a mutated user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `ConcurrentModification` if the stored version is not `user.version() - 1`
    async fn update(&self, user: &User, audit: &AuditRecord) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}
