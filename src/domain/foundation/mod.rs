//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, roles, authorization predicates and
//! error types that form the vocabulary of the Bridgeway domain.

mod auth;
mod authorization;
mod command;
mod errors;
mod ids;
mod role;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use authorization::{
    check_jurisdiction, check_participant, check_role, jurisdiction_covers, AccessDecision, AccessError,
    Denial, DenialKind, Principal,
};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AuditEntryId, BusinessId, ConnectionId, DocumentId, MessageId, MilestoneId, UserId};
pub use role::{Role, RoleDisplay};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
