//! Audit query handlers.

mod list_audit_log;
mod verify_audit_chain;

pub use list_audit_log::{ListAuditLogHandler, ListAuditLogQuery, AUDIT_READERS};
pub use verify_audit_chain::{VerifyAuditChainHandler, VerifyAuditChainQuery};
