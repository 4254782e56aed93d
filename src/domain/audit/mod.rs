//! Audit module - append-only, tamper-evident trail of mutations and denials.

mod action;
mod chain;
mod record;

pub use action::AuditAction;
pub use chain::{AuditSigner, ChainVerification, GENESIS_HASH};
pub use record::{AuditLogEntry, AuditQuery, AuditRecord};
