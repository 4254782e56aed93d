//! In-memory store.
//!
//! One `RwLock` guards every collection plus the audit chain, so each write
//! and its audit entry land together. Used by tests and by database-less
//! development runs.

mod audit;
mod business;
mod connection;
mod investor;
mod milestone;
mod user;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::audit::{AuditLogEntry, AuditRecord, AuditSigner, GENESIS_HASH};
use crate::domain::business::{BusinessProfile, VerificationDocument};
use crate::domain::connection::{Connection, ConnectionMessage};
use crate::domain::foundation::{BusinessId, ConnectionId, DomainError, ErrorCode, UserId};
use crate::domain::investor::InvestorPreferences;
use crate::domain::matching::MatchDismissal;
use crate::domain::milestone::Milestone;
use crate::domain::user::User;

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    businesses: BTreeMap<BusinessId, BusinessProfile>,
    documents: Vec<VerificationDocument>,
    preferences: HashMap<UserId, InvestorPreferences>,
    dismissals: HashMap<(UserId, BusinessId), MatchDismissal>,
    connections: HashMap<ConnectionId, Connection>,
    milestones: Vec<Milestone>,
    messages: Vec<ConnectionMessage>,
    audit: Vec<AuditLogEntry>,
}

impl State {
    fn append_audit(&mut self, signer: &AuditSigner, record: &AuditRecord) -> AuditLogEntry {
        let (sequence, previous_hash) = match self.audit.last() {
            Some(last) => (last.sequence + 1, last.hash.clone()),
            None => (1, GENESIS_HASH.to_string()),
        };
        let entry = signer.seal(record.clone(), sequence, &previous_hash);
        self.audit.push(entry.clone());
        entry
    }
}

/// Implements every repository port and the audit log over shared memory.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
    signer: AuditSigner,
}

impl InMemoryStore {
    pub fn new(signer: AuditSigner) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            signer,
        }
    }

    /// Number of audit entries written so far.
    pub async fn audit_len(&self) -> usize {
        self.state.read().await.audit.len()
    }

    /// Rewrites an entry's metadata in place, bypassing the chain.
    #[cfg(test)]
    pub(crate) async fn tamper_audit_entry(&self, sequence: u64) {
        let mut state = self.state.write().await;
        if let Some(entry) = state.audit.iter_mut().find(|e| e.sequence == sequence) {
            entry.record.metadata = serde_json::json!({ "tampered": true });
        }
    }
}

/// Optimistic concurrency check: the incoming aggregate must be exactly one
/// version ahead of the stored one.
fn check_version(stored: u64, incoming: u64, entity: &str) -> Result<(), DomainError> {
    if incoming != stored + 1 {
        return Err(DomainError::new(
            ErrorCode::ConcurrentModification,
            format!("{} was modified concurrently", entity),
        )
        .with_detail("stored_version", stored.to_string())
        .with_detail("incoming_version", incoming.to_string()));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_store() -> InMemoryStore {
    use secrecy::Secret;
    InMemoryStore::new(AuditSigner::new(Secret::new("test-signing-key".to_string())))
}
