//! HMAC-SHA256 hash chain over the audit log.
//!
//! `hash = HMAC(key, previous_hash || canonical(entry))`. Changing, removing
//! or reordering any sealed entry breaks every hash after it.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::Value;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::{AuditLogEntry, AuditRecord};

type HmacSha256 = Hmac<Sha256>;

/// Previous hash of the first entry.
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Fields covered by the hash, in a fixed order.
#[derive(Serialize)]
struct CanonicalEntry<'a> {
    sequence: u64,
    id: String,
    actor_id: Option<&'a str>,
    action: &'static str,
    entity_type: Option<&'a str>,
    entity_id: Option<&'a str>,
    previous_state: &'a Option<Value>,
    new_state: &'a Option<Value>,
    metadata: &'a Value,
    timestamp: String,
}

impl<'a> CanonicalEntry<'a> {
    fn of(sequence: u64, record: &'a AuditRecord) -> Self {
        Self {
            sequence,
            id: record.id.to_string(),
            actor_id: record.actor_id.as_ref().map(|a| a.as_str()),
            action: record.action.as_str(),
            entity_type: record.entity_type.as_deref(),
            entity_id: record.entity_id.as_deref(),
            previous_state: &record.previous_state,
            new_state: &record.new_state,
            metadata: &record.metadata,
            timestamp: record.timestamp.to_rfc3339(),
        }
    }
}

/// Result of walking the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainVerification {
    pub valid: bool,
    pub entries_checked: u64,
    /// Sequence number of the first entry that failed verification.
    pub first_broken_sequence: Option<u64>,
}

/// Seals and verifies audit entries with a secret key.
#[derive(Clone)]
pub struct AuditSigner {
    key: Secret<String>,
}

impl std::fmt::Debug for AuditSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditSigner").finish_non_exhaustive()
    }
}

impl AuditSigner {
    pub fn new(key: Secret<String>) -> Self {
        Self { key }
    }

    /// Turns a draft record into the next entry of the chain.
    pub fn seal(&self, record: AuditRecord, sequence: u64, previous_hash: &str) -> AuditLogEntry {
        let hash = self.compute_hash(sequence, &record, previous_hash);
        AuditLogEntry {
            sequence,
            record,
            previous_hash: previous_hash.to_string(),
            hash,
        }
    }

    /// Recomputes every hash and checks the links between entries.
    ///
    /// `entries` must be in ascending sequence order.
    pub fn verify_chain(&self, entries: &[AuditLogEntry]) -> ChainVerification {
        let mut expected_previous = GENESIS_HASH.to_string();
        let mut expected_sequence = 1u64;

        for entry in entries {
            let recomputed = self.compute_hash(entry.sequence, &entry.record, &entry.previous_hash);
            let linked = entry.sequence == expected_sequence
                && constant_time_eq(entry.previous_hash.as_bytes(), expected_previous.as_bytes());
            let intact = constant_time_eq(recomputed.as_bytes(), entry.hash.as_bytes());

            if !(linked && intact) {
                tracing::warn!(sequence = entry.sequence, "Audit chain broken");
                return ChainVerification {
                    valid: false,
                    entries_checked: expected_sequence,
                    first_broken_sequence: Some(entry.sequence),
                };
            }

            expected_previous = entry.hash.clone();
            expected_sequence += 1;
        }

        ChainVerification {
            valid: true,
            entries_checked: expected_sequence - 1,
            first_broken_sequence: None,
        }
    }

    fn compute_hash(&self, sequence: u64, record: &AuditRecord, previous_hash: &str) -> String {
        let canonical = serde_json::to_vec(&CanonicalEntry::of(sequence, record)).unwrap_or_default();

        let mut mac = HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(previous_hash.as_bytes());
        mac.update(&canonical);
        to_hex(&mac.finalize().into_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
