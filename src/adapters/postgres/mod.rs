//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! `PostgresStore` implements every repository port and the audit log. Each
//! write runs in one transaction that also appends the audit entry, so an
//! aggregate change and its audit record commit or roll back together.
//!
//! Aggregates are stored as JSONB next to the key columns used for lookups,
//! uniqueness and the optimistic `version` check.

mod audit;
mod business;
mod connection;
mod investor;
mod milestone;
mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};

use crate::config::DatabaseConfig;
use crate::domain::audit::{AuditLogEntry, AuditRecord, AuditSigner, GENESIS_HASH};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Advisory lock key serializing appends to the audit chain.
const AUDIT_CHAIN_LOCK: i64 = 0x6272_6964_6765;

/// PostgreSQL implementation of all repository ports.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
    signer: AuditSigner,
}

impl PostgresStore {
    pub fn new(pool: PgPool, signer: AuditSigner) -> Self {
        Self { pool, signer }
    }

    /// Creates a connection pool from configuration.
    pub async fn connect(config: &DatabaseConfig, url: &str) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(url)
            .await
            .map_err(|e| db_error("connect to database", e))
    }

    /// Applies the embedded migrations.
    pub async fn migrate(&self) -> Result<(), DomainError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))
    }
}

/// Appends a record to the chain inside `tx`.
///
/// The advisory lock is held until the transaction ends, so the read of the
/// chain head and the insert cannot interleave with another writer.
async fn append_audit(
    tx: &mut Transaction<'_, Postgres>,
    signer: &AuditSigner,
    record: &AuditRecord,
) -> Result<AuditLogEntry, DomainError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(AUDIT_CHAIN_LOCK)
        .execute(&mut **tx)
        .await
        .map_err(|e| db_error("lock audit chain", e))?;

    let head: Option<(i64, String)> =
        sqlx::query_as("SELECT sequence, hash FROM audit_logs ORDER BY sequence DESC LIMIT 1")
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| db_error("read audit chain head", e))?;

    let (sequence, previous_hash) = match head {
        Some((sequence, hash)) => (sequence as u64 + 1, hash),
        None => (1, GENESIS_HASH.to_string()),
    };
    let entry = signer.seal(record.clone(), sequence, &previous_hash);

    sqlx::query(
        r#"
        INSERT INTO audit_logs (
            sequence, id, actor_id, action, entity_type, entity_id,
            previous_state, new_state, metadata, "timestamp", previous_hash, hash
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(entry.sequence as i64)
    .bind(entry.record.id.as_uuid())
    .bind(entry.record.actor_id.as_ref().map(|a| a.as_str()))
    .bind(entry.record.action.as_str())
    .bind(&entry.record.entity_type)
    .bind(&entry.record.entity_id)
    .bind(&entry.record.previous_state)
    .bind(&entry.record.new_state)
    .bind(&entry.record.metadata)
    .bind(entry.record.timestamp.as_datetime())
    .bind(&entry.previous_hash)
    .bind(&entry.hash)
    .execute(&mut **tx)
    .await
    .map_err(|e| db_error("append audit entry", e))?;

    Ok(entry)
}

async fn commit(tx: Transaction<'_, Postgres>) -> Result<(), DomainError> {
    tx.commit().await.map_err(|e| db_error("commit", e))
}

fn db_error(action: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, err))
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.constraint() == Some(constraint))
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Failed to serialize: {}", e)))
}

fn from_json<T: DeserializeOwned>(value: Value) -> Result<T, DomainError> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::database(format!("Corrupt stored document: {}", e)))
}

fn from_rows<T: DeserializeOwned>(rows: Vec<(Value,)>) -> Result<Vec<T>, DomainError> {
    rows.into_iter().map(|(data,)| from_json(data)).collect()
}

/// Maps a zero-row versioned update to not-found or a lost race.
fn stale_or_missing(exists: bool, not_found: ErrorCode, entity: &str) -> DomainError {
    if exists {
        DomainError::new(
            ErrorCode::ConcurrentModification,
            format!("{} was modified concurrently", entity),
        )
    } else {
        DomainError::new(not_found, format!("{} not found", entity))
    }
}
