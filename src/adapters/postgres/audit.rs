use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use super::{append_audit, commit, db_error, PostgresStore};
use crate::domain::audit::{AuditAction, AuditLogEntry, AuditQuery, AuditRecord};
use crate::domain::foundation::{AuditEntryId, DomainError, Timestamp, UserId};
use crate::ports::AuditLog;

const SELECT_COLUMNS: &str = r#"
    SELECT sequence, id, actor_id, action, entity_type, entity_id,
           previous_state, new_state, metadata, "timestamp", previous_hash, hash
    FROM audit_logs
"#;

#[derive(Debug, FromRow)]
struct AuditRow {
    sequence: i64,
    id: Uuid,
    actor_id: Option<String>,
    action: String,
    entity_type: Option<String>,
    entity_id: Option<String>,
    previous_state: Option<Value>,
    new_state: Option<Value>,
    metadata: Value,
    timestamp: DateTime<Utc>,
    previous_hash: String,
    hash: String,
}

impl TryFrom<AuditRow> for AuditLogEntry {
    type Error = DomainError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        let action: AuditAction = row
            .action
            .parse()
            .map_err(|e| DomainError::database(format!("Corrupt audit row: {}", e)))?;
        let actor_id = row
            .actor_id
            .map(UserId::new)
            .transpose()
            .map_err(|e| DomainError::database(format!("Corrupt audit row: {}", e)))?;

        Ok(AuditLogEntry {
            sequence: row.sequence as u64,
            record: AuditRecord {
                id: AuditEntryId::from_uuid(row.id),
                actor_id,
                action,
                entity_type: row.entity_type,
                entity_id: row.entity_id,
                previous_state: row.previous_state,
                new_state: row.new_state,
                metadata: row.metadata,
                timestamp: Timestamp::from_datetime(row.timestamp),
            },
            previous_hash: row.previous_hash,
            hash: row.hash,
        })
    }
}

#[async_trait]
impl AuditLog for PostgresStore {
    async fn append(&self, record: &AuditRecord) -> Result<AuditLogEntry, DomainError> {
        let mut tx = self.begin().await?;
        let entry = append_audit(&mut tx, &self.signer, record).await?;
        commit(tx).await?;
        Ok(entry)
    }

    async fn list(&self, query: &AuditQuery) -> Result<Vec<AuditLogEntry>, DomainError> {
        let sql = format!(
            r#"{}
            WHERE ($1::text IS NULL OR actor_id = $1)
              AND ($2::text IS NULL OR action = $2)
              AND ($3::text IS NULL OR entity_type = $3)
              AND ($4::text IS NULL OR entity_id = $4)
            ORDER BY sequence DESC
            LIMIT $5
            "#,
            SELECT_COLUMNS
        );
        let rows: Vec<AuditRow> = sqlx::query_as(&sql)
            .bind(query.actor_id.as_ref().map(|a| a.as_str()))
            .bind(query.action.map(|a| a.as_str()))
            .bind(query.entity_type.as_deref())
            .bind(query.entity_id.as_deref())
            .bind(query.effective_limit() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("query audit log", e))?;
        rows.into_iter().map(AuditLogEntry::try_from).collect()
    }

    async fn all_in_order(&self) -> Result<Vec<AuditLogEntry>, DomainError> {
        let sql = format!("{} ORDER BY sequence", SELECT_COLUMNS);
        let rows: Vec<AuditRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("export audit log", e))?;
        rows.into_iter().map(AuditLogEntry::try_from).collect()
    }
}
