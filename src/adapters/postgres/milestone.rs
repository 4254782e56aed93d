use async_trait::async_trait;
use serde_json::Value;

use super::{append_audit, commit, db_error, from_json, from_rows, stale_or_missing, to_json, PostgresStore};
use crate::domain::audit::AuditRecord;
use crate::domain::foundation::{ConnectionId, DomainError, ErrorCode, MilestoneId};
use crate::domain::milestone::Milestone;
use crate::ports::MilestoneRepository;

#[async_trait]
impl MilestoneRepository for PostgresStore {
    async fn insert(&self, milestone: &Milestone, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO milestones (id, connection_id, deadline, data, version, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(milestone.id().as_uuid())
        .bind(milestone.connection_id().as_uuid())
        .bind(milestone.deadline())
        .bind(to_json(milestone)?)
        .bind(milestone.version() as i64)
        .bind(milestone.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert milestone", e))?;

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn update(&self, milestone: &Milestone, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        let updated = sqlx::query(
            r#"
            UPDATE milestones SET data = $2, version = $3
            WHERE id = $1 AND version = $3 - 1
            "#,
        )
        .bind(milestone.id().as_uuid())
        .bind(to_json(milestone)?)
        .bind(milestone.version() as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("update milestone", e))?
        .rows_affected();

        if updated == 0 {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT version FROM milestones WHERE id = $1")
                .bind(milestone.id().as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("find milestone", e))?;
            return Err(stale_or_missing(exists.is_some(), ErrorCode::MilestoneNotFound, "Milestone"));
        }

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn find_by_id(&self, id: &MilestoneId) -> Result<Option<Milestone>, DomainError> {
        let row: Option<(Value,)> = sqlx::query_as("SELECT data FROM milestones WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find milestone", e))?;
        row.map(|(data,)| from_json(data)).transpose()
    }

    async fn list_by_connection(&self, connection_id: &ConnectionId) -> Result<Vec<Milestone>, DomainError> {
        let rows: Vec<(Value,)> = sqlx::query_as(
            "SELECT data FROM milestones WHERE connection_id = $1 ORDER BY deadline, created_at",
        )
        .bind(connection_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list milestones", e))?;
        from_rows(rows)
    }
}
