use async_trait::async_trait;
use serde_json::Value;

use super::{append_audit, commit, db_error, from_json, stale_or_missing, to_json, PostgresStore};
use crate::domain::audit::AuditRecord;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::{SaveResult, UserRepository};

#[async_trait]
impl UserRepository for PostgresStore {
    async fn insert_if_absent(&self, user: &User, audit: &AuditRecord) -> Result<SaveResult<User>, DomainError> {
        let mut tx = self.begin().await?;
        let inserted = sqlx::query(
            r#"
            INSERT INTO users (id, role, status, data, version, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.role().as_str())
        .bind(user.status().as_str())
        .bind(to_json(user)?)
        .bind(user.version() as i64)
        .bind(user.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert user", e))?
        .rows_affected()
            == 1;

        if !inserted {
            drop(tx);
            let existing = self.find_by_id(user.id()).await?.ok_or_else(|| {
                DomainError::database("User vanished after conflicting insert")
            })?;
            return Ok(SaveResult::AlreadyExists(existing));
        }

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await?;
        Ok(SaveResult::Inserted)
    }

    async fn update(&self, user: &User, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        let updated = sqlx::query(
            r#"
            UPDATE users SET role = $2, status = $3, data = $4, version = $5, updated_at = $6
            WHERE id = $1 AND version = $5 - 1
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.role().as_str())
        .bind(user.status().as_str())
        .bind(to_json(user)?)
        .bind(user.version() as i64)
        .bind(user.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("update user", e))?
        .rows_affected();

        if updated == 0 {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT version FROM users WHERE id = $1")
                .bind(user.id().as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("find user", e))?;
            return Err(stale_or_missing(exists.is_some(), ErrorCode::UserNotFound, "User"));
        }

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<(Value,)> = sqlx::query_as("SELECT data FROM users WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find user", e))?;
        row.map(|(data,)| from_json(data)).transpose()
    }
}
