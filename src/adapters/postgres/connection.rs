use async_trait::async_trait;
use serde_json::Value;

use super::{append_audit, commit, db_error, from_json, from_rows, stale_or_missing, to_json, PostgresStore};
use crate::domain::audit::AuditRecord;
use crate::domain::connection::{Connection, ConnectionMessage};
use crate::domain::foundation::{BusinessId, ConnectionId, DomainError, ErrorCode, MessageId, UserId};
use crate::ports::{ConnectionRepository, MessageRepository, SaveResult};

#[async_trait]
impl ConnectionRepository for PostgresStore {
    async fn insert_if_absent(
        &self,
        connection: &Connection,
        audit: &AuditRecord,
    ) -> Result<SaveResult<Connection>, DomainError> {
        let mut tx = self.begin().await?;
        let inserted = sqlx::query(
            r#"
            INSERT INTO connections (
                id, business_id, business_owner_id, investor_id, status, data, version, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT ON CONSTRAINT connections_pair_key DO NOTHING
            "#,
        )
        .bind(connection.id().as_uuid())
        .bind(connection.business_id().as_uuid())
        .bind(connection.business_owner_id().as_str())
        .bind(connection.investor_id().as_str())
        .bind(connection.status().as_str())
        .bind(to_json(connection)?)
        .bind(connection.version() as i64)
        .bind(connection.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert connection", e))?
        .rows_affected()
            == 1;

        if !inserted {
            let row: (Value,) = sqlx::query_as(
                "SELECT data FROM connections WHERE business_id = $1 AND investor_id = $2",
            )
            .bind(connection.business_id().as_uuid())
            .bind(connection.investor_id().as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error("find connection", e))?;
            return Ok(SaveResult::AlreadyExists(from_json(row.0)?));
        }

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await?;
        Ok(SaveResult::Inserted)
    }

    async fn update(&self, connection: &Connection, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        let updated = sqlx::query(
            r#"
            UPDATE connections SET status = $2, data = $3, version = $4
            WHERE id = $1 AND version = $4 - 1
            "#,
        )
        .bind(connection.id().as_uuid())
        .bind(connection.status().as_str())
        .bind(to_json(connection)?)
        .bind(connection.version() as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("update connection", e))?
        .rows_affected();

        if updated == 0 {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT version FROM connections WHERE id = $1")
                .bind(connection.id().as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("find connection", e))?;
            return Err(stale_or_missing(exists.is_some(), ErrorCode::ConnectionNotFound, "Connection"));
        }

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn find_by_id(&self, id: &ConnectionId) -> Result<Option<Connection>, DomainError> {
        let row: Option<(Value,)> = sqlx::query_as("SELECT data FROM connections WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find connection", e))?;
        row.map(|(data,)| from_json(data)).transpose()
    }

    async fn find_by_pair(
        &self,
        business_id: &BusinessId,
        investor_id: &UserId,
    ) -> Result<Option<Connection>, DomainError> {
        let row: Option<(Value,)> = sqlx::query_as(
            "SELECT data FROM connections WHERE business_id = $1 AND investor_id = $2",
        )
        .bind(business_id.as_uuid())
        .bind(investor_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find connection", e))?;
        row.map(|(data,)| from_json(data)).transpose()
    }

    async fn list_for_participant(&self, user_id: &UserId) -> Result<Vec<Connection>, DomainError> {
        let rows: Vec<(Value,)> = sqlx::query_as(
            r#"
            SELECT data FROM connections
            WHERE investor_id = $1 OR business_owner_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list connections", e))?;
        from_rows(rows)
    }
}

#[async_trait]
impl MessageRepository for PostgresStore {
    async fn insert(&self, message: &ConnectionMessage, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO connection_messages (id, connection_id, data, version, sent_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(message.connection_id().as_uuid())
        .bind(to_json(message)?)
        .bind(message.version() as i64)
        .bind(message.sent_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert message", e))?;

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn update(&self, message: &ConnectionMessage, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        let updated = sqlx::query(
            r#"
            UPDATE connection_messages SET data = $2, version = $3
            WHERE id = $1 AND version = $3 - 1
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(to_json(message)?)
        .bind(message.version() as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("update message", e))?
        .rows_affected();

        if updated == 0 {
            let exists: Option<(i64,)> =
                sqlx::query_as("SELECT version FROM connection_messages WHERE id = $1")
                    .bind(message.id().as_uuid())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| db_error("find message", e))?;
            return Err(stale_or_missing(exists.is_some(), ErrorCode::MessageNotFound, "Message"));
        }

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<ConnectionMessage>, DomainError> {
        let row: Option<(Value,)> = sqlx::query_as("SELECT data FROM connection_messages WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find message", e))?;
        row.map(|(data,)| from_json(data)).transpose()
    }

    async fn list_by_connection(&self, connection_id: &ConnectionId) -> Result<Vec<ConnectionMessage>, DomainError> {
        let rows: Vec<(Value,)> = sqlx::query_as(
            "SELECT data FROM connection_messages WHERE connection_id = $1 ORDER BY position",
        )
        .bind(connection_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list messages", e))?;
        from_rows(rows)
    }
}
