use async_trait::async_trait;
use serde_json::Value;

use super::{
    append_audit, commit, db_error, from_json, from_rows, is_unique_violation, stale_or_missing,
    to_json, PostgresStore,
};
use crate::domain::audit::AuditRecord;
use crate::domain::business::{BusinessProfile, VerificationDocument, VerificationStatus};
use crate::domain::foundation::{BusinessId, DocumentId, DomainError, ErrorCode, UserId};
use crate::ports::{BusinessRepository, VerificationDocumentRepository};

#[async_trait]
impl BusinessRepository for PostgresStore {
    async fn insert(&self, business: &BusinessProfile, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO businesses (id, owner_id, verification_status, data, version, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(business.id().as_uuid())
        .bind(business.owner_id().as_str())
        .bind(business.verification_status().as_str())
        .bind(to_json(business)?)
        .bind(business.version() as i64)
        .bind(business.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "businesses_owner_id_key") {
                return DomainError::new(
                    ErrorCode::ConcurrentModification,
                    "Owner already has a business profile",
                );
            }
            db_error("insert business", e)
        })?;

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn update(&self, business: &BusinessProfile, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        let updated = sqlx::query(
            r#"
            UPDATE businesses SET verification_status = $2, data = $3, version = $4
            WHERE id = $1 AND version = $4 - 1
            "#,
        )
        .bind(business.id().as_uuid())
        .bind(business.verification_status().as_str())
        .bind(to_json(business)?)
        .bind(business.version() as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("update business", e))?
        .rows_affected();

        if updated == 0 {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT version FROM businesses WHERE id = $1")
                .bind(business.id().as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("find business", e))?;
            return Err(stale_or_missing(exists.is_some(), ErrorCode::BusinessNotFound, "Business"));
        }

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<BusinessProfile>, DomainError> {
        let row: Option<(Value,)> = sqlx::query_as("SELECT data FROM businesses WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find business", e))?;
        row.map(|(data,)| from_json(data)).transpose()
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Option<BusinessProfile>, DomainError> {
        let row: Option<(Value,)> = sqlx::query_as("SELECT data FROM businesses WHERE owner_id = $1")
            .bind(owner_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find business", e))?;
        row.map(|(data,)| from_json(data)).transpose()
    }

    async fn list_all(&self) -> Result<Vec<BusinessProfile>, DomainError> {
        let rows: Vec<(Value,)> = sqlx::query_as("SELECT data FROM businesses ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list businesses", e))?;
        from_rows(rows)
    }

    async fn list_by_status(&self, status: VerificationStatus) -> Result<Vec<BusinessProfile>, DomainError> {
        let rows: Vec<(Value,)> = sqlx::query_as(
            "SELECT data FROM businesses WHERE verification_status = $1 ORDER BY created_at, id",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list businesses", e))?;
        from_rows(rows)
    }
}

#[async_trait]
impl VerificationDocumentRepository for PostgresStore {
    async fn insert(&self, document: &VerificationDocument, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO verification_documents (id, business_id, status, data, version, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(document.business_id().as_uuid())
        .bind(document.status().as_str())
        .bind(to_json(document)?)
        .bind(document.version() as i64)
        .bind(document.uploaded_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert document", e))?;

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn update(&self, document: &VerificationDocument, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        let updated = sqlx::query(
            r#"
            UPDATE verification_documents SET status = $2, data = $3, version = $4
            WHERE id = $1 AND version = $4 - 1
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(document.status().as_str())
        .bind(to_json(document)?)
        .bind(document.version() as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("update document", e))?
        .rows_affected();

        if updated == 0 {
            let exists: Option<(i64,)> =
                sqlx::query_as("SELECT version FROM verification_documents WHERE id = $1")
                    .bind(document.id().as_uuid())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| db_error("find document", e))?;
            return Err(stale_or_missing(exists.is_some(), ErrorCode::DocumentNotFound, "Document"));
        }

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<VerificationDocument>, DomainError> {
        let row: Option<(Value,)> =
            sqlx::query_as("SELECT data FROM verification_documents WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find document", e))?;
        row.map(|(data,)| from_json(data)).transpose()
    }

    async fn list_by_business(&self, business_id: &BusinessId) -> Result<Vec<VerificationDocument>, DomainError> {
        let rows: Vec<(Value,)> = sqlx::query_as(
            "SELECT data FROM verification_documents WHERE business_id = $1 ORDER BY uploaded_at, id",
        )
        .bind(business_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list documents", e))?;
        from_rows(rows)
    }
}
