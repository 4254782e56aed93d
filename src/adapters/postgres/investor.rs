use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{append_audit, commit, db_error, from_json, stale_or_missing, to_json, PostgresStore};
use crate::domain::audit::AuditRecord;
use crate::domain::foundation::{BusinessId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::investor::InvestorPreferences;
use crate::domain::matching::MatchDismissal;
use crate::ports::{DismissalRepository, InvestorPreferencesRepository, SaveResult};

#[async_trait]
impl InvestorPreferencesRepository for PostgresStore {
    async fn save(&self, preferences: &InvestorPreferences, audit: &AuditRecord) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        let version = preferences.version() as i64;
        let written = if version == 1 {
            sqlx::query(
                r#"
                INSERT INTO investor_preferences (investor_id, data, version)
                VALUES ($1, $2, 1)
                ON CONFLICT (investor_id) DO NOTHING
                "#,
            )
            .bind(preferences.investor_id().as_str())
            .bind(to_json(preferences)?)
            .execute(&mut *tx)
            .await
        } else {
            sqlx::query(
                r#"
                UPDATE investor_preferences SET data = $2, version = $3
                WHERE investor_id = $1 AND version = $3 - 1
                "#,
            )
            .bind(preferences.investor_id().as_str())
            .bind(to_json(preferences)?)
            .bind(version)
            .execute(&mut *tx)
            .await
        }
        .map_err(|e| db_error("save preferences", e))?
        .rows_affected();

        if written == 0 {
            let exists: Option<(i64,)> =
                sqlx::query_as("SELECT version FROM investor_preferences WHERE investor_id = $1")
                    .bind(preferences.investor_id().as_str())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| db_error("find preferences", e))?;
            return Err(stale_or_missing(
                exists.is_some(),
                ErrorCode::PreferencesNotFound,
                "Preferences",
            ));
        }

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await
    }

    async fn find_by_investor(&self, investor_id: &UserId) -> Result<Option<InvestorPreferences>, DomainError> {
        let row: Option<(Value,)> =
            sqlx::query_as("SELECT data FROM investor_preferences WHERE investor_id = $1")
                .bind(investor_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find preferences", e))?;
        row.map(|(data,)| from_json(data)).transpose()
    }
}

#[async_trait]
impl DismissalRepository for PostgresStore {
    async fn insert_if_absent(
        &self,
        dismissal: &MatchDismissal,
        audit: &AuditRecord,
    ) -> Result<SaveResult<MatchDismissal>, DomainError> {
        let mut tx = self.begin().await?;
        let inserted = sqlx::query(
            r#"
            INSERT INTO match_dismissals (investor_id, business_id, dismissed_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (investor_id, business_id) DO NOTHING
            "#,
        )
        .bind(dismissal.investor_id.as_str())
        .bind(dismissal.business_id.as_uuid())
        .bind(dismissal.dismissed_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert dismissal", e))?
        .rows_affected()
            == 1;

        if !inserted {
            let (dismissed_at,): (chrono::DateTime<chrono::Utc>,) = sqlx::query_as(
                "SELECT dismissed_at FROM match_dismissals WHERE investor_id = $1 AND business_id = $2",
            )
            .bind(dismissal.investor_id.as_str())
            .bind(dismissal.business_id.as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error("find dismissal", e))?;
            return Ok(SaveResult::AlreadyExists(MatchDismissal {
                investor_id: dismissal.investor_id.clone(),
                business_id: dismissal.business_id,
                dismissed_at: Timestamp::from_datetime(dismissed_at),
            }));
        }

        append_audit(&mut tx, &self.signer, audit).await?;
        commit(tx).await?;
        Ok(SaveResult::Inserted)
    }

    async fn dismissed_for(&self, investor_id: &UserId) -> Result<HashSet<BusinessId>, DomainError> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT business_id FROM match_dismissals WHERE investor_id = $1")
                .bind(investor_id.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("list dismissals", e))?;
        Ok(rows.into_iter().map(|(id,)| BusinessId::from_uuid(id)).collect())
    }
}
