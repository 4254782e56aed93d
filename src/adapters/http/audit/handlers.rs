//! HTTP handlers for audit endpoints.
//!
//! Entries are returned as stored; the hash chain fields are part of the
//! response so an external verifier can re-walk them.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::Caller;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{ListAuditLogQuery, VerifyAuditChainQuery};
use crate::domain::audit::{AuditLogEntry, AuditQuery, ChainVerification};

/// GET /api/admin/audit?actor_id=&action=&entity_type=&entity_id=&limit=
pub async fn list_audit_log(
    State(state): State<AppState>,
    caller: Caller,
    Query(filter): Query<AuditQuery>,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError> {
    let entries = state
        .list_audit_log_handler()
        .handle(ListAuditLogQuery {
            user_id: caller.user.id,
            filter,
        })
        .await?;
    Ok(Json(entries))
}

/// GET /api/admin/audit/verify
pub async fn verify_audit_chain(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ChainVerification>, ApiError> {
    let verification = state
        .verify_audit_chain_handler()
        .handle(VerifyAuditChainQuery {
            user_id: caller.user.id,
        })
        .await?;
    Ok(Json(verification))
}
