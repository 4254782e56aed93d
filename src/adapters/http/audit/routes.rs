//! HTTP routes for audit endpoints.

use axum::{routing::get, Router};

use super::handlers::{list_audit_log, verify_audit_chain};
use crate::adapters::http::state::AppState;

pub fn audit_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/audit", get(list_audit_log))
        .route("/admin/audit/verify", get(verify_audit_chain))
}
