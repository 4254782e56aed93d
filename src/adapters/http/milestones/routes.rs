//! HTTP routes for milestone endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    agree_to_milestone, list_milestones, propose_milestone, submit_milestone_document,
    verify_milestone_document,
};
use crate::adapters::http::state::AppState;

pub fn milestone_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/connections/:id/milestones",
            get(list_milestones).post(propose_milestone),
        )
        .route("/milestones/:id/agree", post(agree_to_milestone))
        .route("/milestones/:id/document", post(submit_milestone_document))
        .route("/milestones/:id/verify", post(verify_milestone_document))
}
