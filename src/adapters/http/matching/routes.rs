//! HTTP routes for preference and matching endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    dismiss_match, explain_match, get_matched_businesses, save_investor_preferences,
};
use crate::adapters::http::state::AppState;

pub fn matching_routes() -> Router<AppState> {
    Router::new()
        .route("/investors/me/preferences", put(save_investor_preferences))
        .route("/matches", get(get_matched_businesses))
        .route("/matches/:business_id/dismiss", post(dismiss_match))
        .route("/matches/:business_id/explanation", get(explain_match))
}
