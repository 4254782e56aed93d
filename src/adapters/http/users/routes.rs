//! HTTP routes for user endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{get_current_user, provision_user, update_user_role, update_user_status};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// - `GET|POST /users/me` - current user, provisioning
/// - `PATCH /admin/users/:id/role` - role change (admin)
/// - `PATCH /admin/users/:id/status` - suspend or reactivate (admin)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_current_user).post(provision_user))
        .route("/admin/users/:id/role", patch(update_user_role))
        .route("/admin/users/:id/status", patch(update_user_status))
}
