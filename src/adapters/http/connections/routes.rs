//! HTTP routes for connection endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    advance_connection, get_connection, get_my_connections, initiate_connection, list_messages,
    request_document, send_message, submit_requested_document, verify_requested_document,
};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// - `GET|POST /connections` - caller's connections, initiate (investor)
/// - `GET /connections/:id` - one connection (participants, admins)
/// - `POST /connections/:id/advance` - next lifecycle stage
/// - `GET|POST /connections/:id/messages` - thread
/// - `POST /connections/:id/document-requests` - ask for a document
/// - `POST /document-requests/:id/submit|verify` - answer and review it
pub fn connection_routes() -> Router<AppState> {
    Router::new()
        .route("/connections", get(get_my_connections).post(initiate_connection))
        .route("/connections/:id", get(get_connection))
        .route("/connections/:id/advance", post(advance_connection))
        .route("/connections/:id/messages", get(list_messages).post(send_message))
        .route("/connections/:id/document-requests", post(request_document))
        .route("/document-requests/:id/submit", post(submit_requested_document))
        .route("/document-requests/:id/verify", post(verify_requested_document))
}
