//! HTTP routes for business and verification document endpoints.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use super::handlers::{
    approve_document, expire_document, get_business_documents, get_pending_businesses,
    reject_document, save_business_profile, submit_for_verification, update_business_verification,
    upload_verification_document,
};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// ## Owner
/// - `PUT /businesses/me` - create or update the caller's profile
/// - `POST /businesses/me/submit` - submit for verification
/// - `POST /businesses/:id/documents` - upload a verification document
///
/// ## Officers, regulators, admins
/// - `GET /businesses/pending` - verification queue
/// - `PATCH /businesses/:id/verification` - decide verification
/// - `GET /businesses/:id/documents` - documents of a business
/// - `POST /documents/:id/approve|reject|expire` - document review
pub fn business_routes() -> Router<AppState> {
    Router::new()
        .route("/businesses/me", put(save_business_profile))
        .route("/businesses/me/submit", post(submit_for_verification))
        .route("/businesses/pending", get(get_pending_businesses))
        .route("/businesses/:id/verification", patch(update_business_verification))
        .route(
            "/businesses/:id/documents",
            get(get_business_documents).post(upload_verification_document),
        )
        .route("/documents/:id/approve", post(approve_document))
        .route("/documents/:id/reject", post(reject_document))
        .route("/documents/:id/expire", post(expire_document))
}
