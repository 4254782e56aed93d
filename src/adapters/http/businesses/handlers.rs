//! HTTP handlers for business and verification document endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{
    BusinessResponse, DocumentResponse, RejectDocumentRequest, SaveBusinessResponse,
    UpdateVerificationRequest, UploadDocumentRequest,
};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::Caller;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    DocumentDecision, GetBusinessDocumentsQuery, GetPendingBusinessesQuery,
    ReviewVerificationDocumentCommand, SaveBusinessProfileCommand, UpdateBusinessVerificationCommand,
    UploadVerificationDocumentCommand,
};
use crate::domain::business::BusinessProfileDraft;
use crate::domain::foundation::{BusinessId, DocumentId};

// ════════════════════════════════════════════════════════════════════════════
// Profile
// ════════════════════════════════════════════════════════════════════════════

/// PUT /api/businesses/me
pub async fn save_business_profile(
    State(state): State<AppState>,
    caller: Caller,
    Json(details): Json<BusinessProfileDraft>,
) -> Result<Response, ApiError> {
    let result = state
        .save_business_profile_handler()
        .handle(SaveBusinessProfileCommand { details }, caller.metadata())
        .await?;

    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let body = SaveBusinessResponse {
        business: BusinessResponse::from(&result.business),
        created: result.created,
    };
    Ok((status, Json(body)).into_response())
}

/// POST /api/businesses/me/submit
pub async fn submit_for_verification(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<BusinessResponse>, ApiError> {
    let business = state
        .submit_for_verification_handler()
        .handle(caller.metadata())
        .await?;
    Ok(Json(BusinessResponse::from(&business)))
}

// ════════════════════════════════════════════════════════════════════════════
// Officer review
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/businesses/pending
pub async fn get_pending_businesses(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<BusinessResponse>>, ApiError> {
    let pending = state
        .get_pending_businesses_handler()
        .handle(GetPendingBusinessesQuery {
            user_id: caller.user.id,
        })
        .await?;
    Ok(Json(pending.iter().map(BusinessResponse::from).collect()))
}

/// PATCH /api/businesses/:id/verification
pub async fn update_business_verification(
    State(state): State<AppState>,
    caller: Caller,
    Path(business_id): Path<String>,
    Json(req): Json<UpdateVerificationRequest>,
) -> Result<Json<BusinessResponse>, ApiError> {
    let cmd = UpdateBusinessVerificationCommand {
        business_id: parse_id::<BusinessId>(&business_id, "business")?,
        status: req.status,
        credibility_score: req.credibility_score,
    };
    let business = state
        .update_business_verification_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok(Json(BusinessResponse::from(&business)))
}

// ════════════════════════════════════════════════════════════════════════════
// Documents
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/businesses/:id/documents
pub async fn get_business_documents(
    State(state): State<AppState>,
    caller: Caller,
    Path(business_id): Path<String>,
) -> Result<Json<Vec<DocumentResponse>>, ApiError> {
    let documents = state
        .get_business_documents_handler()
        .handle(GetBusinessDocumentsQuery {
            user_id: caller.user.id,
            business_id: parse_id::<BusinessId>(&business_id, "business")?,
        })
        .await?;
    Ok(Json(documents.iter().map(DocumentResponse::from).collect()))
}

/// POST /api/businesses/:id/documents
pub async fn upload_verification_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(business_id): Path<String>,
    Json(req): Json<UploadDocumentRequest>,
) -> Result<Response, ApiError> {
    let cmd = UploadVerificationDocumentCommand {
        business_id: parse_id::<BusinessId>(&business_id, "business")?,
        document_type: req.document_type,
        category: req.category,
        file_ref: req.file_ref,
    };
    let document = state
        .upload_verification_document_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(DocumentResponse::from(&document))).into_response())
}

/// POST /api/documents/:id/approve
pub async fn approve_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    review(&state, &caller, &document_id, DocumentDecision::Approve).await
}

/// POST /api/documents/:id/reject
pub async fn reject_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(document_id): Path<String>,
    Json(req): Json<RejectDocumentRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let decision = DocumentDecision::Reject { reason: req.reason };
    review(&state, &caller, &document_id, decision).await
}

/// POST /api/documents/:id/expire
pub async fn expire_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    review(&state, &caller, &document_id, DocumentDecision::Expire).await
}

async fn review(
    state: &AppState,
    caller: &Caller,
    document_id: &str,
    decision: DocumentDecision,
) -> Result<Json<DocumentResponse>, ApiError> {
    let cmd = ReviewVerificationDocumentCommand {
        document_id: parse_id::<DocumentId>(document_id, "document")?,
        decision,
    };
    let document = state
        .review_verification_document_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok(Json(DocumentResponse::from(&document)))
}
