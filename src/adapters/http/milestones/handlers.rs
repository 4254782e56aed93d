//! HTTP handlers for milestone endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::MilestoneResponse;
use crate::adapters::http::connections::{ReviewDocumentRequest, SubmitDocumentRequest};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::Caller;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    AgreeToMilestoneCommand, ListMilestonesQuery, ProposeMilestoneCommand,
    SubmitMilestoneDocumentCommand, VerifyMilestoneDocumentCommand,
};
use crate::domain::foundation::{ConnectionId, MilestoneId};
use crate::domain::milestone::MilestoneProposal;

/// GET /api/connections/:id/milestones
pub async fn list_milestones(
    State(state): State<AppState>,
    caller: Caller,
    Path(connection_id): Path<String>,
) -> Result<Json<Vec<MilestoneResponse>>, ApiError> {
    let milestones = state
        .list_milestones_handler()
        .handle(ListMilestonesQuery {
            user_id: caller.user.id,
            connection_id: parse_id::<ConnectionId>(&connection_id, "connection")?,
        })
        .await?;
    Ok(Json(milestones.iter().map(MilestoneResponse::from).collect()))
}

/// POST /api/connections/:id/milestones
pub async fn propose_milestone(
    State(state): State<AppState>,
    caller: Caller,
    Path(connection_id): Path<String>,
    Json(proposal): Json<MilestoneProposal>,
) -> Result<Response, ApiError> {
    let cmd = ProposeMilestoneCommand {
        connection_id: parse_id::<ConnectionId>(&connection_id, "connection")?,
        proposal,
    };
    let milestone = state
        .propose_milestone_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(MilestoneResponse::from(&milestone))).into_response())
}

/// POST /api/milestones/:id/agree
pub async fn agree_to_milestone(
    State(state): State<AppState>,
    caller: Caller,
    Path(milestone_id): Path<String>,
) -> Result<Json<MilestoneResponse>, ApiError> {
    let cmd = AgreeToMilestoneCommand {
        milestone_id: parse_id::<MilestoneId>(&milestone_id, "milestone")?,
    };
    let milestone = state
        .agree_to_milestone_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok(Json(MilestoneResponse::from(&milestone)))
}

/// POST /api/milestones/:id/document
pub async fn submit_milestone_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(milestone_id): Path<String>,
    Json(req): Json<SubmitDocumentRequest>,
) -> Result<Json<MilestoneResponse>, ApiError> {
    let cmd = SubmitMilestoneDocumentCommand {
        milestone_id: parse_id::<MilestoneId>(&milestone_id, "milestone")?,
        document_url: req.document_url,
    };
    let milestone = state
        .submit_milestone_document_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok(Json(MilestoneResponse::from(&milestone)))
}

/// POST /api/milestones/:id/verify
pub async fn verify_milestone_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(milestone_id): Path<String>,
    Json(req): Json<ReviewDocumentRequest>,
) -> Result<Json<MilestoneResponse>, ApiError> {
    let cmd = VerifyMilestoneDocumentCommand {
        milestone_id: parse_id::<MilestoneId>(&milestone_id, "milestone")?,
        approved: req.approved,
    };
    let milestone = state
        .verify_milestone_document_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok(Json(MilestoneResponse::from(&milestone)))
}
