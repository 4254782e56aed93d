//! HTTP handlers for user endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{
    ProvisionUserResponse, RoleChangeResponse, StatusChangeResponse, UpdateRoleRequest,
    UpdateStatusRequest, UserResponse,
};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::Caller;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    GetCurrentUserQuery, ProvisionUserCommand, UpdateUserRoleCommand, UpdateUserStatusCommand,
};

/// POST /api/users/me - create the platform user on first login.
///
/// 201 when the account was created, 200 when it already existed.
pub async fn provision_user(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Response, ApiError> {
    let result = state
        .provision_user_handler()
        .handle(
            ProvisionUserCommand {
                identity: caller.user.clone(),
            },
            caller.metadata(),
        )
        .await?;

    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let body = ProvisionUserResponse {
        user: UserResponse::from(&result.user),
        created: result.created,
    };
    Ok((status, Json(body)).into_response())
}

/// GET /api/users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .get_current_user_handler()
        .handle(GetCurrentUserQuery {
            user_id: caller.user.id,
        })
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PATCH /api/admin/users/:id/role
pub async fn update_user_role(
    State(state): State<AppState>,
    caller: Caller,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<RoleChangeResponse>, ApiError> {
    let cmd = UpdateUserRoleCommand {
        target_id: parse_id(&user_id, "user")?,
        role: req.role,
        jurisdiction: req.jurisdiction,
    };
    let result = state
        .update_user_role_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok(Json(RoleChangeResponse {
        user: UserResponse::from(&result.user),
        previous_role: result.previous_role,
    }))
}

/// PATCH /api/admin/users/:id/status
pub async fn update_user_status(
    State(state): State<AppState>,
    caller: Caller,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<StatusChangeResponse>, ApiError> {
    let cmd = UpdateUserStatusCommand {
        target_id: parse_id(&user_id, "user")?,
        status: req.status,
    };
    let result = state
        .update_user_status_handler()
        .handle(cmd, caller.metadata())
        .await?;
    Ok(Json(StatusChangeResponse {
        user: UserResponse::from(&result.user),
        previous_status: result.previous_status,
    }))
}
