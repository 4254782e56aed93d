//! HTTP handlers for preference and matching endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{
    DismissalResponse, ExplainedMatchResponse, MatchResponse, MatchesQuery, PreferencesResponse,
};
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::Caller;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    DismissMatchCommand, ExplainMatchQuery, GetMatchedBusinessesQuery,
    SaveInvestorPreferencesCommand,
};
use crate::domain::foundation::{BusinessId, UserId};
use crate::domain::investor::PreferencesInput;

/// PUT /api/investors/me/preferences
pub async fn save_investor_preferences(
    State(state): State<AppState>,
    caller: Caller,
    Json(input): Json<PreferencesInput>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let prefs = state
        .save_investor_preferences_handler()
        .handle(SaveInvestorPreferencesCommand { input }, caller.metadata())
        .await?;
    Ok(Json(PreferencesResponse::from(&prefs)))
}

/// GET /api/matches
///
/// Ranked, dismissals excluded. Empty when the investor has no preferences.
pub async fn get_matched_businesses(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<MatchesQuery>,
) -> Result<Json<Vec<MatchResponse>>, ApiError> {
    let investor_id = match params.investor_id.as_deref() {
        Some(raw) => parse_id::<UserId>(raw, "investor")?,
        None => caller.user.id.clone(),
    };
    let matches = state
        .get_matched_businesses_handler()
        .handle(GetMatchedBusinessesQuery {
            user_id: caller.user.id,
            investor_id,
        })
        .await?;
    Ok(Json(matches.iter().map(MatchResponse::from).collect()))
}

/// POST /api/matches/:business_id/dismiss
///
/// 201 on the first dismissal, 200 when repeated.
pub async fn dismiss_match(
    State(state): State<AppState>,
    caller: Caller,
    Path(business_id): Path<String>,
) -> Result<Response, ApiError> {
    let cmd = DismissMatchCommand {
        business_id: parse_id::<BusinessId>(&business_id, "business")?,
    };
    let result = state
        .dismiss_match_handler()
        .handle(cmd, caller.metadata())
        .await?;

    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let body = DismissalResponse::new(&result.dismissal, result.created);
    Ok((status, Json(body)).into_response())
}

/// GET /api/matches/:business_id/explanation
pub async fn explain_match(
    State(state): State<AppState>,
    caller: Caller,
    Path(business_id): Path<String>,
) -> Result<Json<ExplainedMatchResponse>, ApiError> {
    let explained = state
        .explain_match_handler()
        .handle(ExplainMatchQuery {
            user_id: caller.user.id,
            business_id: parse_id::<BusinessId>(&business_id, "business")?,
        })
        .await?;
    Ok(Json(ExplainedMatchResponse::from(explained)))
}
