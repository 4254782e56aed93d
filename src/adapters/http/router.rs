//! API router assembly.

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::audit::audit_routes;
use super::businesses::business_routes;
use super::connections::connection_routes;
use super::matching::matching_routes;
use super::middleware::{auth_middleware, AuthState};
use super::milestones::milestone_routes;
use super::state::AppState;
use super::users::user_routes;
use crate::config::ServerConfig;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// All endpoints under `/api`, plus an unauthenticated `/health`.
///
/// Bearer tokens are validated for every route; a route rejects with 401
/// only when it needs a caller.
pub fn api_router(state: AppState, validator: AuthState) -> Router {
    let api = Router::new()
        .merge(user_routes())
        .merge(audit_routes())
        .merge(business_routes())
        .merge(matching_routes())
        .merge(connection_routes())
        .merge(milestone_routes());

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .with_state(state)
}

/// Wraps the router with request ids, tracing, timeout, compression and CORS.
pub fn with_http_layers(router: Router, config: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(CompressionLayer::new())
            .layer(cors),
    )
}
