//! End-to-end tests for users, matching, connections and audit over HTTP.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, call, open_connection, provision, seeded_app};

// =============================================================================
// Users & Authentication
// =============================================================================

#[tokio::test]
async fn health_needs_no_token() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_token_is_401() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn unknown_token_is_401() {
    let app = app();
    let (status, _) = call(&app, Method::GET, "/api/users/me", Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn provisioning_is_idempotent() {
    let app = app();

    let (first, body) = call(&app, Method::POST, "/api/users/me", Some("owner-token"), None).await;
    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(body["created"], true);
    assert_eq!(body["user"]["role"], "user");

    let (second, body) = call(&app, Method::POST, "/api/users/me", Some("owner-token"), None).await;
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body["created"], false);
}

#[tokio::test]
async fn bootstrap_subject_is_provisioned_as_admin() {
    let app = app();
    let body = provision(&app, "admin-token").await;
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
async fn non_admin_cannot_assign_roles() {
    let app = app();
    provision(&app, "owner-token").await;
    provision(&app, "outsider-token").await;

    let (status, body) = call(
        &app,
        Method::PATCH,
        "/api/admin/users/owner/role",
        Some("outsider-token"),
        Some(json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn unprovisioned_caller_is_401() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/api/connections", Some("investor-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

// =============================================================================
// Matching
// =============================================================================

#[tokio::test]
async fn investor_sees_matching_business() {
    let (app, business_id) = seeded_app().await;

    let (status, body) = call(&app, Method::GET, "/api/matches", Some("investor-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    let matches = body.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["business"]["id"], business_id.as_str());
    assert!(matches[0]["score"]["total"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn dismissed_business_leaves_the_match_list() {
    let (app, business_id) = seeded_app().await;

    let uri = format!("/api/matches/{}/dismiss", business_id);
    let (status, _) = call(&app, Method::POST, &uri, Some("investor-token"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    let (again, _) = call(&app, Method::POST, &uri, Some("investor-token"), None).await;
    assert_eq!(again, StatusCode::OK);

    let (_, body) = call(&app, Method::GET, "/api/matches", Some("investor-token"), None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn explanation_falls_back_to_template() {
    let (app, business_id) = seeded_app().await;

    let uri = format!("/api/matches/{}/explanation", business_id);
    let (status, body) = call(&app, Method::GET, &uri, Some("investor-token"), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert!(body["explanation"].as_str().is_some_and(|text| !text.is_empty()));
}

#[tokio::test]
async fn dismissed_business_has_no_explanation() {
    let (app, business_id) = seeded_app().await;
    call(&app, Method::POST, &format!("/api/matches/{}/dismiss", business_id), Some("investor-token"), None).await;

    let uri = format!("/api/matches/{}/explanation", business_id);
    let (status, _) = call(&app, Method::GET, &uri, Some("investor-token"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_cannot_read_investor_matches() {
    let (app, _) = seeded_app().await;
    let (status, _) = call(
        &app,
        Method::GET,
        "/api/matches?investor_id=investor",
        Some("owner-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Connections
// =============================================================================

#[tokio::test]
async fn second_initiate_returns_existing_connection() {
    let (app, business_id) = seeded_app().await;
    let connection_id = open_connection(&app, &business_id).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/connections",
        Some("investor-token"),
        Some(json!({ "business_id": business_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], connection_id.as_str());
    assert_eq!(body["status"], "lead");
}

#[tokio::test]
async fn outsider_cannot_read_connection() {
    let (app, business_id) = seeded_app().await;
    let connection_id = open_connection(&app, &business_id).await;

    let uri = format!("/api/connections/{}", connection_id);
    let (status, body) = call(&app, Method::GET, &uri, Some("outsider-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = call(&app, Method::GET, &uri, Some("owner-token"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_connection_id_is_400() {
    let (app, _) = seeded_app().await;
    let (status, body) = call(&app, Method::GET, "/api/connections/not-a-uuid", Some("owner-token"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn skipping_a_stage_is_409() {
    let (app, business_id) = seeded_app().await;
    let connection_id = open_connection(&app, &business_id).await;
    let uri = format!("/api/connections/{}/advance", connection_id);

    let (status, _) = call(&app, Method::POST, &uri, Some("owner-token"), Some(json!({ "status": "contract" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, Method::POST, &uri, Some("owner-token"), Some(json!({ "status": "connected" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "connected");
    assert_eq!(body["status_history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn messages_flow_between_participants() {
    let (app, business_id) = seeded_app().await;
    let connection_id = open_connection(&app, &business_id).await;
    let uri = format!("/api/connections/{}/messages", connection_id);

    let (status, _) = call(&app, Method::POST, &uri, Some("investor-token"), Some(json!({ "body": "Can we talk terms?" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, Method::GET, &uri, Some("owner-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender_id"], "investor");

    let (status, _) = call(&app, Method::POST, &uri, Some("outsider-token"), Some(json!({ "body": "hello" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Audit
// =============================================================================

#[tokio::test]
async fn audit_chain_verifies_after_activity() {
    let (app, business_id) = seeded_app().await;
    open_connection(&app, &business_id).await;
    // A denied read is audited too.
    call(&app, Method::GET, "/api/admin/audit", Some("outsider-token"), None).await;

    let (status, body) = call(&app, Method::GET, "/api/admin/audit/verify", Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert!(body["entries_checked"].as_u64().unwrap() > 0);

    let (status, body) = call(&app, Method::GET, "/api/admin/audit", Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn audit_log_is_admin_only() {
    let (app, _) = seeded_app().await;
    let (status, _) = call(&app, Method::GET, "/api/admin/audit", Some("investor-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
