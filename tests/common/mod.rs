//! Shared harness for the HTTP integration tests.
//!
//! Builds the full router over the in-memory store with development tokens
//! and drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use secrecy::Secret;
use serde_json::{json, Value};
use tower::ServiceExt;

use bridgeway::adapters::ai::TemplateExplainer;
use bridgeway::adapters::auth::MockSessionValidator;
use bridgeway::adapters::http::{api_router, AppState, MatchingSettings};
use bridgeway::adapters::memory::InMemoryStore;
use bridgeway::adapters::reference::BuiltinReferenceSource;
use bridgeway::domain::audit::AuditSigner;
use bridgeway::domain::foundation::UserId;
use bridgeway::ports::ReferenceDataSource;

pub fn app() -> Router {
    let signer = AuditSigner::new(Secret::new("integration-test-signing-key-0123456789".to_string()));
    let store = Arc::new(InMemoryStore::new(signer.clone()));
    let reference = Arc::new(BuiltinReferenceSource.load().unwrap());
    let state = AppState::from_store(
        store,
        signer,
        Arc::new(TemplateExplainer),
        reference,
        MatchingSettings {
            min_score: 0,
            explain_timeout: Duration::from_secs(2),
        },
    )
    .with_bootstrap_admins(HashSet::from([UserId::new("admin").unwrap()]));

    let validator = MockSessionValidator::new()
        .with_test_user("admin-token", "admin")
        .with_test_user("owner-token", "owner")
        .with_test_user("investor-token", "investor")
        .with_test_user("officer-token", "officer")
        .with_test_user("outsider-token", "outsider");

    api_router(state, Arc::new(validator))
}

pub async fn call(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn provision(app: &Router, token: &str) -> Value {
    let (status, body) = call(app, Method::POST, "/api/users/me", Some(token), None).await;
    assert!(status == StatusCode::CREATED || status == StatusCode::OK, "provision: {}", status);
    body
}

pub async fn assign_role(app: &Router, user_id: &str, role: &str) {
    let (status, body) = call(
        app,
        Method::PATCH,
        &format!("/api/admin/users/{}/role", user_id),
        Some("admin-token"),
        Some(json!({ "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "assign role: {}", body);
}

pub fn business_draft() -> Value {
    json!({
        "name": "Kobo Ledger",
        "sector": "Fintech",
        "location": { "country": "Nigeria", "state": "Lagos" },
        "stage": "early",
        "funding_ask": 250000,
        "contact_email": "founder@kobo.example"
    })
}

/// Admin, owner with a profile, investor with preferences.
pub async fn seeded_app() -> (Router, String) {
    let app = app();
    provision(&app, "admin-token").await;
    provision(&app, "owner-token").await;
    provision(&app, "investor-token").await;
    provision(&app, "outsider-token").await;
    assign_role(&app, "owner", "business_owner").await;
    assign_role(&app, "investor", "investor").await;

    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/businesses/me",
        Some("owner-token"),
        Some(business_draft()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "save business: {}", body);
    let business_id = body["business"]["id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/investors/me/preferences",
        Some("investor-token"),
        Some(json!({
            "target_sectors": ["Fintech"],
            "target_regions": ["Lagos"],
            "capital_min": 100000,
            "capital_max": 500000,
            "risk_appetite": "moderate",
            "preferred_stages": ["early"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "save preferences: {}", body);

    (app, business_id)
}

pub async fn open_connection(app: &Router, business_id: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/connections",
        Some("investor-token"),
        Some(json!({ "business_id": business_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "initiate: {}", body);
    body["id"].as_str().unwrap().to_string()
}
