//! Identity header resolution.

use axum::http::StatusCode;

use officehub_core::types::UserId;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/notifications", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_malformed_header_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request_with_header("GET", "/api/notifications/unread-count", "not-a-uuid")
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_user_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(UserId::new()))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inactive_user_is_forbidden() {
    let app = TestApp::new();
    let user = app.inactive_user();

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(user.id))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_health_needs_no_identity() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");

    let response = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["database"], "memory");
    assert_eq!(response.body["ws_connections"], 0);
}
