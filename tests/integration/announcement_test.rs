//! Announcement endpoints.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use officehub_entity::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_only_admins_create() {
    let app = TestApp::new();
    let employee = app.user(UserRole::Employee);

    let response = app
        .request(
            "POST",
            "/api/announcements",
            Some(json!({ "title": "Hello", "content": "World", "is_published": true })),
            Some(employee.id),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_targeting_controls_visibility() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let trainee = app.user_in(UserRole::Trainee, Some("Finance"));
    let employee = app.user_in(UserRole::Employee, Some("Finance"));
    let elsewhere = app.user_in(UserRole::Trainee, Some("Legal"));

    let response = app
        .request(
            "POST",
            "/api/announcements",
            Some(json!({
                "title": "Trainee onboarding",
                "content": "Orientation starts Monday",
                "priority": "high",
                "target_roles": ["trainee"],
                "target_departments": ["Finance"],
                "is_published": true,
            })),
            Some(admin.id),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["priority"], "high");

    let visible = |body: &serde_json::Value| body.as_array().map(|a| a.len()).unwrap_or(0);

    let response = app.request("GET", "/api/announcements", None, Some(trainee.id)).await;
    assert_eq!(visible(&response.body), 1);

    let response = app.request("GET", "/api/announcements", None, Some(employee.id)).await;
    assert_eq!(visible(&response.body), 0);

    let response = app.request("GET", "/api/announcements", None, Some(elsewhere.id)).await;
    assert_eq!(visible(&response.body), 0);
}

#[tokio::test]
async fn test_scheduled_announcement_hidden_until_published() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let employee = app.user(UserRole::Employee);

    let response = app
        .request(
            "POST",
            "/api/announcements",
            Some(json!({
                "title": "Office move",
                "content": "We move next month",
                "publish_at": Utc::now() + Duration::days(7),
            })),
            Some(admin.id),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["is_published"], false);

    let response = app.request("GET", "/api/announcements", None, Some(employee.id)).await;
    assert_eq!(response.body, json!([]));

    let response = app.request("GET", "/api/announcements", None, Some(admin.id)).await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_published_future_announcement_waits_for_publisher() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let employee = app.user(UserRole::Employee);

    let response = app
        .request(
            "POST",
            "/api/announcements",
            Some(json!({
                "title": "Quarterly review",
                "content": "All-hands in the main hall",
                "publish_at": Utc::now() + Duration::hours(2),
                "is_published": true,
            })),
            Some(admin.id),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["is_published"], false);

    let response = app.request("GET", "/api/announcements", None, Some(employee.id)).await;
    assert_eq!(response.body, json!([]));

    let published = app
        .state
        .announcements
        .publish_due(Utc::now() + Duration::hours(3))
        .await
        .unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].title, "Quarterly review");

    let response = app.request("GET", "/api/announcements", None, Some(employee.id)).await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}
