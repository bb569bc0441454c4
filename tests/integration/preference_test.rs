//! Preference endpoints and their effect on delivery.

use axum::http::StatusCode;
use serde_json::json;

use officehub_entity::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_defaults_without_stored_record() {
    let app = TestApp::new();
    let user = app.user(UserRole::Employee);

    let response = app
        .request("GET", "/api/notifications/preferences", None, Some(user.id))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user_id"], json!(user.id));
    assert_eq!(response.body["email_enabled"], true);
    assert_eq!(response.body["push_task_updates"], true);
    assert_eq!(response.body["push_salary_updates"], false);
    assert_eq!(response.body["quiet_hours_enabled"], false);
}

#[tokio::test]
async fn test_partial_update_persists_and_keeps_other_fields() {
    let app = TestApp::new();
    let user = app.user(UserRole::Employee);

    let response = app
        .request(
            "PUT",
            "/api/notifications/preferences",
            Some(json!({
                "email_task_updates": false,
                "quiet_hours_enabled": true,
                "quiet_hours_start": "22:00:00",
                "quiet_hours_end": "07:00:00",
            })),
            Some(user.id),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email_task_updates"], false);

    let response = app
        .request("GET", "/api/notifications/preferences", None, Some(user.id))
        .await;
    assert_eq!(response.body["email_task_updates"], false);
    assert_eq!(response.body["email_salary_updates"], true);
    assert_eq!(response.body["quiet_hours_start"], "22:00:00");
    assert_eq!(response.body["quiet_hours_end"], "07:00:00");
}

#[tokio::test]
async fn test_disabled_switch_blocks_email_on_create() {
    let app = TestApp::with_config(|c| c.notifications.email_on_create = true);
    let admin = app.user(UserRole::Admin);
    let muted = app.user(UserRole::Employee);
    let listening = app.user(UserRole::Employee);

    app.request(
        "PUT",
        "/api/notifications/preferences",
        Some(json!({ "email_task_updates": false })),
        Some(muted.id),
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "role": "employee",
                "title": "Sprint planning",
                "message": "Tasks for next week are up",
                "type": "task",
            })),
            Some(admin.id),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let sent = app.transport.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec![listening.email.clone()]);
}
