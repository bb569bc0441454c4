//! Notification REST endpoints.

use axum::http::StatusCode;
use serde_json::json;

use officehub_entity::{NewNotification, NotificationCategory, UserRole};

use crate::helpers::TestApp;

async fn seed(app: &TestApp, user: &officehub_entity::UserProfile, title: &str, category: NotificationCategory) -> String {
    app.state
        .notifications
        .create(NewNotification::new(user.id, title, "body", category))
        .await
        .expect("Failed to seed notification")
        .id
        .to_string()
}

#[tokio::test]
async fn test_list_is_paginated_newest_first() {
    let app = TestApp::new();
    let user = app.user(UserRole::Employee);
    for title in ["one", "two", "three"] {
        seed(&app, &user, title, NotificationCategory::Info).await;
    }

    let response = app
        .request("GET", "/api/notifications?page=1&per_page=2", None, Some(user.id))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 3);
    let titles: Vec<&str> = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["three", "two"]);
}

#[tokio::test]
async fn test_mark_read_is_recipient_scoped() {
    let app = TestApp::new();
    let owner = app.user(UserRole::Employee);
    let other = app.user(UserRole::Employee);
    let id = seed(&app, &owner, "mine", NotificationCategory::Task).await;
    let path = format!("/api/notifications/{id}/read");

    let response = app.request("POST", &path, None, Some(other.id)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("POST", &path, None, Some(owner.id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["is_read"], true);
    let first_read_at = response.body["read_at"].clone();
    assert!(!first_read_at.is_null());

    let response = app.request("POST", &path, None, Some(owner.id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["read_at"], first_read_at);
}

#[tokio::test]
async fn test_mark_read_malformed_id_is_validation_error() {
    let app = TestApp::new();
    let owner = app.user(UserRole::Employee);

    let response = app
        .request("POST", "/api/notifications/not-a-uuid/read", None, Some(owner.id))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].as_str().unwrap().contains("not-a-uuid"));
}

#[tokio::test]
async fn test_read_all_and_unread_count() {
    let app = TestApp::new();
    let user = app.user(UserRole::Trainee);
    for title in ["a", "b"] {
        seed(&app, &user, title, NotificationCategory::Learning).await;
    }

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(user.id))
        .await;
    assert_eq!(response.body, json!({ "count": 2 }));

    let response = app
        .request("POST", "/api/notifications/read-all", None, Some(user.id))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "updated": 2 }));

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(user.id))
        .await;
    assert_eq!(response.body, json!({ "count": 0 }));
}

#[tokio::test]
async fn test_stats_group_by_category() {
    let app = TestApp::new();
    let user = app.user(UserRole::Employee);
    seed(&app, &user, "t1", NotificationCategory::Task).await;
    seed(&app, &user, "t2", NotificationCategory::Task).await;
    seed(&app, &user, "s", NotificationCategory::Salary).await;

    let response = app
        .request("GET", "/api/notifications/stats", None, Some(user.id))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 3);
    assert_eq!(response.body["unread"], 3);
    assert_eq!(response.body["by_type"]["task"], 2);
    assert_eq!(response.body["by_type"]["salary"], 1);
}

#[tokio::test]
async fn test_admin_notifies_role_excluding_actor() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let first = app.user(UserRole::Employee);
    let second = app.user(UserRole::Employee);
    app.user(UserRole::Trainee);

    let response = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "role": "employee",
                "exclude": second.id,
                "title": "Fire drill",
                "message": "Friday at 10:00",
                "type": "warning",
            })),
            Some(admin.id),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let created = response.body.as_array().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["recipient_id"], json!(first.id));
    assert_eq!(created[0]["category"], "warning");
}

#[tokio::test]
async fn test_admin_notifies_from_template() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let user = app.user(UserRole::Employee);

    let response = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "recipient_id": user.id,
                "template": "course_enrolled",
                "params": { "course_title": "Rust Basics" },
            })),
            Some(admin.id),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.body[0]["message"],
        "You have been successfully enrolled in \"Rust Basics\""
    );
    assert_eq!(response.body[0]["action_label"], "View Course");
}

#[tokio::test]
async fn test_create_requires_admin_and_one_target() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let employee = app.user(UserRole::Employee);
    let body = json!({ "admins": true, "title": "t", "message": "m" });

    let response = app
        .request("POST", "/api/notifications", Some(body), Some(employee.id))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({ "title": "t", "message": "m" })),
            Some(admin.id),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
