//! Domain event intake.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use officehub_entity::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_task_assignment_creates_notification() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let assignee = app.user(UserRole::Employee);
    let task_id = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(json!({
                "payload": {
                    "domain": "task",
                    "event": {
                        "type": "assigned",
                        "task": {
                            "id": task_id,
                            "title": "Prepare budget",
                            "status": "pending",
                            "priority": "high",
                            "assigned_to": assignee.id,
                            "assigned_by": admin.id,
                        }
                    }
                }
            })),
            Some(admin.id),
        )
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["event"], "task.assigned");
    assert_eq!(response.body["notifications"], 1);

    let response = app.request("GET", "/api/notifications", None, Some(assignee.id)).await;
    let item = &response.body["items"][0];
    assert_eq!(item["title"], "New Task Assigned");
    assert_eq!(item["message"], "You have been assigned a new task: Prepare budget");
    assert_eq!(item["action_url"], format!("/tasks/{task_id}"));
}

#[tokio::test]
async fn test_salary_event_uses_template() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let employee = app.user(UserRole::Employee);

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(json!({
                "payload": {
                    "domain": "payroll",
                    "event": {
                        "type": "salary_processed",
                        "payroll_id": Uuid::new_v4(),
                        "user_id": employee.id,
                        "month": "March",
                        "year": 2026,
                    }
                }
            })),
            Some(admin.id),
        )
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    let response = app.request("GET", "/api/notifications", None, Some(employee.id)).await;
    assert_eq!(
        response.body["items"][0]["message"],
        "Your salary for March 2026 has been processed"
    );
    assert_eq!(response.body["items"][0]["action_url"], "/salary");
}

#[tokio::test]
async fn test_registration_notifies_admins_and_sends_mail() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let newcomer = app.user(UserRole::Trainee);

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(json!({
                "payload": {
                    "domain": "account",
                    "event": { "type": "registered", "user_id": newcomer.id }
                }
            })),
            Some(admin.id),
        )
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["notifications"], 1);

    let response = app.request("GET", "/api/notifications", None, Some(admin.id)).await;
    assert_eq!(response.body["items"][0]["title"], "New User Registration");
    assert_eq!(response.body["items"][0]["action_url"], "/admin/approvals");

    let recipients: Vec<Vec<String>> = app.transport.sent().await.into_iter().map(|m| m.to).collect();
    assert!(recipients.contains(&vec![newcomer.email.clone()]));
    assert!(recipients.iter().any(|to| to.contains(&admin.email)));
}

#[tokio::test]
async fn test_events_require_admin() {
    let app = TestApp::new();
    let employee = app.user(UserRole::Employee);

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(json!({
                "payload": {
                    "domain": "attendance",
                    "event": { "type": "reminder", "user_id": employee.id }
                }
            })),
            Some(employee.id),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
