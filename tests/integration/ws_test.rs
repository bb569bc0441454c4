//! WebSocket sessions against a live server.

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use officehub_entity::UserRole;

use crate::helpers::TestApp;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn open(addr: SocketAddr, path: &str) -> Socket {
    let (socket, _) = connect_async(format!("ws://{addr}{path}"))
        .await
        .expect("WebSocket handshake failed");
    socket
}

/// Next text frame as JSON, skipping control frames.
async fn next_json(socket: &mut Socket) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Socket closed")
            .expect("Socket error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
        }
    }
}

async fn wait_for_sessions(app: &TestApp, expected: usize) {
    for _ in 0..100 {
        if app.state.realtime.connections.connection_count() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("sessions never registered");
}

#[tokio::test]
async fn test_session_receives_counts_and_new_notifications() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let employee = app.user(UserRole::Employee);
    let addr = app.spawn().await;

    let mut socket = open(addr, &format!("/ws/notifications/{}", employee.id)).await;
    let first = next_json(&mut socket).await;
    assert_eq!(first, json!({ "type": "unread_count", "count": 0 }));

    let response = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "recipient_id": employee.id,
                "title": "Desk move",
                "message": "Your desk moves to floor 3",
            })),
            Some(admin.id),
        )
        .await;
    assert_eq!(response.status, axum::http::StatusCode::CREATED);
    let id = response.body[0]["id"].as_str().unwrap().to_string();

    let pushed = next_json(&mut socket).await;
    assert_eq!(pushed["type"], "new_notification");
    assert_eq!(pushed["notification"]["title"], "Desk move");
    assert_eq!(pushed["notification"]["type"], "info");

    let count = next_json(&mut socket).await;
    assert_eq!(count, json!({ "type": "unread_count", "count": 1 }));

    socket
        .send(Message::Text(
            json!({ "type": "mark_read", "notification_id": id }).to_string().into(),
        ))
        .await
        .unwrap();
    let count = next_json(&mut socket).await;
    assert_eq!(count, json!({ "type": "unread_count", "count": 0 }));
}

#[tokio::test]
async fn test_invalid_frame_reports_error_and_stays_open() {
    let app = TestApp::new();
    let employee = app.user(UserRole::Employee);
    let addr = app.spawn().await;

    let mut socket = open(addr, &format!("/ws/notifications/{}", employee.id)).await;
    next_json(&mut socket).await;

    socket.send(Message::Text("not json".into())).await.unwrap();
    let reply = next_json(&mut socket).await;
    assert_eq!(reply, json!({ "type": "error", "message": "Invalid JSON" }));

    socket
        .send(Message::Text(r#"{"type":"get_notifications"}"#.into()))
        .await
        .unwrap();
    let list = next_json(&mut socket).await;
    assert_eq!(list["type"], "notifications_list");
    assert_eq!(list["notifications"], json!([]));
}

#[tokio::test]
async fn test_unknown_user_is_refused() {
    let app = TestApp::new();
    let addr = app.spawn().await;

    let path = format!("ws://{addr}/ws/notifications/{}", uuid::Uuid::new_v4());
    assert!(connect_async(path).await.is_err());
    assert_eq!(app.state.realtime.connections.connection_count(), 0);
}

#[tokio::test]
async fn test_system_topic_receives_announcements() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let addr = app.spawn().await;

    let mut socket = open(addr, "/ws/system").await;
    wait_for_sessions(&app, 1).await;

    let response = app
        .request(
            "POST",
            "/api/announcements",
            Some(json!({
                "title": "Holiday",
                "content": "Office closed Friday",
                "is_published": true,
            })),
            Some(admin.id),
        )
        .await;
    assert_eq!(response.status, axum::http::StatusCode::CREATED);

    let pushed = next_json(&mut socket).await;
    assert_eq!(pushed["type"], "system_announcement");
    assert_eq!(pushed["data"]["title"], "Holiday");
}

#[tokio::test]
async fn test_task_topic_receives_assignments() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let employee = app.user(UserRole::Employee);
    let addr = app.spawn().await;

    let mut socket = open(addr, &format!("/ws/tasks/{}", employee.id)).await;
    wait_for_sessions(&app, 1).await;

    app.request(
        "POST",
        "/api/events",
        Some(json!({
            "payload": {
                "domain": "task",
                "event": {
                    "type": "assigned",
                    "task": {
                        "id": uuid::Uuid::new_v4(),
                        "title": "File expenses",
                        "status": "pending",
                        "priority": "medium",
                        "assigned_to": employee.id,
                        "assigned_by": admin.id,
                    }
                }
            }
        })),
        Some(admin.id),
    )
    .await;

    let pushed = next_json(&mut socket).await;
    assert_eq!(pushed["type"], "task_assigned");
    assert_eq!(pushed["data"]["title"], "File expenses");
}

#[tokio::test]
async fn test_scheduled_announcement_pushed_once_when_due() {
    let app = TestApp::new();
    let admin = app.user(UserRole::Admin);
    let addr = app.spawn().await;

    let mut socket = open(addr, "/ws/system").await;
    wait_for_sessions(&app, 1).await;

    let response = app
        .request(
            "POST",
            "/api/announcements",
            Some(json!({
                "title": "Fire drill",
                "content": "Tomorrow at 10:00",
                "publish_at": chrono::Utc::now() + chrono::Duration::hours(2),
                "is_published": true,
            })),
            Some(admin.id),
        )
        .await;
    assert_eq!(response.status, axum::http::StatusCode::CREATED);

    let early = tokio::time::timeout(Duration::from_millis(200), socket.next()).await;
    assert!(early.is_err(), "announcement pushed before its publish time");

    let later = chrono::Utc::now() + chrono::Duration::hours(3);
    let published = app.state.announcements.publish_due(later).await.unwrap();
    for announcement in &published {
        app.state.realtime.bridge.announce(announcement);
    }

    let pushed = next_json(&mut socket).await;
    assert_eq!(pushed["type"], "system_announcement");
    assert_eq!(pushed["data"]["title"], "Fire drill");

    assert!(app.state.announcements.publish_due(later).await.unwrap().is_empty());
}
