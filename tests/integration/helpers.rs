//! Shared test helpers for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use officehub_api::{AppState, Stores, build_app};
use officehub_core::config::AppConfig;
use officehub_core::types::UserId;
use officehub_database::memory::{
    MemoryAnnouncementStore, MemoryNotificationStore, MemoryPreferenceStore, MemoryUserDirectory,
};
use officehub_entity::{UserProfile, UserRole};
use officehub_service::email::{EmailTransport, MemoryTransport};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct service access
    pub state: AppState,
    /// Backing user directory
    pub users: MemoryUserDirectory,
    /// Captured outgoing email
    pub transport: MemoryTransport,
    seq: AtomicUsize,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application after adjusting the configuration
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        adjust(&mut config);

        let users = MemoryUserDirectory::new();
        let transport = MemoryTransport::new();
        let stores = Stores {
            notifications: Arc::new(MemoryNotificationStore::new()),
            preferences: Arc::new(MemoryPreferenceStore::new()),
            announcements: Arc::new(MemoryAnnouncementStore::new()),
            users: Arc::new(users.clone()),
        };
        let mail: Arc<dyn EmailTransport> = Arc::new(transport.clone());

        let state =
            AppState::new(config, None, stores, Some(mail)).expect("Failed to build app state");
        let router = build_app(state.clone());

        Self {
            router,
            state,
            users,
            transport,
            seq: AtomicUsize::new(0),
        }
    }

    /// Insert an active, approved user in the "Operations" department
    pub fn user(&self, role: UserRole) -> UserProfile {
        self.user_in(role, Some("Operations"))
    }

    /// Insert an active, approved user in `department`
    pub fn user_in(&self, role: UserRole, department: Option<&str>) -> UserProfile {
        let n = self.seq.fetch_add(1, Ordering::SeqCst);
        let user = UserProfile {
            id: UserId::new(),
            email: format!("member{n}@example.com"),
            first_name: format!("Member{n}"),
            last_name: "Tester".into(),
            role,
            department: department.map(str::to_string),
            is_active: true,
            is_approved: true,
        };
        self.users.insert(user.clone());
        user
    }

    /// Insert a deactivated user
    pub fn inactive_user(&self) -> UserProfile {
        let mut user = self.user(UserRole::Employee);
        user.is_active = false;
        self.users.insert(user.clone());
        user
    }

    /// Make a request as `user` (no identity header when `None`)
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<UserId>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(id) = user {
            req = req.header("X-User-Id", id.to_string());
        }

        let body = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        let req = req.body(Body::from(body)).expect("Failed to build request");

        self.send(req).await
    }

    /// Make a request with a raw `X-User-Id` header value
    pub async fn request_with_header(&self, method: &str, path: &str, header: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("X-User-Id", header)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Serve the app on an ephemeral local port
    pub async fn spawn(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Test server failed");
        });
        addr
    }
}

/// Parsed test response
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
