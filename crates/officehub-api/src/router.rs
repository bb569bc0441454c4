//! Route definitions for the OfficeHub HTTP API.
//!
//! REST routes are mounted under `/api`; the four WebSocket topics live
//! under `/ws`.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let body_limit = server.body_limit_bytes;
    let timeout = Duration::from_secs(server.request_timeout_seconds.max(1));

    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(announcement_routes())
        .merge(event_routes())
        .merge(health_routes())
        .layer(TimeoutLayer::new(timeout));

    let cors = middleware::cors::build_cors_layer(&server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Own notifications, admin creation and preferences
fn notification_routes() -> Router<AppState> {
    use handlers::notification as n;
    use handlers::preference as p;

    Router::new()
        .route("/notifications", get(n::list_notifications).post(n::create_notifications))
        .route("/notifications/unread-count", get(n::unread_count))
        .route("/notifications/stats", get(n::stats))
        .route("/notifications/read-all", post(n::mark_all_read))
        .route("/notifications/{id}/read", post(n::mark_read))
        .route(
            "/notifications/preferences",
            get(p::get_preferences).put(p::update_preferences),
        )
}

fn announcement_routes() -> Router<AppState> {
    Router::new().route(
        "/announcements",
        get(handlers::announcement::list_announcements)
            .post(handlers::announcement::create_announcement),
    )
}

fn event_routes() -> Router<AppState> {
    Router::new().route("/events", post(handlers::event::publish_event))
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Real-time topics
fn ws_routes() -> Router<AppState> {
    use handlers::ws;

    Router::new()
        .route("/ws/notifications/{user_id}", get(ws::notifications_ws))
        .route("/ws/tasks/{user_id}", get(ws::tasks_ws))
        .route("/ws/attendance/{user_id}", get(ws::attendance_ws))
        .route("/ws/system", get(ws::system_ws))
}
