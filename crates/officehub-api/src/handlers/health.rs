//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let (database, database_latency_ms) = match &state.db {
        Some(db) => match db.ping().await {
            Ok(latency) => ("connected".to_string(), Some(latency.as_millis() as u64)),
            Err(e) => {
                tracing::warn!(error = %e, "Database ping failed");
                ("unreachable".to_string(), None)
            }
        },
        None => ("memory".to_string(), None),
    };

    let status = if database == "unreachable" { "degraded" } else { "ok" };
    let connections = &state.realtime.connections;

    Json(DetailedHealthResponse {
        status: status.to_string(),
        database,
        database_latency_ms,
        ws_connections: connections.connection_count(),
        online_users: connections.user_count(),
        active_topics: connections.topic_count(),
    })
}
