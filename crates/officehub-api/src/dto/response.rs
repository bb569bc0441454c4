//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `{ "count": n }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count.
    pub count: u64,
}

/// `{ "updated": n }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedResponse {
    /// Number of updated records.
    pub updated: u64,
}

/// Result of routing a domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAccepted {
    /// The event ID.
    pub event_id: Uuid,
    /// Event name.
    pub event: String,
    /// Notifications created for it.
    pub notifications: usize,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Database round-trip in milliseconds.
    pub database_latency_ms: Option<u64>,
    /// Open WebSocket sessions.
    pub ws_connections: usize,
    /// Users with at least one session.
    pub online_users: usize,
    /// Topics with at least one subscriber.
    pub active_topics: usize,
}
