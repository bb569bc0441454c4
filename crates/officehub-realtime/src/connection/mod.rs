//! WebSocket session management: lifecycle, pool, handles and heartbeat.

pub mod handle;
pub mod heartbeat;
pub mod manager;
pub mod pool;

pub use handle::{ConnectionHandle, ConnectionId, ConnectionInfo};
pub use heartbeat::{Beat, HeartbeatConfig};
pub use manager::ConnectionManager;
