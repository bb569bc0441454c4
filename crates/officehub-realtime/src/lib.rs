//! # officehub-realtime
//!
//! Real-time delivery for OfficeHub notifications. Provides:
//!
//! - Topic-based fan-out to connected WebSocket sessions
//! - The notification session protocol (`mark_read`, `get_notifications`)
//! - The delivery dispatcher that gates every channel on user preferences
//! - The event bridge that turns domain events into notifications and
//!   topic pushes

pub mod bridge;
pub mod channel;
pub mod connection;
pub mod message;
pub mod notification;
pub mod server;

#[cfg(test)]
mod testing;

pub use bridge::EventBridge;
pub use channel::{ChannelRegistry, Topic};
pub use connection::{ConnectionHandle, ConnectionManager};
pub use message::{InboundHandler, InboundMessage, OutboundMessage};
pub use notification::NotificationDispatcher;
pub use server::{EngineServices, RealtimeEngine};
