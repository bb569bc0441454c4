//! Bridges between domain events and the real-time notification system.

pub mod event_bridge;

pub use event_bridge::EventBridge;
