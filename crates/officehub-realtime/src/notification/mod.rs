//! Notification delivery.

pub mod dispatcher;
pub mod quiet;

pub use dispatcher::NotificationDispatcher;
