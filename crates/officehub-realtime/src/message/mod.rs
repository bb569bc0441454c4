//! WebSocket protocol messages.

pub mod builder;
pub mod handler;
pub mod types;

pub use handler::InboundHandler;
pub use types::{InboundError, InboundMessage, OutboundMessage, parse_inbound};
