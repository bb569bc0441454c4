//! Topic groups and fan-out.

pub mod group;
pub mod registry;
pub mod subscription;
pub mod topic;

pub use registry::ChannelRegistry;
pub use topic::{SYSTEM_ANNOUNCEMENTS, Topic};
