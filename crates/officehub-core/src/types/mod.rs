//! Shared value types.

pub mod id;
pub mod pagination;

pub use id::{AnnouncementId, NotificationId, UserId};
pub use pagination::{PageRequest, PageResponse};
