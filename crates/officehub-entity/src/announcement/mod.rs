//! System announcement entities.

pub mod model;
pub mod priority;

pub use model::{NewAnnouncement, SystemAnnouncement};
pub use priority::AnnouncementPriority;
