//! System announcements.

pub mod service;

pub use service::AnnouncementService;
