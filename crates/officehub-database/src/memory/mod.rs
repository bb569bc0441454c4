//! In-process store implementations.
//!
//! Suitable for tests and single-process tooling. Nothing is persisted
//! across restarts.

pub mod announcement;
pub mod notification;
pub mod preference;
pub mod user;

pub use announcement::MemoryAnnouncementStore;
pub use notification::MemoryNotificationStore;
pub use preference::MemoryPreferenceStore;
pub use user::MemoryUserDirectory;
