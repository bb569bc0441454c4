//! # officehub-entity
//!
//! Domain entity models for OfficeHub notifications. Every struct in this
//! crate represents a database table row or a domain value object.
//! Database entities additionally derive `sqlx::FromRow`.
//!
//! The delivery rules that need no I/O live next to the data they read:
//! preference resolution on [`NotificationPreference`], quiet hours on
//! [`QuietHours`], and targeting on [`SystemAnnouncement`].

pub mod announcement;
pub mod notification;
pub mod user;

pub use announcement::{AnnouncementPriority, NewAnnouncement, SystemAnnouncement};
pub use notification::{
    DeliveryChannel, NewNotification, Notification, NotificationCategory, NotificationPayload,
    NotificationPreference, PreferencePatch, QuietHours,
};
pub use user::{UserProfile, UserRole};
