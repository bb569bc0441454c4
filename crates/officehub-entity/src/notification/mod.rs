//! Notification domain entities.

pub mod category;
pub mod channel;
pub mod model;
pub mod preference;
pub mod quiet_hours;

pub use category::NotificationCategory;
pub use channel::DeliveryChannel;
pub use model::{NewNotification, Notification, NotificationPayload};
pub use preference::{NotificationPreference, PreferencePatch, should_deliver};
pub use quiet_hours::QuietHours;
