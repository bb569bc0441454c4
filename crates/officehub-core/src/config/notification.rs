//! Notification delivery and retention configuration.

use serde::{Deserialize, Serialize};

/// Notification subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Read notifications older than this many days are swept.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Number of notifications returned by `get_notifications`.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u64,
    /// Also dispatch on the email channel when a notification is created.
    #[serde(default)]
    pub email_on_create: bool,
    /// Suppress push and email delivery inside a recipient's quiet hours.
    #[serde(default)]
    pub enforce_quiet_hours: bool,
    /// Offset from UTC, in minutes, of the wall clock quiet hours are
    /// expressed in.
    #[serde(default)]
    pub timezone_offset_minutes: i32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            recent_limit: default_recent_limit(),
            email_on_create: false,
            enforce_quiet_hours: false,
            timezone_offset_minutes: 0,
        }
    }
}

fn default_retention_days() -> u32 {
    30
}

fn default_recent_limit() -> u64 {
    20
}
