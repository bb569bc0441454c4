//! Quiet-hours gate.

use chrono::{DateTime, Duration, Utc};

use officehub_entity::{DeliveryChannel, NotificationPreference};

/// Whether the recipient's quiet window suppresses `channel` at `now`.
///
/// In-app delivery is never gated. The window is evaluated on the clock
/// shifted by `offset_minutes` from UTC.
pub fn suppresses(
    preference: &NotificationPreference,
    channel: DeliveryChannel,
    now: DateTime<Utc>,
    offset_minutes: i32,
) -> bool {
    if channel == DeliveryChannel::InApp {
        return false;
    }
    let local = (now + Duration::minutes(i64::from(offset_minutes))).time();
    preference
        .quiet_hours()
        .is_some_and(|window| window.contains(local))
}
