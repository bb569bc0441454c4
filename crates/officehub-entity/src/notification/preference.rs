//! Notification preference entity and delivery resolution.

use chrono::{DateTime, NaiveTime, Utc};
use officehub_core::types::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::category::NotificationCategory;
use super::channel::DeliveryChannel;
use super::quiet_hours::QuietHours;

/// Per-user notification delivery preferences.
///
/// Each channel has a master switch and five category sub-switches. There
/// is at most one stored record per user; when none exists the values from
/// [`NotificationPreference::defaults_for`] apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NotificationPreference {
    /// The user these preferences belong to.
    pub user_id: UserId,

    pub email_enabled: bool,
    pub email_task_updates: bool,
    pub email_attendance_reminders: bool,
    pub email_salary_updates: bool,
    pub email_learning_updates: bool,
    pub email_system_updates: bool,

    pub push_enabled: bool,
    pub push_task_updates: bool,
    pub push_attendance_reminders: bool,
    pub push_salary_updates: bool,
    pub push_learning_updates: bool,
    pub push_system_updates: bool,

    pub inapp_enabled: bool,
    pub inapp_task_updates: bool,
    pub inapp_attendance_reminders: bool,
    pub inapp_salary_updates: bool,
    pub inapp_learning_updates: bool,
    pub inapp_system_updates: bool,

    /// Whether the quiet-hours window is active.
    pub quiet_hours_enabled: bool,
    /// Start of quiet hours.
    pub quiet_hours_start: Option<NaiveTime>,
    /// End of quiet hours.
    pub quiet_hours_end: Option<NaiveTime>,

    /// When the record was first stored.
    pub created_at: DateTime<Utc>,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
}

impl NotificationPreference {
    /// Default preferences for a user with no stored record.
    ///
    /// Everything is enabled except salary updates over push. The value is
    /// not persisted until the user first changes it.
    pub fn defaults_for(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email_enabled: true,
            email_task_updates: true,
            email_attendance_reminders: true,
            email_salary_updates: true,
            email_learning_updates: true,
            email_system_updates: true,
            push_enabled: true,
            push_task_updates: true,
            push_attendance_reminders: true,
            push_salary_updates: false,
            push_learning_updates: true,
            push_system_updates: true,
            inapp_enabled: true,
            inapp_task_updates: true,
            inapp_attendance_reminders: true,
            inapp_salary_updates: true,
            inapp_learning_updates: true,
            inapp_system_updates: true,
            quiet_hours_enabled: false,
            quiet_hours_start: None,
            quiet_hours_end: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Master switch for a channel.
    pub fn channel_enabled(&self, channel: DeliveryChannel) -> bool {
        match channel {
            DeliveryChannel::Email => self.email_enabled,
            DeliveryChannel::Push => self.push_enabled,
            DeliveryChannel::InApp => self.inapp_enabled,
        }
    }

    /// Sub-switch for a category on a channel.
    ///
    /// Returns `None` for categories that have no sub-switch.
    pub fn category_switch(
        &self,
        channel: DeliveryChannel,
        category: NotificationCategory,
    ) -> Option<bool> {
        use DeliveryChannel as Ch;
        use NotificationCategory as Cat;

        let value = match (channel, category) {
            (Ch::Email, Cat::Task) => self.email_task_updates,
            (Ch::Email, Cat::Attendance) => self.email_attendance_reminders,
            (Ch::Email, Cat::Salary) => self.email_salary_updates,
            (Ch::Email, Cat::Learning) => self.email_learning_updates,
            (Ch::Email, Cat::System) => self.email_system_updates,

            (Ch::Push, Cat::Task) => self.push_task_updates,
            (Ch::Push, Cat::Attendance) => self.push_attendance_reminders,
            (Ch::Push, Cat::Salary) => self.push_salary_updates,
            (Ch::Push, Cat::Learning) => self.push_learning_updates,
            (Ch::Push, Cat::System) => self.push_system_updates,

            (Ch::InApp, Cat::Task) => self.inapp_task_updates,
            (Ch::InApp, Cat::Attendance) => self.inapp_attendance_reminders,
            (Ch::InApp, Cat::Salary) => self.inapp_salary_updates,
            (Ch::InApp, Cat::Learning) => self.inapp_learning_updates,
            (Ch::InApp, Cat::System) => self.inapp_system_updates,

            (_, Cat::Info | Cat::Success | Cat::Warning | Cat::Error) => return None,
        };
        Some(value)
    }

    /// Whether a notification of `category` may go out on `channel`.
    ///
    /// A disabled channel suppresses everything. Categories without a
    /// sub-switch are allowed.
    pub fn should_deliver(&self, category: NotificationCategory, channel: DeliveryChannel) -> bool {
        if !self.channel_enabled(channel) {
            return false;
        }
        self.category_switch(channel, category).unwrap_or(true)
    }

    /// The quiet-hours window, if enabled and fully specified.
    pub fn quiet_hours(&self) -> Option<QuietHours> {
        if !self.quiet_hours_enabled {
            return None;
        }
        match (self.quiet_hours_start, self.quiet_hours_end) {
            (Some(start), Some(end)) => Some(QuietHours::new(start, end)),
            _ => None,
        }
    }

    /// Apply a partial update.
    pub fn apply(&mut self, patch: PreferencePatch, now: DateTime<Utc>) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = patch.$field { self.$field = v; })*
            };
        }

        merge!(
            email_enabled,
            email_task_updates,
            email_attendance_reminders,
            email_salary_updates,
            email_learning_updates,
            email_system_updates,
            push_enabled,
            push_task_updates,
            push_attendance_reminders,
            push_salary_updates,
            push_learning_updates,
            push_system_updates,
            inapp_enabled,
            inapp_task_updates,
            inapp_attendance_reminders,
            inapp_salary_updates,
            inapp_learning_updates,
            inapp_system_updates,
            quiet_hours_enabled,
        );
        if let Some(start) = patch.quiet_hours_start {
            self.quiet_hours_start = start;
        }
        if let Some(end) = patch.quiet_hours_end {
            self.quiet_hours_end = end;
        }
        self.updated_at = now;
    }
}

/// Resolve whether `category` may be delivered on `channel`.
pub fn should_deliver(
    preference: &NotificationPreference,
    category: NotificationCategory,
    channel: DeliveryChannel,
) -> bool {
    preference.should_deliver(category, channel)
}

/// A partial preference update. Absent fields are left unchanged.
///
/// The quiet-hours times use a nested option so that `null` clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferencePatch {
    pub email_enabled: Option<bool>,
    pub email_task_updates: Option<bool>,
    pub email_attendance_reminders: Option<bool>,
    pub email_salary_updates: Option<bool>,
    pub email_learning_updates: Option<bool>,
    pub email_system_updates: Option<bool>,
    pub push_enabled: Option<bool>,
    pub push_task_updates: Option<bool>,
    pub push_attendance_reminders: Option<bool>,
    pub push_salary_updates: Option<bool>,
    pub push_learning_updates: Option<bool>,
    pub push_system_updates: Option<bool>,
    pub inapp_enabled: Option<bool>,
    pub inapp_task_updates: Option<bool>,
    pub inapp_attendance_reminders: Option<bool>,
    pub inapp_salary_updates: Option<bool>,
    pub inapp_learning_updates: Option<bool>,
    pub inapp_system_updates: Option<bool>,
    pub quiet_hours_enabled: Option<bool>,
    #[serde(default, with = "double_option")]
    pub quiet_hours_start: Option<Option<NaiveTime>>,
    #[serde(default, with = "double_option")]
    pub quiet_hours_end: Option<Option<NaiveTime>>,
}

mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T: Serialize, S: Serializer>(
        value: &Option<Option<T>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T: Deserialize<'de>, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<T>>, D::Error> {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
