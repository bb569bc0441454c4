//! Notification entity model.

use chrono::{DateTime, Utc};
use officehub_core::types::{NotificationId, UserId};
use officehub_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::category::NotificationCategory;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum action label length in characters.
pub const MAX_ACTION_LABEL_LEN: usize = 50;
/// Maximum action URL length in characters.
pub const MAX_ACTION_URL_LEN: usize = 255;

/// A notification addressed to exactly one recipient.
///
/// After creation only the read and sent flags change. `read_at` is set
/// exactly when `is_read` is true and `sent_at` exactly when `is_sent` is
/// true; both flags only ever move from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub recipient_id: UserId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification category.
    pub category: NotificationCategory,
    /// Additional structured data (JSON object).
    pub data: Option<serde_json::Value>,
    /// Link the client should open.
    pub action_url: Option<String>,
    /// Label for the action link.
    pub action_label: Option<String>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// Whether the notification was delivered by email.
    pub is_sent: bool,
    /// When the notification was sent.
    pub sent_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Mark the notification as read. Returns `false` if it already was.
    pub fn mark_read(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Mark the notification as sent. Returns `false` if it already was.
    pub fn mark_sent(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_sent {
            return false;
        }
        self.is_sent = true;
        self.sent_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Check that the read and sent timestamps agree with their flags.
    pub fn flags_consistent(&self) -> bool {
        self.is_read == self.read_at.is_some() && self.is_sent == self.sent_at.is_some()
    }

    /// Build the payload pushed to real-time sessions.
    pub fn to_payload(&self) -> NotificationPayload {
        NotificationPayload::from(self)
    }
}

/// Input for creating a notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub recipient_id: UserId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification category.
    #[serde(default, rename = "type", alias = "category")]
    pub category: NotificationCategory,
    /// Additional structured data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Link the client should open.
    #[serde(default)]
    pub action_url: Option<String>,
    /// Label for the action link.
    #[serde(default)]
    pub action_label: Option<String>,
}

impl NewNotification {
    /// Create a minimal notification input.
    pub fn new(
        recipient_id: UserId,
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
    ) -> Self {
        Self {
            recipient_id,
            title: title.into(),
            message: message.into(),
            category,
            ..Default::default()
        }
    }

    /// Attach an action link and label.
    pub fn with_action(mut self, url: impl Into<String>, label: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self.action_label = Some(label.into());
        self
    }

    /// Attach structured data.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Validate field lengths and shapes.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Notification title must not be empty"));
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::validation(format!(
                "Notification title exceeds {MAX_TITLE_LEN} characters"
            )));
        }
        if let Some(url) = &self.action_url {
            if url.chars().count() > MAX_ACTION_URL_LEN {
                return Err(AppError::validation(format!(
                    "Action URL exceeds {MAX_ACTION_URL_LEN} characters"
                )));
            }
        }
        if let Some(label) = &self.action_label {
            if label.chars().count() > MAX_ACTION_LABEL_LEN {
                return Err(AppError::validation(format!(
                    "Action label exceeds {MAX_ACTION_LABEL_LEN} characters"
                )));
            }
        }
        if let Some(data) = &self.data {
            if !data.is_object() {
                return Err(AppError::validation("Notification data must be a JSON object"));
            }
        }
        Ok(())
    }

    /// Materialize an unread, unsent notification.
    pub fn into_notification(self, now: DateTime<Utc>) -> Notification {
        Notification {
            id: NotificationId::new(),
            recipient_id: self.recipient_id,
            title: self.title,
            message: self.message,
            category: self.category,
            data: self.data,
            action_url: self.action_url,
            action_label: self.action_label,
            is_read: false,
            read_at: None,
            is_sent: false,
            sent_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Wire representation of a notification pushed to sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Notification ID.
    pub id: NotificationId,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Category tag.
    #[serde(rename = "type")]
    pub category: NotificationCategory,
    /// Read flag.
    pub is_read: bool,
    /// Creation time (ISO-8601).
    pub created_at: DateTime<Utc>,
    /// Action link.
    pub action_url: Option<String>,
    /// Action label.
    pub action_label: Option<String>,
}

impl From<&Notification> for NotificationPayload {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id,
            title: n.title.clone(),
            message: n.message.clone(),
            category: n.category,
            is_read: n.is_read,
            created_at: n.created_at,
            action_url: n.action_url.clone(),
            action_label: n.action_label.clone(),
        }
    }
}
