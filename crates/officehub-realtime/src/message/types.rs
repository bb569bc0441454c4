//! Inbound and outbound WebSocket message type definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use officehub_core::types::NotificationId;
use officehub_entity::NotificationPayload;

/// Commands a client may send on the notification topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Mark one of the recipient's notifications read.
    MarkRead {
        /// Notification ID.
        notification_id: NotificationId,
    },
    /// Request the most recent notifications.
    GetNotifications {},
}

/// Events sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Current number of unread notifications.
    UnreadCount {
        /// Unread count.
        count: u64,
    },
    /// A notification was just created for the recipient.
    NewNotification {
        /// Notification payload.
        notification: NotificationPayload,
    },
    /// Reply to `get_notifications`.
    NotificationsList {
        /// Newest first.
        notifications: Vec<NotificationPayload>,
    },
    /// A command could not be processed.
    Error {
        /// Error description.
        message: String,
    },
    /// Attendance record change.
    AttendanceUpdate {
        /// Record data.
        data: serde_json::Value,
    },
    /// Task change.
    TaskUpdate {
        /// Task data.
        data: serde_json::Value,
    },
    /// Task newly assigned.
    TaskAssigned {
        /// Task data.
        data: serde_json::Value,
    },
    /// System announcement broadcast.
    SystemAnnouncement {
        /// Announcement data.
        data: serde_json::Value,
    },
}

impl OutboundMessage {
    /// The `type` tag of the event.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnreadCount { .. } => "unread_count",
            Self::NewNotification { .. } => "new_notification",
            Self::NotificationsList { .. } => "notifications_list",
            Self::Error { .. } => "error",
            Self::AttendanceUpdate { .. } => "attendance_update",
            Self::TaskUpdate { .. } => "task_update",
            Self::TaskAssigned { .. } => "task_assigned",
            Self::SystemAnnouncement { .. } => "system_announcement",
        }
    }

    /// Build an error event.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Why an inbound frame was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InboundError {
    /// The frame was not JSON.
    #[error("Invalid JSON")]
    InvalidJson,
    /// A known command carried a malformed body.
    #[error("Invalid {command} payload")]
    InvalidPayload {
        /// The command tag.
        command: String,
    },
}

/// Parse a text frame.
///
/// Returns `Ok(None)` for well-formed JSON that names no known command;
/// such frames are ignored.
pub fn parse_inbound(raw: &str) -> Result<Option<InboundMessage>, InboundError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|_| InboundError::InvalidJson)?;

    let command = match value.get("type").and_then(|t| t.as_str()) {
        Some(kind @ ("mark_read" | "get_notifications")) => kind.to_string(),
        _ => return Ok(None),
    };

    serde_json::from_value(value)
        .map(Some)
        .map_err(|_| InboundError::InvalidPayload { command })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let id = NotificationId::new();
        let raw = format!(r#"{{"type":"mark_read","notification_id":"{id}"}}"#);
        assert_eq!(
            parse_inbound(&raw).unwrap(),
            Some(InboundMessage::MarkRead { notification_id: id })
        );
        assert_eq!(
            parse_inbound(r#"{"type":"get_notifications"}"#).unwrap(),
            Some(InboundMessage::GetNotifications {})
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_inbound("{not json").unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON");
    }

    #[test]
    fn test_unknown_command_is_ignored() {
        assert_eq!(parse_inbound(r#"{"type":"subscribe"}"#).unwrap(), None);
        assert_eq!(parse_inbound("[1,2,3]").unwrap(), None);
    }

    #[test]
    fn test_mark_read_without_id() {
        let err = parse_inbound(r#"{"type":"mark_read"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Invalid mark_read payload");
    }

    #[test]
    fn test_outbound_wire_shape() {
        let json = serde_json::to_value(OutboundMessage::UnreadCount { count: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "unread_count", "count": 3}));

        let err = serde_json::to_value(OutboundMessage::error("Invalid JSON")).unwrap();
        assert_eq!(err, serde_json::json!({"type": "error", "message": "Invalid JSON"}));
    }
}
