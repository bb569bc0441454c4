//! Helpers that build outbound events from domain data.

use serde_json::{Value, json};

use officehub_core::events::{AttendanceSnapshot, TaskSnapshot};
use officehub_entity::{Notification, NotificationPayload, SystemAnnouncement};

use super::types::OutboundMessage;

/// `new_notification` for a freshly created notification.
pub fn new_notification(notification: &Notification) -> OutboundMessage {
    OutboundMessage::NewNotification {
        notification: NotificationPayload::from(notification),
    }
}

/// `notifications_list` reply, preserving the given order.
pub fn notifications_list(notifications: &[Notification]) -> OutboundMessage {
    OutboundMessage::NotificationsList {
        notifications: notifications.iter().map(NotificationPayload::from).collect(),
    }
}

/// Task data pushed on the tasks topic.
///
/// `assigned_by` carries the assigner's display name.
pub fn task_data(task: &TaskSnapshot, assigned_by: Option<String>) -> Value {
    json!({
        "id": task.id,
        "title": task.title,
        "status": task.status,
        "priority": task.priority,
        "due_date": task.due_date,
        "completion_percentage": task.completion_percentage,
        "assigned_by": assigned_by,
    })
}

/// Attendance data pushed on the attendance topic.
pub fn attendance_data(record: &AttendanceSnapshot) -> Value {
    json!({
        "id": record.id,
        "date": record.date,
        "status": record.status,
        "check_in_time": record.check_in_time.map(|t| t.format("%H:%M:%S").to_string()),
        "check_out_time": record.check_out_time.map(|t| t.format("%H:%M:%S").to_string()),
        "hours_worked": record.hours_worked.unwrap_or(0.0),
    })
}

/// `system_announcement` broadcast.
pub fn system_announcement(announcement: &SystemAnnouncement) -> OutboundMessage {
    OutboundMessage::SystemAnnouncement {
        data: announcement.broadcast_data(),
    }
}
