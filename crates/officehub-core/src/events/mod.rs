//! Domain events published by the office subsystems.
//!
//! Task, attendance, leave, payroll, learning and account workflows live
//! outside this service. They publish these events explicitly, and the
//! real-time event bridge turns them into notifications and topic pushes.

pub mod account;
pub mod attendance;
pub mod learning;
pub mod leave;
pub mod payroll;
pub mod task;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

pub use account::AccountEvent;
pub use attendance::{AttendanceEvent, AttendanceSnapshot};
pub use learning::LearningEvent;
pub use leave::LeaveEvent;
pub use payroll::PayrollEvent;
pub use task::{TaskEvent, TaskSnapshot};

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// When the event occurred.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if applicable).
    #[serde(default)]
    pub actor_id: Option<UserId>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum EventPayload {
    /// A task-related event.
    Task(TaskEvent),
    /// An attendance-related event.
    Attendance(AttendanceEvent),
    /// A leave-request event.
    Leave(LeaveEvent),
    /// A payroll event.
    Payroll(PayrollEvent),
    /// A course or training event.
    Learning(LearningEvent),
    /// An account lifecycle event.
    Account(AccountEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<UserId>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// Short name of the event used in log fields.
    pub fn name(&self) -> &'static str {
        match &self.payload {
            EventPayload::Task(TaskEvent::Assigned { .. }) => "task.assigned",
            EventPayload::Task(TaskEvent::Updated { .. }) => "task.updated",
            EventPayload::Attendance(AttendanceEvent::Recorded { .. }) => "attendance.recorded",
            EventPayload::Attendance(AttendanceEvent::Reminder { .. }) => "attendance.reminder",
            EventPayload::Leave(LeaveEvent::Decided { .. }) => "leave.decided",
            EventPayload::Payroll(PayrollEvent::SalaryProcessed { .. }) => "payroll.salary_processed",
            EventPayload::Learning(LearningEvent::CourseEnrolled { .. }) => "learning.course_enrolled",
            EventPayload::Learning(LearningEvent::TrainingScheduled { .. }) => {
                "learning.training_scheduled"
            }
            EventPayload::Account(AccountEvent::Registered { .. }) => "account.registered",
            EventPayload::Account(AccountEvent::Approved { .. }) => "account.approved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_metadata() {
        let user = UserId::new();
        let json = serde_json::json!({
            "payload": {
                "domain": "leave",
                "event": {
                    "type": "decided",
                    "request_id": Uuid::new_v4(),
                    "user_id": user,
                    "start_date": "2026-03-02",
                    "end_date": "2026-03-04",
                    "approved": true
                }
            }
        });

        let event: DomainEvent = serde_json::from_value(json).unwrap();
        assert!(event.actor_id.is_none());
        assert_eq!(event.name(), "leave.decided");
        match event.payload {
            EventPayload::Leave(LeaveEvent::Decided { user_id, approved, .. }) => {
                assert_eq!(user_id, user);
                assert!(approved);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
