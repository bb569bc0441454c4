//! Task workflow events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

/// The subset of a task record pushed to the assignee's task topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// Task ID.
    pub id: Uuid,
    /// Task title.
    pub title: String,
    /// Workflow status (`pending`, `in_progress`, `completed`, ...).
    pub status: String,
    /// Priority label.
    pub priority: String,
    /// Due date, if any.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Progress between 0 and 100.
    #[serde(default)]
    pub completion_percentage: u8,
    /// The assignee.
    pub assigned_to: UserId,
    /// The user who assigned the task.
    #[serde(default)]
    pub assigned_by: Option<UserId>,
}

impl TaskSnapshot {
    /// Whether the task has reached its terminal state.
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case("completed")
    }
}

/// Events related to task assignment and progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEvent {
    /// A task was created and assigned.
    Assigned {
        /// The task after assignment.
        task: TaskSnapshot,
    },
    /// An existing task changed.
    Updated {
        /// The task after the change.
        task: TaskSnapshot,
    },
}
