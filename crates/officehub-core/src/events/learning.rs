//! Course and training events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

/// Events related to courses and training sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LearningEvent {
    /// A user was enrolled in a course.
    CourseEnrolled {
        /// The enrolled user.
        user_id: UserId,
        /// The course ID.
        course_id: Uuid,
        /// The course title.
        course_title: String,
    },
    /// A training session was scheduled for a user.
    TrainingScheduled {
        /// The attendee.
        user_id: UserId,
        /// The session ID.
        session_id: Uuid,
        /// The session title.
        session_title: String,
        /// When the session starts.
        scheduled_at: DateTime<Utc>,
    },
}
