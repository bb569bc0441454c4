//! Leave-request events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

/// Events related to leave requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeaveEvent {
    /// A leave request was approved or rejected.
    Decided {
        /// The leave request ID.
        request_id: Uuid,
        /// The requesting employee.
        user_id: UserId,
        /// First day of leave.
        start_date: NaiveDate,
        /// Last day of leave.
        end_date: NaiveDate,
        /// `true` if approved, `false` if rejected.
        approved: bool,
    },
}
