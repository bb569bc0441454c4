//! Attendance events.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

/// The subset of an attendance record pushed to the user's attendance topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSnapshot {
    /// Record ID.
    pub id: Uuid,
    /// The employee.
    pub user_id: UserId,
    /// Calendar day of the record.
    pub date: NaiveDate,
    /// Attendance status (`present`, `late`, `absent`, ...).
    pub status: String,
    /// Check-in time, if checked in.
    #[serde(default)]
    pub check_in_time: Option<NaiveTime>,
    /// Check-out time, if checked out.
    #[serde(default)]
    pub check_out_time: Option<NaiveTime>,
    /// Hours worked so far.
    #[serde(default)]
    pub hours_worked: Option<f64>,
}

/// Events related to attendance tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttendanceEvent {
    /// A check-in, check-out or correction was saved.
    Recorded {
        /// The record after the save.
        record: AttendanceSnapshot,
    },
    /// The user has not marked attendance today.
    Reminder {
        /// The user to remind.
        user_id: UserId,
    },
}
