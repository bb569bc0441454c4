//! Payroll events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

/// Events related to salary processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayrollEvent {
    /// A monthly salary record was processed.
    SalaryProcessed {
        /// The payroll record ID.
        payroll_id: Uuid,
        /// The employee.
        user_id: UserId,
        /// Month name (e.g. `"March"`).
        month: String,
        /// Calendar year.
        year: i32,
    },
}
