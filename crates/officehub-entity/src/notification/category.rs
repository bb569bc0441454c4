//! Notification category enumeration.

use std::fmt;
use std::str::FromStr;

use officehub_core::AppError;
use serde::{Deserialize, Serialize};

/// Classification of a notification, used to pick preference sub-switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    /// General information.
    #[default]
    Info,
    /// A successful outcome.
    Success,
    /// Something needs attention.
    Warning,
    /// Something failed.
    Error,
    /// Task assignment and progress.
    Task,
    /// Attendance reminders and updates.
    Attendance,
    /// Salary and payroll updates.
    Salary,
    /// Course and training updates.
    Learning,
    /// System-wide updates.
    System,
}

impl NotificationCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Info,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::Task,
        Self::Attendance,
        Self::Salary,
        Self::Learning,
        Self::System,
    ];

    /// Return the category as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Task => "task",
            Self::Attendance => "attendance",
            Self::Salary => "salary",
            Self::Learning => "learning",
            Self::System => "system",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| AppError::validation(format!("Invalid notification category: '{s}'")))
    }
}
