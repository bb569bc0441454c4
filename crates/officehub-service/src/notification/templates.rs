//! Built-in notification templates.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use officehub_core::error::AppError;
use officehub_core::types::UserId;
use officehub_entity::{NewNotification, NotificationCategory};

/// Keys of the built-in notification templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKey {
    TaskAssigned,
    TaskCompleted,
    LeaveApproved,
    LeaveRejected,
    AttendanceReminder,
    SalaryProcessed,
    CourseEnrolled,
    TrainingSession,
}

struct TemplateDef {
    title: &'static str,
    message: &'static str,
    category: NotificationCategory,
    action_label: &'static str,
}

impl TemplateKey {
    /// Every template key.
    pub const ALL: [Self; 8] = [
        Self::TaskAssigned,
        Self::TaskCompleted,
        Self::LeaveApproved,
        Self::LeaveRejected,
        Self::AttendanceReminder,
        Self::SalaryProcessed,
        Self::CourseEnrolled,
        Self::TrainingSession,
    ];

    /// Return the key as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskCompleted => "task_completed",
            Self::LeaveApproved => "leave_approved",
            Self::LeaveRejected => "leave_rejected",
            Self::AttendanceReminder => "attendance_reminder",
            Self::SalaryProcessed => "salary_processed",
            Self::CourseEnrolled => "course_enrolled",
            Self::TrainingSession => "training_session",
        }
    }

    fn def(&self) -> TemplateDef {
        use NotificationCategory as C;

        let (title, message, category, action_label) = match self {
            Self::TaskAssigned => (
                "New Task Assigned",
                "You have been assigned a new task: {task_title}",
                C::Task,
                "View Task",
            ),
            Self::TaskCompleted => (
                "Task Completed",
                "Task \"{task_title}\" has been marked as completed",
                C::Success,
                "View Task",
            ),
            Self::LeaveApproved => (
                "Leave Request Approved",
                "Your leave request from {start_date} to {end_date} has been approved",
                C::Success,
                "View Leave Requests",
            ),
            Self::LeaveRejected => (
                "Leave Request Rejected",
                "Your leave request from {start_date} to {end_date} has been rejected",
                C::Warning,
                "View Leave Requests",
            ),
            Self::AttendanceReminder => (
                "Attendance Reminder",
                "Don't forget to mark your attendance for today",
                C::Info,
                "Mark Attendance",
            ),
            Self::SalaryProcessed => (
                "Salary Processed",
                "Your salary for {month} {year} has been processed",
                C::Success,
                "View Payslip",
            ),
            Self::CourseEnrolled => (
                "Course Enrollment Confirmed",
                "You have been successfully enrolled in \"{course_title}\"",
                C::Success,
                "View Course",
            ),
            Self::TrainingSession => (
                "Training Session Reminder",
                "You have a training session \"{session_title}\" scheduled for {datetime}",
                C::Info,
                "View Session",
            ),
        };
        TemplateDef {
            title,
            message,
            category,
            action_label,
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown notification template: '{s}'")))
    }
}

/// Notification content not yet addressed to a recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationDraft {
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Category.
    #[serde(default, rename = "type", alias = "category")]
    pub category: NotificationCategory,
    /// Structured data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Action link.
    #[serde(default)]
    pub action_url: Option<String>,
    /// Action label.
    #[serde(default)]
    pub action_label: Option<String>,
}

impl NotificationDraft {
    /// Create a draft without action or data.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            category,
            data: None,
            action_url: None,
            action_label: None,
        }
    }

    /// Fill a built-in template.
    ///
    /// `{name}` placeholders are replaced from `params`; placeholders
    /// without a matching parameter are kept verbatim.
    pub fn from_template(key: TemplateKey, params: &BTreeMap<String, String>) -> Self {
        let def = key.def();
        Self {
            title: fill(def.title, params),
            message: fill(def.message, params),
            category: def.category,
            data: None,
            action_url: None,
            action_label: Some(def.action_label.to_string()),
        }
    }

    /// Set the action link.
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    /// Attach structured data.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Address the draft to a recipient.
    pub fn for_recipient(&self, recipient_id: UserId) -> NewNotification {
        NewNotification {
            recipient_id,
            title: self.title.clone(),
            message: self.message.clone(),
            category: self.category,
            data: self.data.clone(),
            action_url: self.action_url.clone(),
            action_label: self.action_label.clone(),
        }
    }
}

fn fill(template: &str, params: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &after[..close];
        match params.get(key) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Build template parameters from string pairs.
pub fn params<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_assigned_template() {
        let draft = NotificationDraft::from_template(
            TemplateKey::TaskAssigned,
            &params([("task_title", "Prepare payroll".to_string())]),
        );
        assert_eq!(draft.title, "New Task Assigned");
        assert_eq!(draft.message, "You have been assigned a new task: Prepare payroll");
        assert_eq!(draft.category, NotificationCategory::Task);
        assert_eq!(draft.action_label.as_deref(), Some("View Task"));
    }

    #[test]
    fn test_leave_rejected_is_warning() {
        let draft = NotificationDraft::from_template(
            TemplateKey::LeaveRejected,
            &params([
                ("start_date", "2026-03-02".to_string()),
                ("end_date", "2026-03-04".to_string()),
            ]),
        );
        assert_eq!(draft.category, NotificationCategory::Warning);
        assert_eq!(
            draft.message,
            "Your leave request from 2026-03-02 to 2026-03-04 has been rejected"
        );
    }

    #[test]
    fn test_missing_param_is_left_in_place() {
        let draft = NotificationDraft::from_template(TemplateKey::SalaryProcessed, &params([(
            "month",
            "March".to_string(),
        )]));
        assert_eq!(draft.message, "Your salary for March {year} has been processed");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = "birthday".parse::<TemplateKey>().unwrap_err();
        assert_eq!(err.kind, officehub_core::ErrorKind::Validation);
        assert_eq!("course_enrolled".parse::<TemplateKey>().unwrap(), TemplateKey::CourseEnrolled);
    }

    #[test]
    fn test_fill_handles_unbalanced_braces() {
        let p = params([("a", "1".to_string())]);
        assert_eq!(fill("x {a} {b", &p), "x 1 {b");
        assert_eq!(fill("{a}{a}", &p), "11");
    }
}
