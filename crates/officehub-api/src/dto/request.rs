//! Request DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use officehub_core::error::AppError;
use officehub_core::types::UserId;
use officehub_entity::{NotificationCategory, UserRole};
use officehub_service::{Audience, NotificationDraft, TemplateKey};

/// Admin request to create notifications.
///
/// Exactly one target must be set: `recipient_id`, `role`, `department`
/// or `admins`. Content comes either from `template` with `params`, or
/// from `title` and `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    /// Single recipient.
    #[serde(default)]
    pub recipient_id: Option<UserId>,
    /// Every active, approved user holding this role.
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Every active, approved member of this department.
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub department: Option<String>,
    /// Every active administrator.
    #[serde(default)]
    pub admins: bool,
    /// User left out of a group audience.
    #[serde(default)]
    pub exclude: Option<UserId>,
    /// Built-in template key.
    #[serde(default)]
    pub template: Option<String>,
    /// Template parameters.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Title, when not using a template.
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    /// Message, when not using a template.
    #[serde(default)]
    pub message: Option<String>,
    /// Category, when not using a template.
    #[serde(default, rename = "type", alias = "category")]
    pub category: NotificationCategory,
    /// Action link.
    #[serde(default)]
    #[validate(length(max = 500))]
    pub action_url: Option<String>,
    /// Action label.
    #[serde(default)]
    #[validate(length(max = 100))]
    pub action_label: Option<String>,
    /// Structured data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl CreateNotificationRequest {
    /// The addressed audience.
    pub fn audience(&self) -> Result<Audience, AppError> {
        let mut targets = Vec::new();
        if let Some(id) = self.recipient_id {
            targets.push(Audience::User(id));
        }
        if let Some(role) = self.role {
            targets.push(Audience::Role(role));
        }
        if let Some(department) = &self.department {
            targets.push(Audience::Department(department.clone()));
        }
        if self.admins {
            targets.push(Audience::Admins);
        }

        match targets.len() {
            1 => Ok(targets.remove(0)),
            0 => Err(AppError::validation(
                "One of recipient_id, role, department or admins is required",
            )),
            _ => Err(AppError::validation(
                "Only one of recipient_id, role, department or admins may be set",
            )),
        }
    }

    /// The notification content.
    pub fn draft(&self) -> Result<NotificationDraft, AppError> {
        let mut draft = match &self.template {
            Some(key) => NotificationDraft::from_template(key.parse::<TemplateKey>()?, &self.params),
            None => {
                let title = self
                    .title
                    .as_deref()
                    .ok_or_else(|| AppError::validation("title is required"))?;
                let message = self
                    .message
                    .as_deref()
                    .ok_or_else(|| AppError::validation("message is required"))?;
                NotificationDraft::new(title, message, self.category)
            }
        };

        if let Some(url) = &self.action_url {
            draft.action_url = Some(url.clone());
        }
        if let Some(label) = &self.action_label {
            draft.action_label = Some(label.clone());
        }
        if let Some(data) = &self.data {
            draft.data = Some(data.clone());
        }
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_target() {
        let none = CreateNotificationRequest::default();
        assert!(none.audience().is_err());

        let both = CreateNotificationRequest {
            role: Some(UserRole::Employee),
            admins: true,
            ..Default::default()
        };
        assert!(both.audience().is_err());

        let one = CreateNotificationRequest {
            department: Some("Finance".into()),
            ..Default::default()
        };
        assert_eq!(one.audience().unwrap(), Audience::Department("Finance".into()));
    }

    #[test]
    fn test_template_draft_keeps_overrides() {
        let req: CreateNotificationRequest = serde_json::from_value(serde_json::json!({
            "admins": true,
            "template": "salary_processed",
            "params": { "month": "March", "year": "2026" },
            "action_url": "/salary/42"
        }))
        .unwrap();

        let draft = req.draft().unwrap();
        assert_eq!(draft.message, "Your salary for March 2026 has been processed");
        assert_eq!(draft.action_url.as_deref(), Some("/salary/42"));
        assert_eq!(draft.action_label.as_deref(), Some("View Payslip"));
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        let req = CreateNotificationRequest {
            admins: true,
            template: Some("birthday".into()),
            ..Default::default()
        };
        assert!(req.draft().is_err());
    }
}
