//! System announcement entity and targeting rules.

use chrono::{DateTime, Utc};
use officehub_core::types::{AnnouncementId, UserId};
use officehub_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::priority::AnnouncementPriority;
use crate::user::{UserProfile, UserRole};

/// Maximum announcement title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// A broadcast message targeted by role and department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SystemAnnouncement {
    /// Unique announcement identifier.
    pub id: AnnouncementId,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Display priority.
    pub priority: AnnouncementPriority,
    /// Roles that may see the announcement; empty means every role.
    pub target_roles: Vec<UserRole>,
    /// Department names that may see it; empty means every department.
    pub target_departments: Vec<String>,
    /// When the announcement becomes publishable.
    pub publish_at: DateTime<Utc>,
    /// When the announcement stops being shown.
    pub expire_at: Option<DateTime<Utc>>,
    /// Whether the announcement is active.
    pub is_active: bool,
    /// Whether the announcement has been published.
    pub is_published: bool,
    /// The administrator who created it.
    pub created_by: Option<UserId>,
    /// When the announcement was created.
    pub created_at: DateTime<Utc>,
    /// When the announcement was last changed.
    pub updated_at: DateTime<Utc>,
}

impl SystemAnnouncement {
    /// Whether the expiry time has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expire_at.is_some_and(|at| at < now)
    }

    /// Whether the publish time has been reached.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.publish_at <= now
    }

    /// Whether the role and department targets admit `user`.
    ///
    /// A user without a resolved department passes the department check.
    pub fn targets(&self, user: &UserProfile) -> bool {
        let role_ok = self.target_roles.is_empty() || self.target_roles.contains(&user.role);
        let department_ok = self.target_departments.is_empty()
            || match &user.department {
                Some(name) => self.target_departments.iter().any(|d| d == name),
                None => true,
            };
        role_ok && department_ok
    }

    /// Whether `user` may see the announcement at `now`.
    pub fn is_visible_to(&self, user: &UserProfile, now: DateTime<Utc>) -> bool {
        self.is_active && self.is_published && !self.is_expired(now) && self.targets(user)
    }

    /// Whether the announcement addresses everyone.
    pub fn is_untargeted(&self) -> bool {
        self.target_roles.is_empty() && self.target_departments.is_empty()
    }

    /// The data pushed to the system topic.
    pub fn broadcast_data(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "title": self.title,
            "content": self.content,
            "priority": self.priority,
            "created_at": self.created_at,
        })
    }
}

/// Input for creating an announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnouncement {
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Display priority.
    #[serde(default)]
    pub priority: AnnouncementPriority,
    /// Target roles.
    #[serde(default)]
    pub target_roles: Vec<UserRole>,
    /// Target department names.
    #[serde(default)]
    pub target_departments: Vec<String>,
    /// Publish time; now when absent.
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    /// Expiry time.
    #[serde(default)]
    pub expire_at: Option<DateTime<Utc>>,
    /// Whether the announcement is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether to publish immediately.
    #[serde(default)]
    pub is_published: bool,
}

impl NewAnnouncement {
    /// Validate the input.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Announcement title must not be empty"));
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::validation(format!(
                "Announcement title exceeds {MAX_TITLE_LEN} characters"
            )));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::validation("Announcement content must not be empty"));
        }
        if let (Some(publish), Some(expire)) = (self.publish_at, self.expire_at) {
            if expire <= publish {
                return Err(AppError::validation(
                    "Announcement must expire after it is published",
                ));
            }
        }
        Ok(())
    }

    /// Materialize the announcement.
    ///
    /// A publish time in the future keeps the record unpublished; the
    /// scheduled publisher flips and broadcasts it once it is due.
    pub fn into_announcement(self, created_by: UserId, now: DateTime<Utc>) -> SystemAnnouncement {
        let publish_at = self.publish_at.unwrap_or(now);
        SystemAnnouncement {
            id: AnnouncementId::new(),
            title: self.title,
            content: self.content,
            priority: self.priority,
            target_roles: self.target_roles,
            target_departments: self.target_departments,
            publish_at,
            expire_at: self.expire_at,
            is_active: self.is_active,
            is_published: self.is_published && publish_at <= now,
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        }
    }
}

fn default_true() -> bool {
    true
}
