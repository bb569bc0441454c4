//! Store traits consumed by the service layer.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use officehub_core::result::AppResult;
use officehub_core::types::{AnnouncementId, NotificationId, PageRequest, PageResponse, UserId};
use officehub_entity::{
    Notification, NotificationCategory, NotificationPreference, SystemAnnouncement, UserProfile,
    UserRole,
};

/// Per-recipient notification counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationStats {
    /// All notifications addressed to the recipient.
    pub total: u64,
    /// Notifications not yet read.
    pub unread: u64,
    /// Counts keyed by category tag.
    pub by_type: BTreeMap<String, u64>,
}

impl NotificationStats {
    /// Build stats from per-category `(total, unread)` rows.
    pub fn from_counts(rows: impl IntoIterator<Item = (NotificationCategory, u64, u64)>) -> Self {
        let mut stats = Self::default();
        for (category, total, unread) in rows {
            stats.total += total;
            stats.unread += unread;
            *stats.by_type.entry(category.as_str().to_string()).or_default() += total;
        }
        stats
    }
}

/// Durable log of notifications.
///
/// `mark_read` and `mark_sent` only ever set the flag and its timestamp
/// once; repeating them returns the stored record unchanged.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Persist a new notification.
    async fn insert(&self, notification: &Notification) -> AppResult<()>;

    /// Find a notification by ID.
    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// Page through a recipient's notifications, newest first.
    async fn list_for_recipient(
        &self,
        recipient: UserId,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// The newest `limit` notifications of a recipient.
    async fn recent_for_recipient(&self, recipient: UserId, limit: u64)
    -> AppResult<Vec<Notification>>;

    /// Count a recipient's unread notifications.
    async fn count_unread(&self, recipient: UserId) -> AppResult<u64>;

    /// Mark one of the recipient's notifications read.
    ///
    /// Returns `None` when no notification with that ID belongs to the
    /// recipient.
    async fn mark_read(
        &self,
        id: NotificationId,
        recipient: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>>;

    /// Mark every unread notification of the recipient read.
    async fn mark_all_read(&self, recipient: UserId, at: DateTime<Utc>) -> AppResult<u64>;

    /// Mark a notification sent. Returns `None` if it does not exist.
    async fn mark_sent(&self, id: NotificationId, at: DateTime<Utc>)
    -> AppResult<Option<Notification>>;

    /// Counters for a recipient.
    async fn stats(&self, recipient: UserId) -> AppResult<NotificationStats>;

    /// Delete read notifications whose `read_at` is before `cutoff`.
    async fn delete_read_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

/// Stored notification preferences, at most one per user.
#[async_trait]
pub trait PreferenceStore: Send + Sync + 'static {
    /// The stored record, if the user ever saved one.
    async fn find(&self, user_id: UserId) -> AppResult<Option<NotificationPreference>>;

    /// Insert or replace the user's record.
    async fn upsert(&self, preference: &NotificationPreference) -> AppResult<NotificationPreference>;
}

/// Stored system announcements.
#[async_trait]
pub trait AnnouncementStore: Send + Sync + 'static {
    /// Persist a new announcement.
    async fn insert(&self, announcement: &SystemAnnouncement) -> AppResult<()>;

    /// Find an announcement by ID.
    async fn find_by_id(&self, id: AnnouncementId) -> AppResult<Option<SystemAnnouncement>>;

    /// Every announcement, newest first.
    async fn list_all(&self) -> AppResult<Vec<SystemAnnouncement>>;

    /// Active, published, unexpired announcements, newest first.
    async fn list_live(&self, now: DateTime<Utc>) -> AppResult<Vec<SystemAnnouncement>>;

    /// Active, unpublished, unexpired announcements whose publish time has
    /// passed.
    async fn list_due(&self, now: DateTime<Utc>) -> AppResult<Vec<SystemAnnouncement>>;

    /// Flip the published flag. Returns the record only if this call
    /// published it.
    async fn mark_published(
        &self,
        id: AnnouncementId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<SystemAnnouncement>>;
}

/// Read access to user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Find a user by ID.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<UserProfile>>;

    /// Active users holding `role`.
    async fn active_by_role(&self, role: UserRole) -> AppResult<Vec<UserProfile>>;

    /// Active users in the named department.
    async fn active_by_department(&self, department: &str) -> AppResult<Vec<UserProfile>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_from_counts() {
        let stats = NotificationStats::from_counts([
            (NotificationCategory::Task, 3, 1),
            (NotificationCategory::Info, 2, 2),
        ]);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.unread, 3);
        assert_eq!(stats.by_type.get("task"), Some(&3));
        assert_eq!(stats.by_type.get("salary"), None);
    }
}
