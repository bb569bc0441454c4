//! In-memory notification log backed by `DashMap`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use officehub_core::error::AppError;
use officehub_core::result::AppResult;
use officehub_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use officehub_entity::Notification;

use crate::store::{NotificationStats, NotificationStore};

/// In-memory notification store.
///
/// Each record sits behind its own map entry, so concurrent read/sent
/// updates on the same notification are serialized by the entry lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationStore {
    records: Arc<DashMap<NotificationId, Notification>>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notifications.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn newest_first(&self, recipient: UserId) -> Vec<Notification> {
        let mut items: Vec<Notification> = self
            .records
            .iter()
            .filter(|entry| entry.recipient_id == recipient)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        items
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        if self.records.contains_key(&notification.id) {
            return Err(AppError::conflict(format!(
                "Notification {} already exists",
                notification.id
            )));
        }
        self.records.insert(notification.id, notification.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_for_recipient(
        &self,
        recipient: UserId,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let all = self.newest_first(recipient);
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn recent_for_recipient(
        &self,
        recipient: UserId,
        limit: u64,
    ) -> AppResult<Vec<Notification>> {
        let mut items = self.newest_first(recipient);
        items.truncate(limit as usize);
        Ok(items)
    }

    async fn count_unread(&self, recipient: UserId) -> AppResult<u64> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.recipient_id == recipient && !entry.is_read)
            .count() as u64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        recipient: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        match self.records.get_mut(&id) {
            Some(mut entry) if entry.recipient_id == recipient => {
                entry.mark_read(at);
                Ok(Some(entry.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn mark_all_read(&self, recipient: UserId, at: DateTime<Utc>) -> AppResult<u64> {
        let mut updated = 0;
        for mut entry in self.records.iter_mut() {
            if entry.recipient_id == recipient && entry.mark_read(at) {
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn mark_sent(
        &self,
        id: NotificationId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        Ok(self.records.get_mut(&id).map(|mut entry| {
            entry.mark_sent(at);
            entry.clone()
        }))
    }

    async fn stats(&self, recipient: UserId) -> AppResult<NotificationStats> {
        Ok(NotificationStats::from_counts(
            self.records
                .iter()
                .filter(|entry| entry.recipient_id == recipient)
                .map(|entry| (entry.category, 1, u64::from(!entry.is_read))),
        ))
    }

    async fn delete_read_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let before = self.records.len();
        self.records
            .retain(|_, n| !(n.is_read && n.read_at.is_some_and(|at| at < cutoff)));
        Ok((before - self.records.len()) as u64)
    }
}
