//! In-memory announcement store using a Tokio mutex.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use officehub_core::error::AppError;
use officehub_core::result::AppResult;
use officehub_core::types::AnnouncementId;
use officehub_entity::SystemAnnouncement;

use crate::store::AnnouncementStore;

/// In-memory announcement store.
#[derive(Debug, Clone, Default)]
pub struct MemoryAnnouncementStore {
    state: Arc<Mutex<Vec<SystemAnnouncement>>>,
}

impl MemoryAnnouncementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut items: Vec<SystemAnnouncement>) -> Vec<SystemAnnouncement> {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

#[async_trait]
impl AnnouncementStore for MemoryAnnouncementStore {
    async fn insert(&self, announcement: &SystemAnnouncement) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if state.iter().any(|a| a.id == announcement.id) {
            return Err(AppError::conflict(format!(
                "Announcement {} already exists",
                announcement.id
            )));
        }
        state.push(announcement.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: AnnouncementId) -> AppResult<Option<SystemAnnouncement>> {
        let state = self.state.lock().await;
        Ok(state.iter().find(|a| a.id == id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<SystemAnnouncement>> {
        let state = self.state.lock().await;
        Ok(newest_first(state.clone()))
    }

    async fn list_live(&self, now: DateTime<Utc>) -> AppResult<Vec<SystemAnnouncement>> {
        let state = self.state.lock().await;
        Ok(newest_first(
            state
                .iter()
                .filter(|a| a.is_active && a.is_published && !a.is_expired(now))
                .cloned()
                .collect(),
        ))
    }

    async fn list_due(&self, now: DateTime<Utc>) -> AppResult<Vec<SystemAnnouncement>> {
        let state = self.state.lock().await;
        let mut due: Vec<SystemAnnouncement> = state
            .iter()
            .filter(|a| a.is_active && !a.is_published && a.is_due(now) && !a.is_expired(now))
            .cloned()
            .collect();
        due.sort_by_key(|a| a.publish_at);
        Ok(due)
    }

    async fn mark_published(
        &self,
        id: AnnouncementId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<SystemAnnouncement>> {
        let mut state = self.state.lock().await;
        match state.iter_mut().find(|a| a.id == id) {
            Some(a) if !a.is_published => {
                a.is_published = true;
                a.updated_at = at;
                Ok(Some(a.clone()))
            }
            _ => Ok(None),
        }
    }
}
