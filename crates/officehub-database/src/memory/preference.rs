//! In-memory preference store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use officehub_core::result::AppResult;
use officehub_core::types::UserId;
use officehub_entity::NotificationPreference;

use crate::store::PreferenceStore;

/// In-memory preference store keyed by user.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    records: Arc<DashMap<UserId, NotificationPreference>>,
}

impl MemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of materialized records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn find(&self, user_id: UserId) -> AppResult<Option<NotificationPreference>> {
        Ok(self.records.get(&user_id).map(|entry| entry.value().clone()))
    }

    async fn upsert(&self, preference: &NotificationPreference) -> AppResult<NotificationPreference> {
        let mut stored = preference.clone();
        if let Some(existing) = self.records.get(&preference.user_id) {
            stored.created_at = existing.created_at;
        }
        self.records.insert(stored.user_id, stored.clone());
        Ok(stored)
    }
}
