//! In-memory user directory.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use officehub_core::result::AppResult;
use officehub_core::types::UserId;
use officehub_entity::{UserProfile, UserRole};

use crate::store::UserDirectory;

/// In-memory user directory, seeded explicitly.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<DashMap<UserId, UserProfile>>,
}

impl MemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub fn insert(&self, user: UserProfile) {
        self.users.insert(user.id, user);
    }

    fn collect_sorted(&self, filter: impl Fn(&UserProfile) -> bool) -> Vec<UserProfile> {
        let mut users: Vec<UserProfile> = self
            .users
            .iter()
            .filter(|entry| filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        users
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<UserProfile>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn active_by_role(&self, role: UserRole) -> AppResult<Vec<UserProfile>> {
        Ok(self.collect_sorted(|u| u.is_active && u.role == role))
    }

    async fn active_by_department(&self, department: &str) -> AppResult<Vec<UserProfile>> {
        Ok(self.collect_sorted(|u| u.is_active && u.department.as_deref() == Some(department)))
    }
}
