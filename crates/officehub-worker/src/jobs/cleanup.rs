//! Notification retention sweep.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use officehub_core::error::AppError;
use officehub_service::NotificationService;

use super::ScheduledJob;

/// Deletes read notifications older than the retention window.
#[derive(Clone)]
pub struct NotificationCleanupJob {
    notifications: Arc<NotificationService>,
    retention_days: u32,
}

impl NotificationCleanupJob {
    /// Create a new cleanup job
    pub fn new(notifications: Arc<NotificationService>, retention_days: u32) -> Self {
        Self {
            notifications,
            retention_days,
        }
    }
}

#[async_trait]
impl ScheduledJob for NotificationCleanupJob {
    fn name(&self) -> &'static str {
        "notification_cleanup"
    }

    async fn run(&self) -> Result<Value, AppError> {
        let removed = self
            .notifications
            .cleanup_old(Some(self.retention_days))
            .await?;

        Ok(serde_json::json!({
            "removed": removed,
            "retention_days": self.retention_days,
        }))
    }
}
