//! Scheduled announcement publisher.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use officehub_core::error::AppError;
use officehub_realtime::EventBridge;
use officehub_service::AnnouncementService;

use super::ScheduledJob;

/// Publishes announcements whose publish time has passed and pushes each
/// one to the system topic.
#[derive(Clone)]
pub struct AnnouncementPublishJob {
    announcements: Arc<AnnouncementService>,
    bridge: Arc<EventBridge>,
}

impl AnnouncementPublishJob {
    /// Create a new publish job
    pub fn new(announcements: Arc<AnnouncementService>, bridge: Arc<EventBridge>) -> Self {
        Self {
            announcements,
            bridge,
        }
    }
}

#[async_trait]
impl ScheduledJob for AnnouncementPublishJob {
    fn name(&self) -> &'static str {
        "announcement_publish"
    }

    async fn run(&self) -> Result<Value, AppError> {
        let published = self.announcements.publish_due(Utc::now()).await?;
        let sessions: usize = published.iter().map(|a| self.bridge.announce(a)).sum();

        Ok(serde_json::json!({
            "published": published.len(),
            "sessions": sessions,
        }))
    }
}
