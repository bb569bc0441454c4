//! Job implementations.

pub mod announcement;
pub mod cleanup;

use async_trait::async_trait;
use serde_json::Value;

use officehub_core::error::AppError;

pub use announcement::AnnouncementPublishJob;
pub use cleanup::NotificationCleanupJob;

/// A unit of periodic work.
#[async_trait]
pub trait ScheduledJob: Send + Sync + 'static {
    /// Stable job name used in logs.
    fn name(&self) -> &'static str;

    /// Run once and return a summary of what was done.
    async fn run(&self) -> Result<Value, AppError>;
}
