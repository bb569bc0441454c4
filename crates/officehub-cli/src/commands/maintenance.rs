//! One-shot runs of the scheduled jobs.

use std::sync::Arc;

use clap::Args;

use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_worker::{AnnouncementPublishJob, NotificationCleanupJob, ScheduledJob};

use crate::output;

/// Arguments for the cleanup command
#[derive(Debug, Args)]
pub struct CleanupArgs {
    /// Retention in days; the configured value when omitted
    #[arg(short, long)]
    pub days: Option<u32>,
}

/// Delete read notifications older than the retention window
pub async fn cleanup(args: &CleanupArgs, config: &AppConfig) -> Result<(), AppError> {
    let state = super::connect(config).await?;
    let days = args.days.unwrap_or(config.notifications.retention_days);

    let job = NotificationCleanupJob::new(state.notifications.clone(), days);
    let summary = job.run().await?;

    output::print_success(&format!(
        "Removed {} notification(s) read more than {days} day(s) ago.",
        summary["removed"]
    ));
    Ok(())
}

/// Publish due announcements and push them to the system topic
pub async fn publish_due(config: &AppConfig) -> Result<(), AppError> {
    let state = super::connect(config).await?;

    let job = AnnouncementPublishJob::new(
        state.announcements.clone(),
        Arc::clone(&state.realtime.bridge),
    );
    let summary = job.run().await?;

    output::print_success(&format!("Published {} announcement(s).", summary["published"]));
    Ok(())
}
