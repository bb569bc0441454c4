//! Cron scheduler for periodic jobs.

use std::sync::Arc;
use std::time::Instant;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use officehub_core::config::WorkerConfig;
use officehub_core::error::AppError;

use crate::jobs::ScheduledJob;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Cron expressions
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("config", &self.config)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler, config })
    }

    /// Register the retention sweep and the announcement publisher on
    /// their configured schedules.
    pub async fn register_default_tasks(
        &self,
        cleanup: Arc<dyn ScheduledJob>,
        publish: Arc<dyn ScheduledJob>,
    ) -> Result<(), AppError> {
        self.register(&self.config.cleanup_cron, cleanup).await?;
        self.register(&self.config.announcement_cron, publish).await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Run `job` on the cron expression `schedule`.
    ///
    /// A failing run is logged and the schedule stays active.
    pub async fn register(&self, schedule: &str, job: Arc<dyn ScheduledJob>) -> Result<(), AppError> {
        let name = job.name();
        let cron = CronJob::new_async(schedule, move |_uuid, _lock| {
            let job = Arc::clone(&job);
            Box::pin(async move {
                run_once(job.as_ref()).await;
            })
        })
        .map_err(|e| AppError::configuration(format!("Invalid schedule for {name} '{schedule}': {e}")))?;

        self.scheduler
            .add(cron)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add {name} schedule: {e}")))?;

        tracing::info!(job = name, schedule = schedule, "Registered scheduled job");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}

/// Run a job once, logging its outcome.
pub async fn run_once(job: &dyn ScheduledJob) -> bool {
    let started = Instant::now();
    tracing::debug!(job = job.name(), "Job started");

    match job.run().await {
        Ok(summary) => {
            tracing::info!(
                job = job.name(),
                duration_ms = started.elapsed().as_millis() as u64,
                summary = %summary,
                "Job completed"
            );
            true
        }
        Err(e) => {
            tracing::error!(job = job.name(), error = %e, "Job failed");
            false
        }
    }
}
