//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled job configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler is started with the server.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the notification retention sweep.
    #[serde(default = "default_cleanup_cron")]
    pub cleanup_cron: String,
    /// Cron expression for publishing due announcements.
    #[serde(default = "default_announcement_cron")]
    pub announcement_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cleanup_cron: default_cleanup_cron(),
            announcement_cron: default_announcement_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cleanup_cron() -> String {
    "0 0 3 * * *".to_string()
}

fn default_announcement_cron() -> String {
    "0 * * * * *".to_string()
}
