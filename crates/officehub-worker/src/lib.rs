//! Scheduled background jobs for OfficeHub.
//!
//! This crate provides:
//! - A cron scheduler that runs jobs on configured expressions
//! - The notification retention sweep
//! - The publisher that releases due announcements and broadcasts them

pub mod jobs;
pub mod scheduler;

pub use jobs::{AnnouncementPublishJob, NotificationCleanupJob, ScheduledJob};
pub use scheduler::CronScheduler;
