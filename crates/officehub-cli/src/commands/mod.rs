//! CLI command definitions and dispatch.

pub mod announce;
pub mod maintenance;
pub mod migrate;
pub mod notify;
pub mod serve;
pub mod stats;

use clap::{Parser, Subcommand};

use officehub_api::{AppState, Stores};
use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_database::DatabasePool;

use crate::output::OutputFormat;

/// OfficeHub notification administration
#[derive(Debug, Parser)]
#[command(name = "officehub", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and environment overlays
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Environment overlay to apply
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the OfficeHub server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// Create and deliver notifications
    Notify(notify::NotifyArgs),
    /// Create an announcement
    Announce(announce::AnnounceArgs),
    /// List announcements visible to a user
    Announcements(announce::ListArgs),
    /// Publish scheduled announcements that are due
    PublishDue,
    /// Delete read notifications past retention
    Cleanup(maintenance::CleanupArgs),
    /// Notification counters of a user
    Stats(stats::StatsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config, &self.env)?;

        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Notify(args) => notify::execute(args, &config, self.format).await,
            Commands::Announce(args) => announce::create(args, &config, self.format).await,
            Commands::Announcements(args) => announce::list(args, &config, self.format).await,
            Commands::PublishDue => maintenance::publish_due(&config).await,
            Commands::Cleanup(args) => maintenance::cleanup(args, &config).await,
            Commands::Stats(args) => stats::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: connect to the database and wire services over it.
///
/// Sessions never attach to this process, so real-time pushes reach no
/// one; email delivery works as configured.
pub async fn connect(config: &AppConfig) -> Result<AppState, AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    let stores = Stores::postgres(&db);
    AppState::new(config.clone(), Some(db), stores, None)
}
