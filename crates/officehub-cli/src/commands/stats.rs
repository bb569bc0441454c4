//! Notification counters.

use clap::Args;

use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_core::types::UserId;

use crate::output::{self, OutputFormat};

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// User whose notifications are counted
    #[arg(short, long)]
    pub user: UserId,
}

/// Print total, unread and per-category counts
pub async fn execute(args: &StatsArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let state = super::connect(config).await?;
    let stats = state.notifications.stats(args.user).await?;

    let mut fields = vec![
        ("User", args.user.to_string()),
        ("Total", stats.total.to_string()),
        ("Unread", stats.unread.to_string()),
    ];
    for (category, count) in &stats.by_type {
        fields.push((category.as_str(), count.to_string()));
    }

    output::print_fields(&stats, &fields, format);
    Ok(())
}
