//! Announcement commands.

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use officehub_api::extractors::resolve_user;
use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_entity::{AnnouncementPriority, NewAnnouncement, SystemAnnouncement, UserRole};
use officehub_service::RequestContext;

use crate::output::{self, OutputFormat};

/// Arguments for the announce command
#[derive(Debug, Args)]
pub struct AnnounceArgs {
    /// Acting administrator's user ID
    #[arg(long = "as")]
    pub actor: String,
    /// Headline
    #[arg(short, long)]
    pub title: String,
    /// Body text
    #[arg(short, long)]
    pub content: String,
    /// low, medium, high or urgent
    #[arg(short, long, default_value = "medium")]
    pub priority: AnnouncementPriority,
    /// Target role; repeatable
    #[arg(long = "role")]
    pub roles: Vec<UserRole>,
    /// Target department; repeatable
    #[arg(long = "department")]
    pub departments: Vec<String>,
    /// Publish time (RFC 3339); now when omitted
    #[arg(long)]
    pub publish_at: Option<DateTime<Utc>>,
    /// Expiry time (RFC 3339)
    #[arg(long)]
    pub expire_at: Option<DateTime<Utc>>,
    /// Leave unpublished for the worker to publish once due
    #[arg(long)]
    pub scheduled: bool,
}

/// Arguments for listing announcements
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Viewer whose visibility rules apply
    #[arg(long = "as")]
    pub viewer: String,
}

/// Announcement display row for table output
#[derive(Debug, Serialize, Tabled)]
struct AnnouncementRow {
    id: String,
    title: String,
    priority: String,
    published: bool,
    publish_at: String,
    targets: String,
}

impl From<&SystemAnnouncement> for AnnouncementRow {
    fn from(a: &SystemAnnouncement) -> Self {
        let mut targets: Vec<String> = a.target_roles.iter().map(|r| r.to_string()).collect();
        targets.extend(a.target_departments.iter().cloned());

        Self {
            id: a.id.to_string(),
            title: a.title.clone(),
            priority: a.priority.to_string(),
            published: a.is_published,
            publish_at: a.publish_at.format("%Y-%m-%d %H:%M").to_string(),
            targets: if targets.is_empty() {
                "everyone".to_string()
            } else {
                targets.join(", ")
            },
        }
    }
}

/// Create an announcement
pub async fn create(args: &AnnounceArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let state = super::connect(config).await?;
    let ctx = RequestContext::new(resolve_user(&state, &args.actor).await?);

    let announcement = state
        .announcements
        .create(&ctx, NewAnnouncement {
            title: args.title.clone(),
            content: args.content.clone(),
            priority: args.priority,
            target_roles: args.roles.clone(),
            target_departments: args.departments.clone(),
            publish_at: args.publish_at,
            expire_at: args.expire_at,
            is_active: true,
            is_published: !args.scheduled,
        })
        .await?;

    output::print_list(&[AnnouncementRow::from(&announcement)], format);
    if !announcement.is_published {
        println!("Scheduled; the worker publishes it at {}.", announcement.publish_at);
    }
    Ok(())
}

/// List announcements visible to a user
pub async fn list(args: &ListArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let state = super::connect(config).await?;
    let ctx = RequestContext::new(resolve_user(&state, &args.viewer).await?);

    let announcements = state.announcements.list_for(&ctx).await?;
    let rows: Vec<AnnouncementRow> = announcements.iter().map(AnnouncementRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
