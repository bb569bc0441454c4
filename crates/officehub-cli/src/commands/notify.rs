//! Create and deliver notifications from the command line.

use std::collections::BTreeMap;

use clap::{ArgGroup, Args};
use serde::Serialize;
use tabled::Tabled;

use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_core::types::UserId;
use officehub_entity::{Notification, NotificationCategory, UserRole};
use officehub_service::{Audience, NotificationDraft, TemplateKey};

use crate::output::{self, OutputFormat};

/// Arguments for the notify command
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["user", "role", "department", "admins"])))]
#[command(group(ArgGroup::new("content").required(true).args(["template", "title"])))]
pub struct NotifyArgs {
    /// Single recipient
    #[arg(long)]
    pub user: Option<UserId>,
    /// Every active, approved user with this role
    #[arg(long)]
    pub role: Option<UserRole>,
    /// Every active, approved member of this department
    #[arg(long)]
    pub department: Option<String>,
    /// Every active administrator
    #[arg(long)]
    pub admins: bool,
    /// Leave this user out of a group audience
    #[arg(long)]
    pub exclude: Option<UserId>,
    /// Built-in template key, e.g. `salary_processed`
    #[arg(long)]
    pub template: Option<TemplateKey>,
    /// Template parameter as `name=value`; repeatable
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
    /// Title, when not using a template
    #[arg(long, requires = "message")]
    pub title: Option<String>,
    /// Message, when not using a template
    #[arg(long)]
    pub message: Option<String>,
    /// Category, when not using a template
    #[arg(long = "type", default_value = "info")]
    pub category: NotificationCategory,
    /// Action link
    #[arg(long)]
    pub action_url: Option<String>,
}

/// Notification display row for table output
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    id: String,
    recipient: String,
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    category: String,
    title: String,
    created_at: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            recipient: n.recipient_id.to_string(),
            category: n.category.to_string(),
            title: n.title.clone(),
            created_at: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

impl NotifyArgs {
    fn audience(&self) -> Audience {
        match (self.user, self.role, &self.department) {
            (Some(id), _, _) => Audience::User(id),
            (_, Some(role), _) => Audience::Role(role),
            (_, _, Some(department)) => Audience::Department(department.clone()),
            _ => Audience::Admins,
        }
    }

    fn draft(&self) -> NotificationDraft {
        let mut draft = match self.template {
            Some(key) => {
                let params: BTreeMap<String, String> = self.params.iter().cloned().collect();
                NotificationDraft::from_template(key, &params)
            }
            None => NotificationDraft::new(
                self.title.clone().unwrap_or_default(),
                self.message.clone().unwrap_or_default(),
                self.category,
            ),
        };
        if let Some(url) = &self.action_url {
            draft.action_url = Some(url.clone());
        }
        draft
    }
}

/// Execute the notify command
pub async fn execute(args: &NotifyArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let state = super::connect(config).await?;

    let created = state
        .notifications
        .notify(&args.audience(), &args.draft(), args.exclude)
        .await?;
    state.realtime.dispatcher.deliver_all(&created).await;

    let rows: Vec<NotificationRow> = created.iter().map(NotificationRow::from).collect();
    output::print_list(&rows, format);
    if format == OutputFormat::Table {
        output::print_success(&format!("Created {} notification(s).", created.len()));
    }
    Ok(())
}
