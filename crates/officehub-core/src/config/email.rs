//! Outbound SMTP configuration.

use serde::{Deserialize, Serialize};

/// Outbound email configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether email delivery is enabled at all.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay host.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,
    /// Sender address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Prefix prepended to the subject of notification emails.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
    /// Base URL of the web front end, used to build links in emails.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// SMTP connection timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl EmailConfig {
    /// Whether enough settings are present to build a transport.
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.smtp_host.is_empty()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from_address: default_from_address(),
            from_name: default_from_name(),
            subject_prefix: default_subject_prefix(),
            frontend_url: default_frontend_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "noreply@officehub.local".to_string()
}

fn default_from_name() -> String {
    "Office Management System".to_string()
}

fn default_subject_prefix() -> String {
    "[Office Management]".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    15
}
