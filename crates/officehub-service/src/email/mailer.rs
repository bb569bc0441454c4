//! Composes and sends notification and account emails.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use officehub_core::config::EmailConfig;
use officehub_database::UserDirectory;
use officehub_entity::{Notification, UserProfile, UserRole};

use super::renderer::{EmailRenderer, EmailTemplate};
use super::transport::{EmailError, EmailMessage, EmailTransport};

const WELCOME_SUBJECT: &str = "Welcome to Office Management System";
const APPROVAL_SUBJECT: &str = "Account Approved - Office Management System";
const ADMIN_NEW_USER_SUBJECT: &str = "New User Registration Requires Approval";

/// Renders templates and hands messages to the configured transport.
///
/// Without a transport every send fails with [`EmailError::NotConfigured`]
/// and the account helpers return `false`.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<Arc<dyn EmailTransport>>,
    renderer: Arc<EmailRenderer>,
    users: Arc<dyn UserDirectory>,
    config: EmailConfig,
}

impl Mailer {
    /// Create a mailer.
    pub fn new(
        transport: Option<Arc<dyn EmailTransport>>,
        renderer: Arc<EmailRenderer>,
        users: Arc<dyn UserDirectory>,
        config: EmailConfig,
    ) -> Self {
        Self {
            transport,
            renderer,
            users,
            config,
        }
    }

    /// Whether a transport is configured.
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Subject line for a notification email.
    pub fn notification_subject(&self, notification: &Notification) -> String {
        format!("{} {}", self.config.subject_prefix, notification.title)
    }

    /// Email a single notification to its recipient.
    pub async fn send_notification(
        &self,
        notification: &Notification,
        recipient: &UserProfile,
    ) -> Result<(), EmailError> {
        let data = json!({
            "user_name": recipient.full_name(),
            "title": notification.title,
            "message": notification.message,
            "category": notification.category.as_str(),
            "action_url": notification.action_url,
            "action_label": notification.action_label,
            "frontend_url": self.config.frontend_url.trim_end_matches('/'),
        });
        self.deliver(
            EmailTemplate::Notification,
            self.notification_subject(notification),
            vec![recipient.email.clone()],
            &data,
        )
        .await
    }

    /// Greet a newly registered user.
    pub async fn send_welcome(&self, user: &UserProfile) -> bool {
        let data = json!({
            "user_name": user.full_name(),
            "company_name": self.config.from_name,
            "login_url": self.link("/login"),
        });
        self.report(
            EmailTemplate::Welcome,
            &user.email,
            self.deliver(
                EmailTemplate::Welcome,
                WELCOME_SUBJECT.to_string(),
                vec![user.email.clone()],
                &data,
            )
            .await,
        )
    }

    /// Tell a user their account was approved.
    pub async fn send_approval(&self, user: &UserProfile, approved_by: Option<&UserProfile>) -> bool {
        let data = json!({
            "user_name": user.full_name(),
            "approved_by": approved_by.map(UserProfile::full_name),
            "login_url": self.link("/login"),
        });
        self.report(
            EmailTemplate::Approval,
            &user.email,
            self.deliver(
                EmailTemplate::Approval,
                APPROVAL_SUBJECT.to_string(),
                vec![user.email.clone()],
                &data,
            )
            .await,
        )
    }

    /// Tell every active administrator that `user` awaits approval.
    ///
    /// Returns `false` without sending when there are no administrators.
    pub async fn send_admin_new_user(&self, user: &UserProfile) -> bool {
        let admins = match self.users.active_by_role(UserRole::Admin).await {
            Ok(admins) => admins,
            Err(e) => {
                warn!(error = %e, "Failed to look up administrators");
                return false;
            }
        };
        let recipients: Vec<String> = admins.into_iter().map(|a| a.email).collect();
        if recipients.is_empty() {
            return false;
        }

        let data = json!({
            "user_name": user.full_name(),
            "user_email": user.email,
            "user_role": user.role.as_str(),
            "department": user.department,
            "admin_url": self.link("/admin/approvals"),
        });
        let label = recipients.join(", ");
        self.report(
            EmailTemplate::AdminNewUser,
            &label,
            self.deliver(
                EmailTemplate::AdminNewUser,
                ADMIN_NEW_USER_SUBJECT.to_string(),
                recipients,
                &data,
            )
            .await,
        )
    }

    async fn deliver(
        &self,
        template: EmailTemplate,
        subject: String,
        to: Vec<String>,
        data: &serde_json::Value,
    ) -> Result<(), EmailError> {
        let transport = self.transport.as_ref().ok_or(EmailError::NotConfigured)?;
        let body = self.renderer.render(template, data)?;
        transport
            .send(&EmailMessage {
                to,
                subject,
                html_body: body.html,
                text_body: body.text,
            })
            .await
    }

    fn report(&self, template: EmailTemplate, to: &str, result: Result<(), EmailError>) -> bool {
        match result {
            Ok(()) => {
                info!(template = %template, to = to, "Email sent");
                true
            }
            Err(e) => {
                warn!(template = %template, to = to, error = %e, "Failed to send email");
                false
            }
        }
    }

    fn link(&self, path: &str) -> String {
        format!("{}{}", self.config.frontend_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use officehub_core::types::UserId;
    use officehub_database::memory::MemoryUserDirectory;
    use officehub_entity::{NewNotification, NotificationCategory};

    use super::*;
    use crate::email::MemoryTransport;

    fn user(role: UserRole, email: &str) -> UserProfile {
        UserProfile {
            id: UserId::new(),
            email: email.into(),
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            role,
            department: Some("Engineering".into()),
            is_active: true,
            is_approved: role == UserRole::Admin,
        }
    }

    fn mailer(transport: &MemoryTransport, users: &MemoryUserDirectory) -> Mailer {
        Mailer::new(
            Some(Arc::new(transport.clone())),
            Arc::new(EmailRenderer::new().unwrap()),
            Arc::new(users.clone()),
            EmailConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_notification_subject_has_prefix() {
        let transport = MemoryTransport::new();
        let users = MemoryUserDirectory::new();
        let recipient = user(UserRole::Employee, "asha@example.com");
        let n = NewNotification::new(recipient.id, "Salary Processed", "Paid", NotificationCategory::Salary)
            .into_notification(Utc::now());

        mailer(&transport, &users)
            .send_notification(&n, &recipient)
            .await
            .unwrap();

        let sent = transport.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "[Office Management] Salary Processed");
        assert_eq!(sent[0].to, vec!["asha@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_admin_notice_goes_to_all_active_admins() {
        let transport = MemoryTransport::new();
        let users = MemoryUserDirectory::new();
        users.insert(user(UserRole::Admin, "a1@example.com"));
        users.insert(user(UserRole::Admin, "a2@example.com"));
        let mut retired = user(UserRole::Admin, "old@example.com");
        retired.is_active = false;
        users.insert(retired);

        let newcomer = user(UserRole::Trainee, "new@example.com");
        assert!(mailer(&transport, &users).send_admin_new_user(&newcomer).await);

        let sent = transport.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, ADMIN_NEW_USER_SUBJECT);
        assert_eq!(
            sent[0].to,
            vec!["a1@example.com".to_string(), "a2@example.com".to_string()]
        );
        assert!(sent[0].text_body.contains("new@example.com"));
    }

    #[tokio::test]
    async fn test_admin_notice_without_admins_is_skipped() {
        let transport = MemoryTransport::new();
        let users = MemoryUserDirectory::new();
        let newcomer = user(UserRole::Employee, "new@example.com");

        assert!(!mailer(&transport, &users).send_admin_new_user(&newcomer).await);
        assert_eq!(transport.attempts(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_returns_false() {
        let transport = MemoryTransport::new();
        transport.fail_next(1);
        let users = MemoryUserDirectory::new();
        let newcomer = user(UserRole::Employee, "new@example.com");

        let m = mailer(&transport, &users);
        assert!(!m.send_welcome(&newcomer).await);
        assert!(m.send_welcome(&newcomer).await);
        assert_eq!(transport.sent().await[0].subject, WELCOME_SUBJECT);
    }

    #[tokio::test]
    async fn test_unconfigured_mailer() {
        let users = MemoryUserDirectory::new();
        let m = Mailer::new(
            None,
            Arc::new(EmailRenderer::new().unwrap()),
            Arc::new(users),
            EmailConfig::default(),
        );
        assert!(!m.is_enabled());
        assert!(!m.send_approval(&user(UserRole::Employee, "x@example.com"), None).await);
    }
}
