//! SMTP delivery via `lettre`.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use officehub_core::config::EmailConfig;

use super::transport::{EmailError, EmailMessage, EmailTransport};

/// STARTTLS SMTP relay transport.
pub struct SmtpEmailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailTransport {
    /// Build a transport from configuration.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let from = Mailbox::new(Some(config.from_name.clone()), config.from_address.parse()?);

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            from = %config.from_address,
            "SMTP transport configured"
        );

        Ok(Self {
            mailer: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl EmailTransport for SmtpEmailTransport {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        if message.to.is_empty() {
            return Err(EmailError::NoRecipients);
        }

        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(message.subject.clone());
        for address in &message.to {
            builder = builder.to(address.parse::<Mailbox>()?);
        }

        let email = builder
            .multipart(MultiPart::alternative_plain_html(
                message.text_body.clone(),
                message.html_body.clone(),
            ))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.mailer.send(email).await?;
        Ok(())
    }
}
