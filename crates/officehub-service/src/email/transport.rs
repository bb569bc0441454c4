//! Email transport abstraction.

use async_trait::async_trait;
use officehub_core::error::{AppError, ErrorKind};

/// Error type for email rendering and delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// A recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// A template failed to compile or render.
    #[error("Email template error: {0}")]
    Template(String),

    /// The message has no recipients.
    #[error("Email has no recipients")]
    NoRecipients,

    /// No transport is configured.
    #[error("Email delivery is not configured")]
    NotConfigured,

    /// The transport refused the message for another reason.
    #[error("Email delivery failed: {0}")]
    Unavailable(String),
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        AppError::with_source(ErrorKind::ExternalService, err.to_string(), err)
    }
}

/// A fully rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// HTML alternative.
    pub html_body: String,
    /// Plain-text alternative.
    pub text_body: String,
}

/// Sends rendered messages.
#[async_trait]
pub trait EmailTransport: Send + Sync + 'static {
    /// Deliver one message to all of its recipients.
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}
