//! Notification records, recipients and templates.

pub mod audience;
pub mod service;
pub mod templates;

pub use audience::{Audience, AudienceResolver};
pub use service::NotificationService;
pub use templates::{NotificationDraft, TemplateKey};
