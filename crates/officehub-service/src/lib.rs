//! # officehub-service
//!
//! Business logic for OfficeHub notifications. Each service wraps a store
//! trait object and implements one use-case family; delivery over the
//! real-time channel and email is orchestrated one layer up.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod announcement;
pub mod context;
pub mod email;
pub mod notification;
pub mod preference;

pub use announcement::AnnouncementService;
pub use context::RequestContext;
pub use email::Mailer;
pub use notification::{Audience, AudienceResolver, NotificationDraft, NotificationService, TemplateKey};
pub use preference::PreferenceService;
