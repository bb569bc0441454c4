//! Email rendering and delivery.

pub mod mailer;
pub mod memory;
pub mod renderer;
pub mod smtp;
pub mod transport;

pub use mailer::Mailer;
pub use memory::MemoryTransport;
pub use renderer::{EmailRenderer, EmailTemplate, RenderedBody};
pub use smtp::SmtpEmailTransport;
pub use transport::{EmailError, EmailMessage, EmailTransport};
