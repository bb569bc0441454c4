//! Handlebars rendering of the built-in email templates.

use std::fmt;

use handlebars::Handlebars;
use serde::Serialize;

use super::transport::EmailError;

/// Built-in email templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailTemplate {
    /// A single notification.
    Notification,
    /// Greeting sent after registration.
    Welcome,
    /// Account approved.
    Approval,
    /// Tells administrators a registration awaits approval.
    AdminNewUser,
}

impl EmailTemplate {
    /// Every template.
    pub const ALL: [Self; 4] = [
        Self::Notification,
        Self::Welcome,
        Self::Approval,
        Self::AdminNewUser,
    ];

    /// Registry name of the template.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Notification => "notification",
            Self::Welcome => "welcome",
            Self::Approval => "approval",
            Self::AdminNewUser => "admin_new_user",
        }
    }

    fn sources(&self) -> (&'static str, &'static str) {
        match self {
            Self::Notification => (
                include_str!("../../templates/emails/notification.html.hbs"),
                include_str!("../../templates/emails/notification.txt.hbs"),
            ),
            Self::Welcome => (
                include_str!("../../templates/emails/welcome.html.hbs"),
                include_str!("../../templates/emails/welcome.txt.hbs"),
            ),
            Self::Approval => (
                include_str!("../../templates/emails/approval.html.hbs"),
                include_str!("../../templates/emails/approval.txt.hbs"),
            ),
            Self::AdminNewUser => (
                include_str!("../../templates/emails/admin_new_user.html.hbs"),
                include_str!("../../templates/emails/admin_new_user.txt.hbs"),
            ),
        }
    }
}

impl fmt::Display for EmailTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rendered HTML and plain-text alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    /// HTML alternative.
    pub html: String,
    /// Plain-text alternative.
    pub text: String,
}

/// Renders the built-in templates.
///
/// HTML output escapes interpolated values; plain-text output does not.
pub struct EmailRenderer {
    html: Handlebars<'static>,
    text: Handlebars<'static>,
}

impl EmailRenderer {
    /// Compile every built-in template.
    pub fn new() -> Result<Self, EmailError> {
        let mut html = Handlebars::new();
        let mut text = Handlebars::new();
        text.register_escape_fn(handlebars::no_escape);

        for template in EmailTemplate::ALL {
            let (html_src, text_src) = template.sources();
            html.register_template_string(template.name(), html_src)
                .map_err(|e| EmailError::Template(format!("{template}.html: {e}")))?;
            text.register_template_string(template.name(), text_src)
                .map_err(|e| EmailError::Template(format!("{template}.txt: {e}")))?;
        }

        Ok(Self { html, text })
    }

    /// Render both alternatives of `template` with `data`.
    pub fn render<T: Serialize>(
        &self,
        template: EmailTemplate,
        data: &T,
    ) -> Result<RenderedBody, EmailError> {
        let html = self
            .html
            .render(template.name(), data)
            .map_err(|e| EmailError::Template(format!("{template}.html: {e}")))?;
        let text = self
            .text
            .render(template.name(), data)
            .map_err(|e| EmailError::Template(format!("{template}.txt: {e}")))?;
        Ok(RenderedBody { html, text })
    }
}

impl fmt::Debug for EmailRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailRenderer").finish_non_exhaustive()
    }
}
