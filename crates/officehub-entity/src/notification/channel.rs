//! Delivery channel enumeration.

use std::fmt;
use std::str::FromStr;

use officehub_core::AppError;
use serde::{Deserialize, Serialize};

/// A transport a notification can be delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryChannel {
    /// SMTP email.
    Email,
    /// Push to connected devices.
    Push,
    /// In-app delivery over the real-time channel.
    #[serde(rename = "inapp")]
    InApp,
}

impl DeliveryChannel {
    /// Return the channel tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Push => "push",
            Self::InApp => "inapp",
        }
    }
}

impl fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeliveryChannel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "push" => Ok(Self::Push),
            "inapp" | "in_app" => Ok(Self::InApp),
            _ => Err(AppError::validation(format!(
                "Invalid delivery channel: '{s}'. Expected one of: email, push, inapp"
            ))),
        }
    }
}
