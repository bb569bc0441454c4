//! Read-only user projection consumed from the account directory.

use officehub_core::types::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::UserRole;

/// The fields of a user account this service reads.
///
/// Accounts are owned by the authentication subsystem; this service never
/// writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// User role.
    pub role: UserRole,
    /// Name of the user's department, if resolved.
    pub department: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether an administrator approved the account.
    pub is_approved: bool,
}

impl UserProfile {
    /// "First Last", falling back to the email when both names are blank.
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
