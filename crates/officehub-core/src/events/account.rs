//! Account lifecycle events.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Events related to user registration and approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountEvent {
    /// A user registered and awaits approval.
    Registered {
        /// The new user.
        user_id: UserId,
    },
    /// An administrator approved a user.
    Approved {
        /// The approved user.
        user_id: UserId,
        /// The approving administrator.
        #[serde(default)]
        approved_by: Option<UserId>,
    },
}
