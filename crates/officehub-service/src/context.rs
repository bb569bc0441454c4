//! Request context carrying the acting user.

use chrono::{DateTime, Utc};

use officehub_core::error::AppError;
use officehub_core::types::UserId;
use officehub_entity::UserProfile;

/// Context for the current request.
///
/// Built once the caller's identity has been resolved and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The acting user.
    pub user: UserProfile,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: UserProfile) -> Self {
        Self {
            user,
            request_time: Utc::now(),
        }
    }

    /// The acting user's ID.
    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    /// Returns whether the acting user is an admin.
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    /// Fail with an authorization error unless the user is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator role required"))
        }
    }
}
