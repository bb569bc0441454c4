//! Read-only user directory over the accounts table.

use async_trait::async_trait;
use sqlx::PgPool;

use officehub_core::error::{AppError, ErrorKind};
use officehub_core::result::AppResult;
use officehub_core::types::UserId;
use officehub_entity::{UserProfile, UserRole};

use crate::store::UserDirectory;

const PROFILE_COLUMNS: &str =
    "id, email, first_name, last_name, role, department, is_active, is_approved";

/// PostgreSQL-backed user directory.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    async fn active_by_role(&self, role: UserRole) -> AppResult<Vec<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users WHERE role = $1 AND is_active = TRUE ORDER BY email"
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users by role", e))
    }

    async fn active_by_department(&self, department: &str) -> AppResult<Vec<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users \
             WHERE department = $1 AND is_active = TRUE ORDER BY email"
        ))
        .bind(department)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list users by department", e)
        })
    }
}
