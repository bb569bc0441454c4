//! Notification preference repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use officehub_core::error::{AppError, ErrorKind};
use officehub_core::result::AppResult;
use officehub_core::types::UserId;
use officehub_entity::NotificationPreference;

use crate::store::PreferenceStore;

/// PostgreSQL-backed preference store.
#[derive(Debug, Clone)]
pub struct PreferenceRepository {
    pool: PgPool,
}

impl PreferenceRepository {
    /// Create a new preference repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for PreferenceRepository {
    async fn find(&self, user_id: UserId) -> AppResult<Option<NotificationPreference>> {
        sqlx::query_as::<_, NotificationPreference>(
            "SELECT * FROM notification_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load preferences", e))
    }

    async fn upsert(&self, p: &NotificationPreference) -> AppResult<NotificationPreference> {
        sqlx::query_as::<_, NotificationPreference>(
            "INSERT INTO notification_preferences (\
                 user_id, \
                 email_enabled, email_task_updates, email_attendance_reminders, \
                 email_salary_updates, email_learning_updates, email_system_updates, \
                 push_enabled, push_task_updates, push_attendance_reminders, \
                 push_salary_updates, push_learning_updates, push_system_updates, \
                 inapp_enabled, inapp_task_updates, inapp_attendance_reminders, \
                 inapp_salary_updates, inapp_learning_updates, inapp_system_updates, \
                 quiet_hours_enabled, quiet_hours_start, quiet_hours_end, \
                 created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                     $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 email_enabled = EXCLUDED.email_enabled, \
                 email_task_updates = EXCLUDED.email_task_updates, \
                 email_attendance_reminders = EXCLUDED.email_attendance_reminders, \
                 email_salary_updates = EXCLUDED.email_salary_updates, \
                 email_learning_updates = EXCLUDED.email_learning_updates, \
                 email_system_updates = EXCLUDED.email_system_updates, \
                 push_enabled = EXCLUDED.push_enabled, \
                 push_task_updates = EXCLUDED.push_task_updates, \
                 push_attendance_reminders = EXCLUDED.push_attendance_reminders, \
                 push_salary_updates = EXCLUDED.push_salary_updates, \
                 push_learning_updates = EXCLUDED.push_learning_updates, \
                 push_system_updates = EXCLUDED.push_system_updates, \
                 inapp_enabled = EXCLUDED.inapp_enabled, \
                 inapp_task_updates = EXCLUDED.inapp_task_updates, \
                 inapp_attendance_reminders = EXCLUDED.inapp_attendance_reminders, \
                 inapp_salary_updates = EXCLUDED.inapp_salary_updates, \
                 inapp_learning_updates = EXCLUDED.inapp_learning_updates, \
                 inapp_system_updates = EXCLUDED.inapp_system_updates, \
                 quiet_hours_enabled = EXCLUDED.quiet_hours_enabled, \
                 quiet_hours_start = EXCLUDED.quiet_hours_start, \
                 quiet_hours_end = EXCLUDED.quiet_hours_end, \
                 updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(p.user_id)
        .bind(p.email_enabled)
        .bind(p.email_task_updates)
        .bind(p.email_attendance_reminders)
        .bind(p.email_salary_updates)
        .bind(p.email_learning_updates)
        .bind(p.email_system_updates)
        .bind(p.push_enabled)
        .bind(p.push_task_updates)
        .bind(p.push_attendance_reminders)
        .bind(p.push_salary_updates)
        .bind(p.push_learning_updates)
        .bind(p.push_system_updates)
        .bind(p.inapp_enabled)
        .bind(p.inapp_task_updates)
        .bind(p.inapp_attendance_reminders)
        .bind(p.inapp_salary_updates)
        .bind(p.inapp_learning_updates)
        .bind(p.inapp_system_updates)
        .bind(p.quiet_hours_enabled)
        .bind(p.quiet_hours_start)
        .bind(p.quiet_hours_end)
        .bind(p.created_at)
        .bind(p.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save preferences", e))
    }
}
