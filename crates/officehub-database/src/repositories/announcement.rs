//! System announcement repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use officehub_core::error::{AppError, ErrorKind};
use officehub_core::result::AppResult;
use officehub_core::types::AnnouncementId;
use officehub_entity::SystemAnnouncement;

use crate::store::AnnouncementStore;

/// PostgreSQL-backed announcement store.
#[derive(Debug, Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    /// Create a new announcement repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementStore for AnnouncementRepository {
    async fn insert(&self, a: &SystemAnnouncement) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO system_announcements \
             (id, title, content, priority, target_roles, target_departments, publish_at, \
              expire_at, is_active, is_published, created_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(a.id)
        .bind(&a.title)
        .bind(&a.content)
        .bind(a.priority)
        .bind(&a.target_roles)
        .bind(&a.target_departments)
        .bind(a.publish_at)
        .bind(a.expire_at)
        .bind(a.is_active)
        .bind(a.is_published)
        .bind(a.created_by)
        .bind(a.created_at)
        .bind(a.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create announcement", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: AnnouncementId) -> AppResult<Option<SystemAnnouncement>> {
        sqlx::query_as::<_, SystemAnnouncement>(
            "SELECT * FROM system_announcements WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find announcement", e))
    }

    async fn list_all(&self) -> AppResult<Vec<SystemAnnouncement>> {
        sqlx::query_as::<_, SystemAnnouncement>(
            "SELECT * FROM system_announcements ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list announcements", e))
    }

    async fn list_live(&self, now: DateTime<Utc>) -> AppResult<Vec<SystemAnnouncement>> {
        sqlx::query_as::<_, SystemAnnouncement>(
            "SELECT * FROM system_announcements \
             WHERE is_active = TRUE AND is_published = TRUE \
               AND (expire_at IS NULL OR expire_at >= $1) \
             ORDER BY created_at DESC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list announcements", e))
    }

    async fn list_due(&self, now: DateTime<Utc>) -> AppResult<Vec<SystemAnnouncement>> {
        sqlx::query_as::<_, SystemAnnouncement>(
            "SELECT * FROM system_announcements \
             WHERE is_active = TRUE AND is_published = FALSE AND publish_at <= $1 \
               AND (expire_at IS NULL OR expire_at >= $1) \
             ORDER BY publish_at ASC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list due announcements", e)
        })
    }

    async fn mark_published(
        &self,
        id: AnnouncementId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<SystemAnnouncement>> {
        sqlx::query_as::<_, SystemAnnouncement>(
            "UPDATE system_announcements SET is_published = TRUE, updated_at = $2 \
             WHERE id = $1 AND is_published = FALSE RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to publish announcement", e)
        })
    }
}
