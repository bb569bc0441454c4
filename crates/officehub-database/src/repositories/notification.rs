//! Notification repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use officehub_core::error::{AppError, ErrorKind};
use officehub_core::result::AppResult;
use officehub_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use officehub_entity::{Notification, NotificationCategory};

use crate::store::{NotificationStats, NotificationStore};

/// PostgreSQL-backed notification log.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, n: &Notification) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO notifications \
             (id, recipient_id, title, message, category, data, action_url, action_label, \
              is_read, read_at, is_sent, sent_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(n.id)
        .bind(n.recipient_id)
        .bind(&n.title)
        .bind(&n.message)
        .bind(n.category)
        .bind(&n.data)
        .bind(&n.action_url)
        .bind(&n.action_label)
        .bind(n.is_read)
        .bind(n.read_at)
        .bind(n.is_sent)
        .bind(n.sent_at)
        .bind(n.created_at)
        .bind(n.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err("Failed to create notification"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find notification"))
    }

    async fn list_for_recipient(
        &self,
        recipient: UserId,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE recipient_id = $1")
                .bind(recipient)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err("Failed to count notifications"))?;

        let items = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE recipient_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(recipient)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list notifications"))?;

        Ok(PageResponse::new(items, page, total.max(0) as u64))
    }

    async fn recent_for_recipient(
        &self,
        recipient: UserId,
        limit: u64,
    ) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE recipient_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2",
        )
        .bind(recipient)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list recent notifications"))
    }

    async fn count_unread(&self, recipient: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err("Failed to count unread notifications"))?;
        Ok(count.max(0) as u64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        recipient: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        // COALESCE keeps the first read time when two sessions race.
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET \
                 is_read = TRUE, \
                 read_at = COALESCE(read_at, $3), \
                 updated_at = CASE WHEN is_read THEN updated_at ELSE $3 END \
             WHERE id = $1 AND recipient_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(recipient)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to mark notification read"))
    }

    async fn mark_all_read(&self, recipient: UserId, at: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $2, updated_at = $2 \
             WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(db_err("Failed to mark notifications read"))?;
        Ok(result.rows_affected())
    }

    async fn mark_sent(
        &self,
        id: NotificationId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET \
                 is_sent = TRUE, \
                 sent_at = COALESCE(sent_at, $2), \
                 updated_at = CASE WHEN is_sent THEN updated_at ELSE $2 END \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to mark notification sent"))
    }

    async fn stats(&self, recipient: UserId) -> AppResult<NotificationStats> {
        let rows: Vec<(NotificationCategory, i64, i64)> = sqlx::query_as(
            "SELECT category, COUNT(*), COUNT(*) FILTER (WHERE is_read = FALSE) \
             FROM notifications WHERE recipient_id = $1 GROUP BY category",
        )
        .bind(recipient)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to compute notification stats"))?;

        Ok(NotificationStats::from_counts(rows.into_iter().map(
            |(category, total, unread)| (category, total.max(0) as u64, unread.max(0) as u64),
        )))
    }

    async fn delete_read_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM notifications WHERE is_read = TRUE AND read_at < $1")
                .bind(cutoff)
                .execute(&self.pool)
                .await
                .map_err(db_err("Failed to delete old notifications"))?;
        Ok(result.rows_affected())
    }
}
