//! Notification creation, listing and read-state management.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use officehub_core::config::NotificationConfig;
use officehub_core::error::AppError;
use officehub_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use officehub_database::{NotificationStats, NotificationStore};
use officehub_entity::{NewNotification, Notification, UserRole};

use super::audience::{Audience, AudienceResolver};
use super::templates::{NotificationDraft, TemplateKey};
use crate::context::RequestContext;

/// Manages the notification log.
///
/// Creation only persists; pushing the record to live sessions and
/// email is the dispatcher's job.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
    audiences: AudienceResolver,
    config: NotificationConfig,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        audiences: AudienceResolver,
        config: NotificationConfig,
    ) -> Self {
        Self {
            store,
            audiences,
            config,
        }
    }

    /// Notification settings in effect.
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Validate and persist one notification.
    pub async fn create(&self, input: NewNotification) -> Result<Notification, AppError> {
        input.validate()?;
        let notification = input.into_notification(Utc::now());
        self.store.insert(&notification).await?;

        debug!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            category = %notification.category,
            "Notification created"
        );
        Ok(notification)
    }

    /// Persist the same draft for several recipients.
    pub async fn create_bulk(
        &self,
        recipients: &[UserId],
        draft: &NotificationDraft,
    ) -> Result<Vec<Notification>, AppError> {
        let mut created = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            created.push(self.create(draft.for_recipient(*recipient)).await?);
        }
        if !created.is_empty() {
            info!(count = created.len(), title = %draft.title, "Bulk notifications created");
        }
        Ok(created)
    }

    /// Persist a draft for every member of `audience` except `exclude`.
    pub async fn notify(
        &self,
        audience: &Audience,
        draft: &NotificationDraft,
        exclude: Option<UserId>,
    ) -> Result<Vec<Notification>, AppError> {
        let recipients = self.audiences.resolve(audience, exclude).await?;
        self.create_bulk(&recipients, draft).await
    }

    /// Notify active, approved users holding `role`.
    pub async fn notify_role(
        &self,
        role: UserRole,
        draft: &NotificationDraft,
        exclude: Option<UserId>,
    ) -> Result<Vec<Notification>, AppError> {
        self.notify(&Audience::Role(role), draft, exclude).await
    }

    /// Notify active, approved members of a department.
    pub async fn notify_department(
        &self,
        department: &str,
        draft: &NotificationDraft,
        exclude: Option<UserId>,
    ) -> Result<Vec<Notification>, AppError> {
        self.notify(&Audience::Department(department.to_string()), draft, exclude)
            .await
    }

    /// Notify every active administrator.
    pub async fn notify_admins(
        &self,
        draft: &NotificationDraft,
    ) -> Result<Vec<Notification>, AppError> {
        self.notify(&Audience::Admins, draft, None).await
    }

    /// Fill a built-in template and persist it for `recipient`.
    pub async fn create_from_template(
        &self,
        recipient: UserId,
        key: TemplateKey,
        params: &BTreeMap<String, String>,
        action_url: Option<String>,
        data: Option<serde_json::Value>,
    ) -> Result<Notification, AppError> {
        let mut draft = NotificationDraft::from_template(key, params);
        draft.action_url = action_url;
        draft.data = data;
        self.create(draft.for_recipient(recipient)).await
    }

    /// Page through the caller's notifications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.store
            .list_for_recipient(ctx.user_id(), page.normalized())
            .await
    }

    /// The newest notifications of a user; the configured limit when
    /// `limit` is `None`.
    pub async fn recent(
        &self,
        user_id: UserId,
        limit: Option<u64>,
    ) -> Result<Vec<Notification>, AppError> {
        let limit = limit.unwrap_or(self.config.recent_limit);
        self.store.recent_for_recipient(user_id, limit).await
    }

    /// Count a user's unread notifications.
    pub async fn unread_count(&self, user_id: UserId) -> Result<u64, AppError> {
        self.store.count_unread(user_id).await
    }

    /// Mark one of the user's notifications read.
    ///
    /// Fails with `NotFound` when the ID does not name a notification of
    /// this user. Marking an already read notification keeps its original
    /// `read_at`.
    pub async fn mark_read(
        &self,
        user_id: UserId,
        id: NotificationId,
    ) -> Result<Notification, AppError> {
        self.store
            .mark_read(id, user_id, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))
    }

    /// Mark every unread notification of the user read.
    pub async fn mark_all_read(&self, user_id: UserId) -> Result<u64, AppError> {
        let count = self.store.mark_all_read(user_id, Utc::now()).await?;
        debug!(user_id = %user_id, count, "Marked all notifications read");
        Ok(count)
    }

    /// Record that a notification left the system by email.
    pub async fn mark_sent(&self, id: NotificationId) -> Result<Notification, AppError> {
        self.store
            .mark_sent(id, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))
    }

    /// Find a notification by ID.
    pub async fn find(&self, id: NotificationId) -> Result<Option<Notification>, AppError> {
        self.store.find_by_id(id).await
    }

    /// Counters for a user.
    pub async fn stats(&self, user_id: UserId) -> Result<NotificationStats, AppError> {
        self.store.stats(user_id).await
    }

    /// Delete read notifications read more than `days` ago; the retention
    /// setting when `days` is `None`.
    pub async fn cleanup_old(&self, days: Option<u32>) -> Result<u64, AppError> {
        let days = days.unwrap_or(self.config.retention_days);
        let cutoff = Duration::try_days(i64::from(days))
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .ok_or_else(|| AppError::validation(format!("Retention of {days} days is out of range")))?;
        let deleted = self.store.delete_read_before(cutoff).await?;
        info!(days, deleted, "Old notifications cleaned up");
        Ok(deleted)
    }
}
