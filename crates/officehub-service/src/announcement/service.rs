//! Announcement authoring, listing and scheduled publication.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use officehub_core::error::AppError;
use officehub_core::types::AnnouncementId;
use officehub_database::AnnouncementStore;
use officehub_entity::{NewAnnouncement, SystemAnnouncement};

use crate::context::RequestContext;

/// Manages system announcements.
#[derive(Clone)]
pub struct AnnouncementService {
    store: Arc<dyn AnnouncementStore>,
}

impl AnnouncementService {
    /// Creates a new announcement service.
    pub fn new(store: Arc<dyn AnnouncementStore>) -> Self {
        Self { store }
    }

    /// Create an announcement. Administrators only.
    ///
    /// An announcement created as published with a publish time in the
    /// past or present is live immediately; the caller is responsible for
    /// broadcasting it.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NewAnnouncement,
    ) -> Result<SystemAnnouncement, AppError> {
        ctx.require_admin()?;
        input.validate()?;

        let announcement = input.into_announcement(ctx.user_id(), ctx.request_time);
        self.store.insert(&announcement).await?;

        info!(
            announcement_id = %announcement.id,
            priority = ?announcement.priority,
            published = announcement.is_published,
            "Announcement created"
        );
        Ok(announcement)
    }

    /// Announcements the caller may see.
    ///
    /// Administrators see every record; everyone else sees live
    /// announcements whose targets admit them.
    pub async fn list_for(&self, ctx: &RequestContext) -> Result<Vec<SystemAnnouncement>, AppError> {
        if ctx.is_admin() {
            return self.store.list_all().await;
        }
        let now = ctx.request_time;
        Ok(self
            .store
            .list_live(now)
            .await?
            .into_iter()
            .filter(|a| a.is_visible_to(&ctx.user, now))
            .collect())
    }

    /// Find an announcement by ID.
    pub async fn find(&self, id: AnnouncementId) -> Result<SystemAnnouncement, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Announcement {id} not found")))
    }

    /// Publish every announcement whose publish time has passed.
    ///
    /// Returns only the announcements this call published, so concurrent
    /// runs never broadcast the same record twice.
    pub async fn publish_due(&self, now: DateTime<Utc>) -> Result<Vec<SystemAnnouncement>, AppError> {
        let mut published = Vec::new();
        for due in self.store.list_due(now).await? {
            if let Some(a) = self.store.mark_published(due.id, now).await? {
                published.push(a);
            }
        }
        if !published.is_empty() {
            info!(count = published.len(), "Scheduled announcements published");
        }
        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use officehub_core::types::UserId;
    use officehub_database::memory::MemoryAnnouncementStore;
    use officehub_entity::{AnnouncementPriority, UserProfile, UserRole};

    use super::*;

    fn ctx(role: UserRole, department: Option<&str>) -> RequestContext {
        RequestContext::new(UserProfile {
            id: UserId::new(),
            email: "someone@example.com".into(),
            first_name: "Sam".into(),
            last_name: "Okafor".into(),
            role,
            department: department.map(str::to_string),
            is_active: true,
            is_approved: true,
        })
    }

    fn input(roles: Vec<UserRole>, published: bool) -> NewAnnouncement {
        NewAnnouncement {
            title: "Quarterly review".into(),
            content: "Slides are due on Thursday.".into(),
            priority: AnnouncementPriority::Medium,
            target_roles: roles,
            target_departments: vec![],
            publish_at: None,
            expire_at: None,
            is_active: true,
            is_published: published,
        }
    }

    #[tokio::test]
    async fn test_only_admins_create() {
        let svc = AnnouncementService::new(Arc::new(MemoryAnnouncementStore::new()));
        let err = svc
            .create(&ctx(UserRole::Employee, None), input(vec![], true))
            .await
            .unwrap_err();
        assert_eq!(err.kind, officehub_core::ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_list_filters_by_role() {
        let svc = AnnouncementService::new(Arc::new(MemoryAnnouncementStore::new()));
        let admin = ctx(UserRole::Admin, None);
        svc.create(&admin, input(vec![UserRole::Admin], true)).await.unwrap();
        svc.create(&admin, input(vec![], true)).await.unwrap();
        svc.create(&admin, input(vec![], false)).await.unwrap();

        assert_eq!(svc.list_for(&admin).await.unwrap().len(), 3);
        let trainee = svc.list_for(&ctx(UserRole::Trainee, Some("Ops"))).await.unwrap();
        assert_eq!(trainee.len(), 1);
        assert!(trainee[0].is_untargeted());
    }

    #[tokio::test]
    async fn test_publish_due_publishes_once() {
        let svc = AnnouncementService::new(Arc::new(MemoryAnnouncementStore::new()));
        let admin = ctx(UserRole::Admin, None);
        let mut scheduled = input(vec![], false);
        scheduled.publish_at = Some(Utc::now() - Duration::minutes(5));
        let created = svc.create(&admin, scheduled).await.unwrap();

        let mut future = input(vec![], false);
        future.publish_at = Some(Utc::now() + Duration::hours(1));
        svc.create(&admin, future).await.unwrap();

        let now = Utc::now();
        let first = svc.publish_due(now).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, created.id);
        assert!(first[0].is_published);
        assert!(svc.publish_due(now).await.unwrap().is_empty());
    }
}
