//! Domain event → notification mapping.
//!
//! Office subsystems publish [`DomainEvent`]s explicitly; the bridge turns
//! each one into topic pushes, persisted notifications and account mail.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use officehub_core::error::AppError;
use officehub_core::events::{
    AccountEvent, AttendanceEvent, AttendanceSnapshot, DomainEvent, EventPayload, LearningEvent,
    LeaveEvent, PayrollEvent, TaskEvent, TaskSnapshot,
};
use officehub_core::types::UserId;
use officehub_database::UserDirectory;
use officehub_entity::{Notification, NotificationCategory, SystemAnnouncement, UserProfile};
use officehub_service::notification::templates::params;
use officehub_service::{Mailer, NotificationDraft, TemplateKey};

use crate::channel::Topic;
use crate::connection::ConnectionManager;
use crate::message::{OutboundMessage, builder};
use crate::notification::NotificationDispatcher;

const LEAVE_URL: &str = "/employee/leave-requests";
const ATTENDANCE_URL: &str = "/attendance";
const SALARY_URL: &str = "/salary";
const APPROVALS_URL: &str = "/admin/approvals";

/// Bridges domain events into the realtime system.
pub struct EventBridge {
    /// Connection manager
    connections: Arc<ConnectionManager>,
    /// Delivery dispatcher
    dispatcher: Arc<NotificationDispatcher>,
    /// Account lookups
    users: Arc<dyn UserDirectory>,
    /// Account mail
    mailer: Mailer,
}

impl std::fmt::Debug for EventBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBridge").finish()
    }
}

impl EventBridge {
    /// Create a new event bridge
    pub fn new(
        connections: Arc<ConnectionManager>,
        dispatcher: Arc<NotificationDispatcher>,
        users: Arc<dyn UserDirectory>,
        mailer: Mailer,
    ) -> Self {
        Self {
            connections,
            dispatcher,
            users,
            mailer,
        }
    }

    /// Apply one domain event.
    ///
    /// Returns the notifications created for it, already delivered.
    pub async fn handle(&self, event: &DomainEvent) -> Result<Vec<Notification>, AppError> {
        debug!(event_id = %event.id, event = event.name(), "Handling domain event");

        let created = match &event.payload {
            EventPayload::Task(TaskEvent::Assigned { task }) => self.on_task_assigned(task).await?,
            EventPayload::Task(TaskEvent::Updated { task }) => self.on_task_updated(task).await?,
            EventPayload::Attendance(AttendanceEvent::Recorded { record }) => {
                self.on_attendance_recorded(record);
                Vec::new()
            }
            EventPayload::Attendance(AttendanceEvent::Reminder { user_id }) => {
                let draft = NotificationDraft::from_template(
                    TemplateKey::AttendanceReminder,
                    &Default::default(),
                )
                .with_action_url(ATTENDANCE_URL);
                vec![self.publish(*user_id, draft).await?]
            }
            EventPayload::Leave(LeaveEvent::Decided {
                request_id,
                user_id,
                start_date,
                end_date,
                approved,
            }) => {
                let key = if *approved {
                    TemplateKey::LeaveApproved
                } else {
                    TemplateKey::LeaveRejected
                };
                let draft = NotificationDraft::from_template(
                    key,
                    &params([
                        ("start_date", start_date.to_string()),
                        ("end_date", end_date.to_string()),
                    ]),
                )
                .with_action_url(LEAVE_URL)
                .with_data(serde_json::json!({ "leave_request_id": request_id }));
                vec![self.publish(*user_id, draft).await?]
            }
            EventPayload::Payroll(PayrollEvent::SalaryProcessed {
                payroll_id,
                user_id,
                month,
                year,
            }) => {
                let draft = NotificationDraft::from_template(
                    TemplateKey::SalaryProcessed,
                    &params([("month", month.clone()), ("year", year.to_string())]),
                )
                .with_action_url(SALARY_URL)
                .with_data(serde_json::json!({ "payroll_id": payroll_id }));
                vec![self.publish(*user_id, draft).await?]
            }
            EventPayload::Learning(LearningEvent::CourseEnrolled {
                user_id,
                course_id,
                course_title,
            }) => {
                let draft = NotificationDraft::from_template(
                    TemplateKey::CourseEnrolled,
                    &params([("course_title", course_title.clone())]),
                )
                .with_action_url(format!("/courses/{course_id}"))
                .with_data(serde_json::json!({ "course_id": course_id }));
                vec![self.publish(*user_id, draft).await?]
            }
            EventPayload::Learning(LearningEvent::TrainingScheduled {
                user_id,
                session_id,
                session_title,
                scheduled_at,
            }) => {
                let draft = NotificationDraft::from_template(
                    TemplateKey::TrainingSession,
                    &params([
                        ("session_title", session_title.clone()),
                        ("datetime", scheduled_at.format("%Y-%m-%d %H:%M").to_string()),
                    ]),
                )
                .with_action_url(format!("/training/{session_id}"))
                .with_data(serde_json::json!({ "session_id": session_id }));
                vec![self.publish(*user_id, draft).await?]
            }
            EventPayload::Account(AccountEvent::Registered { user_id }) => {
                self.on_account_registered(*user_id).await?
            }
            EventPayload::Account(AccountEvent::Approved {
                user_id,
                approved_by,
            }) => {
                self.on_account_approved(*user_id, *approved_by).await?;
                Vec::new()
            }
        };

        info!(
            event_id = %event.id,
            event = event.name(),
            notifications = created.len(),
            "Domain event handled"
        );
        Ok(created)
    }

    /// Push an announcement to the system topic.
    ///
    /// With push filtering enabled, identified sessions receive it only when
    /// it is visible to them and anonymous sessions only when it is
    /// untargeted. Returns the number of sessions reached.
    pub fn announce(&self, announcement: &SystemAnnouncement) -> usize {
        let message = builder::system_announcement(announcement);
        let topic = Topic::SystemAnnouncements;

        let sent = if self.connections.filters_announcements() {
            let now = Utc::now();
            self.connections.broadcast_where(&topic, &message, |conn| match &conn.viewer {
                Some(viewer) => announcement.is_visible_to(viewer, now),
                None => announcement.is_untargeted(),
            })
        } else {
            self.connections.broadcast(&topic, &message)
        };

        info!(announcement_id = %announcement.id, sent, "Announcement broadcast");
        sent
    }

    async fn on_task_assigned(&self, task: &TaskSnapshot) -> Result<Vec<Notification>, AppError> {
        let data = builder::task_data(task, self.display_name(task.assigned_by).await);
        self.connections
            .broadcast(&Topic::Tasks(task.assigned_to), &OutboundMessage::TaskAssigned { data });

        let draft = NotificationDraft::from_template(
            TemplateKey::TaskAssigned,
            &params([("task_title", task.title.clone())]),
        )
        .with_action_url(task_url(task))
        .with_data(serde_json::json!({ "task_id": task.id }));
        Ok(vec![self.publish(task.assigned_to, draft).await?])
    }

    async fn on_task_updated(&self, task: &TaskSnapshot) -> Result<Vec<Notification>, AppError> {
        let data = builder::task_data(task, self.display_name(task.assigned_by).await);
        self.connections
            .broadcast(&Topic::Tasks(task.assigned_to), &OutboundMessage::TaskUpdate { data });

        match task.assigned_by {
            Some(assigner) if task.is_completed() && assigner != task.assigned_to => {
                let draft = NotificationDraft::from_template(
                    TemplateKey::TaskCompleted,
                    &params([("task_title", task.title.clone())]),
                )
                .with_action_url(task_url(task))
                .with_data(serde_json::json!({ "task_id": task.id }));
                Ok(vec![self.publish(assigner, draft).await?])
            }
            _ => Ok(Vec::new()),
        }
    }

    fn on_attendance_recorded(&self, record: &AttendanceSnapshot) {
        self.connections.broadcast(
            &Topic::Attendance(record.user_id),
            &OutboundMessage::AttendanceUpdate {
                data: builder::attendance_data(record),
            },
        );
    }

    async fn on_account_registered(&self, user_id: UserId) -> Result<Vec<Notification>, AppError> {
        let user = self.require_user(user_id).await?;

        self.mailer.send_welcome(&user).await;
        self.mailer.send_admin_new_user(&user).await;

        let draft = NotificationDraft::new(
            "New User Registration",
            format!(
                "{} ({}) registered as {} and is awaiting approval",
                user.full_name(),
                user.email,
                user.role
            ),
            NotificationCategory::System,
        )
        .with_action_url(APPROVALS_URL)
        .with_data(serde_json::json!({ "user_id": user.id }));

        let created = self.dispatcher.notifications().notify_admins(&draft).await?;
        self.dispatcher.deliver_all(&created).await;
        Ok(created)
    }

    async fn on_account_approved(
        &self,
        user_id: UserId,
        approved_by: Option<UserId>,
    ) -> Result<(), AppError> {
        let user = self.require_user(user_id).await?;
        let approver = match approved_by {
            Some(id) => self.users.find_by_id(id).await?,
            None => None,
        };
        self.mailer.send_approval(&user, approver.as_ref()).await;
        Ok(())
    }

    async fn publish(
        &self,
        recipient: UserId,
        draft: NotificationDraft,
    ) -> Result<Notification, AppError> {
        self.dispatcher.publish(draft.for_recipient(recipient)).await
    }

    async fn require_user(&self, user_id: UserId) -> Result<UserProfile, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    async fn display_name(&self, user_id: Option<UserId>) -> Option<String> {
        let id = user_id?;
        match self.users.find_by_id(id).await {
            Ok(user) => user.map(|u| u.full_name()),
            Err(e) => {
                warn!(user_id = %id, error = %e, "Failed to resolve assigner name");
                None
            }
        }
    }
}

fn task_url(task: &TaskSnapshot) -> String {
    format!("/tasks/{}", task.id)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use officehub_core::config::RealtimeConfig;
    use officehub_entity::{AnnouncementPriority, NewAnnouncement, UserRole};
    use uuid::Uuid;

    use super::*;
    use crate::testing::Fixture;

    fn task(assignee: UserId, assigner: Option<UserId>, status: &str) -> TaskSnapshot {
        TaskSnapshot {
            id: Uuid::new_v4(),
            title: "Quarterly audit".into(),
            status: status.into(),
            priority: "high".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 6, 30),
            completion_percentage: 40,
            assigned_to: assignee,
            assigned_by: assigner,
        }
    }

    fn event(payload: EventPayload) -> DomainEvent {
        DomainEvent::new(None, payload)
    }

    fn announcement(roles: Vec<UserRole>) -> SystemAnnouncement {
        NewAnnouncement {
            title: "Maintenance".into(),
            content: "Saturday 02:00".into(),
            priority: AnnouncementPriority::High,
            target_roles: roles,
            target_departments: Vec::new(),
            publish_at: None,
            expire_at: None,
            is_active: true,
            is_published: true,
        }
        .into_announcement(UserId::new(), Utc::now())
    }

    #[tokio::test]
    async fn test_task_assigned_pushes_and_notifies() {
        let fx = Fixture::new();
        let manager = fx.user(UserRole::Admin);
        let worker = fx.user(UserRole::Employee);
        let (_t, mut tasks_rx) = fx.connect(Topic::Tasks(worker.id), &worker);
        let (_u, mut user_rx) = fx.connect(Topic::User(worker.id), &worker);

        let t = task(worker.id, Some(manager.id), "pending");
        let created = fx
            .engine
            .bridge
            .handle(&event(EventPayload::Task(TaskEvent::Assigned { task: t.clone() })))
            .await
            .unwrap();

        match tasks_rx.try_recv().unwrap() {
            OutboundMessage::TaskAssigned { data } => {
                assert_eq!(data["title"], "Quarterly audit");
                assert_eq!(data["assigned_by"], manager.full_name());
            }
            other => panic!("unexpected message: {other:?}"),
        }

        assert_eq!(created.len(), 1);
        let n = &created[0];
        assert_eq!(n.recipient_id, worker.id);
        assert_eq!(n.category, NotificationCategory::Task);
        assert_eq!(n.action_url.as_deref(), Some(format!("/tasks/{}", t.id).as_str()));
        assert!(matches!(
            user_rx.try_recv().unwrap(),
            OutboundMessage::NewNotification { .. }
        ));
    }

    #[tokio::test]
    async fn test_completed_task_notifies_assigner_only_when_distinct() {
        let fx = Fixture::new();
        let manager = fx.user(UserRole::Admin);
        let worker = fx.user(UserRole::Employee);

        let done = task(worker.id, Some(manager.id), "completed");
        let created = fx
            .engine
            .bridge
            .handle(&event(EventPayload::Task(TaskEvent::Updated { task: done })))
            .await
            .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].recipient_id, manager.id);
        assert_eq!(created[0].category, NotificationCategory::Success);
        assert_eq!(created[0].message, "Task \"Quarterly audit\" has been marked as completed");

        let self_assigned = task(worker.id, Some(worker.id), "completed");
        let created = fx
            .engine
            .bridge
            .handle(&event(EventPayload::Task(TaskEvent::Updated { task: self_assigned })))
            .await
            .unwrap();
        assert!(created.is_empty());
    }

    #[tokio::test]
    async fn test_attendance_update_is_push_only() {
        let fx = Fixture::new();
        let user = fx.user(UserRole::Employee);
        let (_h, mut rx) = fx.connect(Topic::Attendance(user.id), &user);

        let record = AttendanceSnapshot {
            id: Uuid::new_v4(),
            user_id: user.id,
            date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            status: "present".into(),
            check_in_time: NaiveTime::from_hms_opt(9, 0, 0),
            check_out_time: None,
            hours_worked: None,
        };
        let created = fx
            .engine
            .bridge
            .handle(&event(EventPayload::Attendance(AttendanceEvent::Recorded { record })))
            .await
            .unwrap();

        assert!(created.is_empty());
        match rx.try_recv().unwrap() {
            OutboundMessage::AttendanceUpdate { data } => {
                assert_eq!(data["check_in_time"], "09:00:00");
                assert_eq!(data["hours_worked"], 0.0);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_leave_rejection_uses_warning_template() {
        let fx = Fixture::new();
        let user = fx.user(UserRole::Employee);
        let created = fx
            .engine
            .bridge
            .handle(&event(EventPayload::Leave(LeaveEvent::Decided {
                request_id: Uuid::new_v4(),
                user_id: user.id,
                start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
                approved: false,
            })))
            .await
            .unwrap();

        let n = &created[0];
        assert_eq!(n.title, "Leave Request Rejected");
        assert_eq!(
            n.message,
            "Your leave request from 2026-03-02 to 2026-03-04 has been rejected"
        );
        assert_eq!(n.category, NotificationCategory::Warning);
        assert_eq!(n.action_url.as_deref(), Some(LEAVE_URL));
    }

    #[tokio::test]
    async fn test_registration_mails_and_notifies_admins() {
        let fx = Fixture::new();
        let admin = fx.user(UserRole::Admin);
        let newcomer = fx.user(UserRole::Trainee);

        let created = fx
            .engine
            .bridge
            .handle(&event(EventPayload::Account(AccountEvent::Registered {
                user_id: newcomer.id,
            })))
            .await
            .unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].recipient_id, admin.id);
        assert_eq!(created[0].category, NotificationCategory::System);

        let subjects: Vec<String> = fx.transport.sent().await.into_iter().map(|m| m.subject).collect();
        assert!(subjects.iter().any(|s| s == "Welcome to Office Management System"));
        assert!(subjects.iter().any(|s| s == "New User Registration Requires Approval"));
    }

    #[tokio::test]
    async fn test_unknown_account_is_not_found() {
        let fx = Fixture::new();
        let err = fx
            .engine
            .bridge
            .handle(&event(EventPayload::Account(AccountEvent::Approved {
                user_id: UserId::new(),
                approved_by: None,
            })))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_announce_unfiltered_reaches_everyone() {
        let fx = Fixture::new();
        let trainee = fx.user(UserRole::Trainee);
        let (_a, mut rx_user) = fx.connect(Topic::SystemAnnouncements, &trainee);
        let (_b, mut rx_anon) = fx.engine.connections.register(Topic::SystemAnnouncements, None);

        assert_eq!(fx.engine.bridge.announce(&announcement(vec![UserRole::Admin])), 2);
        assert!(rx_user.try_recv().is_ok());
        assert!(rx_anon.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_announce_filtered_respects_targets() {
        let fx = Fixture::with_realtime_config(RealtimeConfig {
            filter_announcements_at_push: true,
            ..Default::default()
        });
        let admin = fx.user(UserRole::Admin);
        let trainee = fx.user(UserRole::Trainee);
        let (_a, mut rx_admin) = fx.connect(Topic::SystemAnnouncements, &admin);
        let (_t, mut rx_trainee) = fx.connect(Topic::SystemAnnouncements, &trainee);
        let (_n, mut rx_anon) = fx.engine.connections.register(Topic::SystemAnnouncements, None);

        assert_eq!(fx.engine.bridge.announce(&announcement(vec![UserRole::Admin])), 1);
        match rx_admin.try_recv().unwrap() {
            OutboundMessage::SystemAnnouncement { data } => assert_eq!(data["title"], "Maintenance"),
            other => panic!("unexpected message: {other:?}"),
        }
        assert!(rx_trainee.try_recv().is_err());
        assert!(rx_anon.try_recv().is_err());

        assert_eq!(fx.engine.bridge.announce(&announcement(Vec::new())), 3);
    }
}
