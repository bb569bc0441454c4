//! Shared in-memory fixture for the crate's tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;

use officehub_core::config::{EmailConfig, NotificationConfig, RealtimeConfig};
use officehub_core::types::UserId;
use officehub_database::memory::{MemoryNotificationStore, MemoryPreferenceStore, MemoryUserDirectory};
use officehub_entity::{UserProfile, UserRole};
use officehub_service::email::{EmailRenderer, EmailTransport, MemoryTransport};
use officehub_service::{AudienceResolver, Mailer, NotificationService, PreferenceService};

use crate::channel::Topic;
use crate::connection::ConnectionHandle;
use crate::message::OutboundMessage;
use crate::server::{EngineServices, RealtimeEngine};

pub(crate) struct Fixture {
    pub users: MemoryUserDirectory,
    pub transport: MemoryTransport,
    pub notifications: Arc<NotificationService>,
    pub preferences: Arc<PreferenceService>,
    pub engine: RealtimeEngine,
    seq: AtomicUsize,
}

impl Fixture {
    pub fn new() -> Self {
        Self::build(RealtimeConfig::default(), NotificationConfig::default(), true)
    }

    pub fn with_notification_config(config: NotificationConfig) -> Self {
        Self::build(RealtimeConfig::default(), config, true)
    }

    pub fn with_realtime_config(config: RealtimeConfig) -> Self {
        Self::build(config, NotificationConfig::default(), true)
    }

    pub fn without_email() -> Self {
        Self::build(RealtimeConfig::default(), NotificationConfig::default(), false)
    }

    fn build(realtime: RealtimeConfig, notification: NotificationConfig, email: bool) -> Self {
        let users = MemoryUserDirectory::new();
        let transport = MemoryTransport::new();
        let directory: Arc<dyn officehub_database::UserDirectory> = Arc::new(users.clone());

        let mail_transport: Option<Arc<dyn EmailTransport>> = if email {
            Some(Arc::new(transport.clone()))
        } else {
            None
        };
        let mailer = Mailer::new(
            mail_transport,
            Arc::new(EmailRenderer::new().unwrap()),
            directory.clone(),
            EmailConfig::default(),
        );

        let notifications = Arc::new(NotificationService::new(
            Arc::new(MemoryNotificationStore::new()),
            AudienceResolver::new(directory.clone()),
            notification,
        ));
        let preferences = Arc::new(PreferenceService::new(Arc::new(MemoryPreferenceStore::new())));

        let engine = RealtimeEngine::new(
            realtime,
            EngineServices {
                notifications: notifications.clone(),
                preferences: preferences.clone(),
                users: directory,
                mailer,
            },
        );

        Self {
            users,
            transport,
            notifications,
            preferences,
            engine,
            seq: AtomicUsize::new(0),
        }
    }

    /// Insert an active, approved user.
    pub fn user(&self, role: UserRole) -> UserProfile {
        let n = self.seq.fetch_add(1, Ordering::SeqCst);
        let user = UserProfile {
            id: UserId::new(),
            email: format!("user{n}@example.com"),
            first_name: format!("User{n}"),
            last_name: "Test".into(),
            role,
            department: Some("Operations".into()),
            is_active: true,
            is_approved: true,
        };
        self.users.insert(user.clone());
        user
    }

    pub fn connect(
        &self,
        topic: Topic,
        user: &UserProfile,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        self.engine.connections.register(topic, Some(user.clone()))
    }
}
