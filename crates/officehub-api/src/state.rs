//! Application state shared across all handlers.

use std::sync::Arc;

use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_database::repositories::{
    AnnouncementRepository, NotificationRepository, PreferenceRepository, UserRepository,
};
use officehub_database::{
    AnnouncementStore, DatabasePool, NotificationStore, PreferenceStore, UserDirectory,
};
use officehub_realtime::{EngineServices, RealtimeEngine};
use officehub_service::email::{EmailRenderer, EmailTransport, SmtpEmailTransport};
use officehub_service::{
    AnnouncementService, AudienceResolver, Mailer, NotificationService, PreferenceService,
};

/// The stores backing the services.
#[derive(Clone)]
pub struct Stores {
    /// Notification records.
    pub notifications: Arc<dyn NotificationStore>,
    /// Preference records.
    pub preferences: Arc<dyn PreferenceStore>,
    /// Announcements.
    pub announcements: Arc<dyn AnnouncementStore>,
    /// User directory.
    pub users: Arc<dyn UserDirectory>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
            preferences: Arc::new(PreferenceRepository::new(pool.clone())),
            announcements: Arc::new(AnnouncementRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool)),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool; absent when running on in-memory stores
    pub db: Option<DatabasePool>,
    /// User directory
    pub users: Arc<dyn UserDirectory>,
    /// Notification records
    pub notifications: Arc<NotificationService>,
    /// Preferences
    pub preferences: Arc<PreferenceService>,
    /// Announcements
    pub announcements: Arc<AnnouncementService>,
    /// Real-time engine
    pub realtime: RealtimeEngine,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("realtime", &self.realtime)
            .finish()
    }
}

impl AppState {
    /// Wire services and the real-time engine over `stores`.
    ///
    /// Without an explicit `transport`, an SMTP transport is built when
    /// email is configured.
    pub fn new(
        config: AppConfig,
        db: Option<DatabasePool>,
        stores: Stores,
        transport: Option<Arc<dyn EmailTransport>>,
    ) -> Result<Self, AppError> {
        let transport = match transport {
            Some(t) => Some(t),
            None if config.email.is_configured() => {
                Some(Arc::new(SmtpEmailTransport::new(&config.email)?) as Arc<dyn EmailTransport>)
            }
            None => None,
        };
        let renderer = EmailRenderer::new()
            .map_err(|e| AppError::configuration(format!("Email templates failed to load: {e}")))?;
        let mailer = Mailer::new(
            transport,
            Arc::new(renderer),
            stores.users.clone(),
            config.email.clone(),
        );

        let notifications = Arc::new(NotificationService::new(
            stores.notifications,
            AudienceResolver::new(stores.users.clone()),
            config.notifications.clone(),
        ));
        let preferences = Arc::new(PreferenceService::new(stores.preferences));
        let announcements = Arc::new(AnnouncementService::new(stores.announcements));

        let realtime = RealtimeEngine::new(
            config.realtime.clone(),
            EngineServices {
                notifications: notifications.clone(),
                preferences: preferences.clone(),
                users: stores.users.clone(),
                mailer,
            },
        );

        Ok(Self {
            config: Arc::new(config),
            db,
            users: stores.users,
            notifications,
            preferences,
            announcements,
            realtime,
        })
    }
}
