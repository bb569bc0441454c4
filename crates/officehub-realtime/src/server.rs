//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use tracing::info;

use officehub_core::config::RealtimeConfig;
use officehub_database::UserDirectory;
use officehub_service::{Mailer, NotificationService, PreferenceService};

use crate::bridge::EventBridge;
use crate::channel::ChannelRegistry;
use crate::connection::ConnectionManager;
use crate::message::InboundHandler;
use crate::notification::NotificationDispatcher;

/// Services the engine delivers through.
pub struct EngineServices {
    /// Notification records.
    pub notifications: Arc<NotificationService>,
    /// Preference resolution.
    pub preferences: Arc<PreferenceService>,
    /// Account lookups.
    pub users: Arc<dyn UserDirectory>,
    /// Email delivery.
    pub mailer: Mailer,
}

/// Central real-time engine that coordinates all WebSocket subsystems.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Topic registry.
    pub channels: Arc<ChannelRegistry>,
    /// Delivery dispatcher.
    pub dispatcher: Arc<NotificationDispatcher>,
    /// Session protocol handler.
    pub inbound: InboundHandler,
    /// Event bridge (domain events → notifications).
    pub bridge: Arc<EventBridge>,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine")
            .field("connections", &self.connections.connection_count())
            .finish()
    }
}

impl RealtimeEngine {
    /// Creates a new real-time engine with all subsystems.
    pub fn new(config: RealtimeConfig, services: EngineServices) -> Self {
        let channels = Arc::new(ChannelRegistry::new());
        let connections = Arc::new(ConnectionManager::new(config, channels.clone()));
        let dispatcher = Arc::new(NotificationDispatcher::new(
            connections.clone(),
            services.notifications,
            services.preferences,
            services.users.clone(),
            services.mailer.clone(),
        ));
        let inbound = InboundHandler::new(dispatcher.clone());
        let bridge = Arc::new(EventBridge::new(
            connections.clone(),
            dispatcher.clone(),
            services.users,
            services.mailer,
        ));

        info!("Real-time engine initialized");

        Self {
            connections,
            channels,
            dispatcher,
            inbound,
            bridge,
        }
    }

    /// Closes every session; their forwarders send a Close frame on the
    /// way out.
    pub fn shutdown(&self) {
        info!("Shutting down real-time engine");

        self.connections.close_all();

        info!("Real-time engine shut down");
    }
}
