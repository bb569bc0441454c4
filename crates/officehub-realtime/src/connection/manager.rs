//! Connection lifecycle and topic fan-out.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use officehub_core::config::RealtimeConfig;
use officehub_core::types::UserId;
use officehub_entity::UserProfile;

use crate::channel::{ChannelRegistry, Topic};
use crate::message::OutboundMessage;

use super::handle::{ConnectionHandle, ConnectionId};
use super::heartbeat::HeartbeatConfig;
use super::pool::ConnectionPool;

/// Manages all active WebSocket sessions.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: ConnectionPool,
    /// Topic registry.
    channels: Arc<ChannelRegistry>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig, channels: Arc<ChannelRegistry>) -> Self {
        Self {
            pool: ConnectionPool::new(),
            channels,
            config,
        }
    }

    /// Registers an accepted session and subscribes it to `topic`.
    ///
    /// Returns the connection handle and the receiver its forwarder task
    /// drains. When the user is at the connection limit their oldest
    /// session is closed; a limit of 0 disables the check.
    pub fn register(
        &self,
        topic: Topic,
        viewer: Option<UserProfile>,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size.max(1));
        let handle = Arc::new(ConnectionHandle::new(topic, viewer, tx));

        let limit = self.config.max_connections_per_user;
        if let Some(user_id) = handle.user_id().filter(|_| limit > 0) {
            let existing = self.pool.user_connections(&user_id);
            if existing.len() >= limit {
                warn!(
                    user_id = %user_id,
                    count = existing.len(),
                    max = limit,
                    "User at max connections, closing oldest"
                );
                if let Some(oldest) = existing.first() {
                    self.unregister(&oldest.id);
                }
            }
        }

        self.pool.add(handle.clone());
        self.channels.subscribe(&topic, handle.clone());

        info!(
            conn_id = %handle.id,
            topic = %topic,
            user_id = ?handle.user_id(),
            "WebSocket connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a session and drops its subscriptions.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.close();
            self.channels.unsubscribe_all(*conn_id);

            info!(
                conn_id = %conn_id,
                topic = %handle.topic,
                "WebSocket connection unregistered"
            );
        }
    }

    /// Broadcasts an event to a topic.
    pub fn broadcast(&self, topic: &Topic, message: &OutboundMessage) -> usize {
        let sent = self.channels.broadcast(topic, message);
        debug!(topic = %topic, kind = message.kind(), sent, "Broadcast");
        sent
    }

    /// Broadcasts an event to the sessions of a topic that pass `filter`.
    pub fn broadcast_where(
        &self,
        topic: &Topic,
        message: &OutboundMessage,
        filter: impl Fn(&ConnectionHandle) -> bool,
    ) -> usize {
        let sent = self.channels.broadcast_where(topic, message, filter);
        debug!(topic = %topic, kind = message.kind(), sent, "Filtered broadcast");
        sent
    }

    /// Closes all connections.
    pub fn close_all(&self) {
        let all = self.pool.all_connections();
        for conn in &all {
            self.unregister(&conn.id);
        }
        info!(count = all.len(), "All connections closed");
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Returns the number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.pool.user_count()
    }

    /// Returns the number of topics with at least one subscriber.
    pub fn topic_count(&self) -> usize {
        self.channels.topic_count()
    }

    /// Checks if a user has any open session.
    pub fn is_user_connected(&self, user_id: &UserId) -> bool {
        !self.pool.user_connections(user_id).is_empty()
    }

    /// Heartbeat settings for session tasks.
    pub fn heartbeat(&self) -> HeartbeatConfig {
        HeartbeatConfig::from(&self.config)
    }

    /// Whether announcement pushes are filtered by target.
    pub fn filters_announcements(&self) -> bool {
        self.config.filter_announcements_at_push
    }
}

#[cfg(test)]
mod tests {
    use officehub_entity::UserRole;

    use super::*;

    fn viewer() -> UserProfile {
        UserProfile {
            id: UserId::new(),
            email: "kim@example.com".into(),
            first_name: "Kim".into(),
            last_name: "Ito".into(),
            role: UserRole::Employee,
            department: None,
            is_active: true,
            is_approved: true,
        }
    }

    fn manager(max_per_user: usize) -> ConnectionManager {
        let config = RealtimeConfig {
            max_connections_per_user: max_per_user,
            ..Default::default()
        };
        ConnectionManager::new(config, Arc::new(ChannelRegistry::new()))
    }

    #[test]
    fn test_register_and_unregister() {
        let mgr = manager(10);
        let user = viewer();
        let topic = Topic::User(user.id);

        let (handle, _rx) = mgr.register(topic, Some(user.clone()));
        assert_eq!(mgr.connection_count(), 1);
        assert!(mgr.is_user_connected(&user.id));
        assert_eq!(mgr.topic_count(), 1);

        mgr.unregister(&handle.id);
        assert_eq!(mgr.connection_count(), 0);
        assert!(!mgr.is_user_connected(&user.id));
        assert!(!handle.is_alive());
        assert_eq!(mgr.topic_count(), 0);
    }

    #[test]
    fn test_connection_limit_closes_oldest() {
        let mgr = manager(2);
        let user = viewer();
        let (first, _r1) = mgr.register(Topic::User(user.id), Some(user.clone()));
        let (_second, _r2) = mgr.register(Topic::Tasks(user.id), Some(user.clone()));
        let (_third, _r3) = mgr.register(Topic::Attendance(user.id), Some(user.clone()));

        assert!(!first.is_alive());
        assert_eq!(mgr.connection_count(), 2);
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        let mgr = manager(0);
        let user = viewer();
        let (first, _r1) = mgr.register(Topic::User(user.id), Some(user.clone()));
        let (second, _r2) = mgr.register(Topic::Tasks(user.id), Some(user.clone()));
        let (third, _r3) = mgr.register(Topic::Attendance(user.id), Some(user.clone()));

        assert!(first.is_alive());
        assert!(second.is_alive());
        assert!(third.is_alive());
        assert_eq!(mgr.connection_count(), 3);
    }

    #[test]
    fn test_anonymous_sessions_are_counted() {
        let mgr = manager(1);
        let (_a, _r1) = mgr.register(Topic::SystemAnnouncements, None);
        let (_b, _r2) = mgr.register(Topic::SystemAnnouncements, None);
        assert_eq!(mgr.connection_count(), 2);
        assert_eq!(mgr.user_count(), 0);
    }
}
