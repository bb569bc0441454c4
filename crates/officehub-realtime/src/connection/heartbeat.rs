//! Ping/pong heartbeat for WebSocket keepalive.

use std::time::Duration;

use officehub_core::config::RealtimeConfig;

use super::handle::ConnectionHandle;

/// Heartbeat configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Interval between pings
    pub ping_interval: Duration,
    /// Silence after which the session is closed
    pub idle_timeout: Duration,
}

impl From<&RealtimeConfig> for HeartbeatConfig {
    fn from(config: &RealtimeConfig) -> Self {
        Self {
            ping_interval: Duration::from_secs(config.heartbeat_interval_seconds.max(1)),
            idle_timeout: Duration::from_secs(config.heartbeat_timeout_seconds.max(1)),
        }
    }
}

/// What the forwarder should do on a heartbeat tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    /// Send a protocol ping.
    Ping,
    /// The client went silent; close the session.
    Expired,
}

impl HeartbeatConfig {
    /// Decide the action for `handle` on a tick.
    ///
    /// Any inbound frame, pongs included, refreshes the handle's activity
    /// stamp.
    pub fn check(&self, handle: &ConnectionHandle) -> Beat {
        let idle = handle.idle_for();
        if idle > self.idle_timeout {
            tracing::warn!(
                conn_id = %handle.id,
                idle_secs = idle.as_secs(),
                "Heartbeat timeout"
            );
            Beat::Expired
        } else {
            Beat::Ping
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::channel::Topic;

    #[test]
    fn test_from_config() {
        let hb = HeartbeatConfig::from(&RealtimeConfig::default());
        assert_eq!(hb.ping_interval, Duration::from_secs(30));
        assert_eq!(hb.idle_timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_fresh_connection_gets_ping() {
        let (tx, _rx) = mpsc::channel(1);
        let handle = ConnectionHandle::new(Topic::SystemAnnouncements, None, tx);
        let hb = HeartbeatConfig {
            ping_interval: Duration::from_secs(1),
            idle_timeout: Duration::from_secs(60),
        };
        assert_eq!(hb.check(&handle), Beat::Ping);
    }

    #[test]
    fn test_zero_timeout_expires() {
        let (tx, _rx) = mpsc::channel(1);
        let handle = ConnectionHandle::new(Topic::SystemAnnouncements, None, tx);
        let hb = HeartbeatConfig {
            ping_interval: Duration::from_secs(1),
            idle_timeout: Duration::ZERO,
        };
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(hb.check(&handle), Beat::Expired);
    }
}
