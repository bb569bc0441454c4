//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use uuid::Uuid;

use officehub_core::types::UserId;
use officehub_entity::UserProfile;

use crate::channel::Topic;
use crate::message::OutboundMessage;

/// Unique connection identifier
pub type ConnectionId = Uuid;

/// A handle to a single WebSocket session.
///
/// Holds the bounded sender feeding the session's forwarder task, the
/// topic the session joined, and the resolved user when there is one.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Topic the session is subscribed to
    pub topic: Topic,
    /// The connected user; `None` for anonymous system sessions
    pub viewer: Option<UserProfile>,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<OutboundMessage>,
    last_seen_ms: AtomicI64,
    closed: CancellationToken,
}

impl ConnectionHandle {
    /// Create a new connection handle
    pub fn new(
        topic: Topic,
        viewer: Option<UserProfile>,
        sender: mpsc::Sender<OutboundMessage>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            topic,
            viewer,
            connected_at: now,
            sender,
            last_seen_ms: AtomicI64::new(now.timestamp_millis()),
            closed: CancellationToken::new(),
        }
    }

    /// ID of the connected user, if any.
    pub fn user_id(&self) -> Option<UserId> {
        self.viewer.as_ref().map(|u| u.id)
    }

    /// Queue an event for this session without waiting.
    ///
    /// A full queue drops the event for this session only.
    pub fn send(&self, msg: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(msg)) => {
                tracing::warn!(
                    conn_id = %self.id,
                    topic = %self.topic,
                    kind = msg.kind(),
                    "Send buffer full, dropping message"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.close();
                false
            }
        }
    }

    /// Whether the session is still open.
    pub fn is_alive(&self) -> bool {
        !self.closed.is_cancelled()
    }

    /// Mark the session closed; its tasks observe this through [`closed`].
    ///
    /// [`closed`]: Self::closed
    pub fn close(&self) {
        self.closed.cancel();
    }

    /// Resolves once the session has been closed.
    pub fn closed(&self) -> WaitForCancellationFuture<'_> {
        self.closed.cancelled()
    }

    /// Record client activity.
    pub fn touch(&self) {
        self.last_seen_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// Time since the client was last heard from.
    pub fn idle_for(&self) -> Duration {
        let elapsed = Utc::now().timestamp_millis() - self.last_seen_ms.load(Ordering::Relaxed);
        Duration::from_millis(elapsed.max(0) as u64)
    }

    /// Snapshot of connection info.
    pub fn info(&self) -> ConnectionInfo {
        ConnectionInfo {
            id: self.id,
            topic: self.topic.name(),
            user_id: self.user_id(),
            connected_at: self.connected_at,
            alive: self.is_alive(),
        }
    }
}

/// Snapshot of connection info (serializable)
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionInfo {
    /// Connection ID
    pub id: ConnectionId,
    /// Topic name
    pub topic: String,
    /// User ID
    pub user_id: Option<UserId>,
    /// Connected at
    pub connected_at: DateTime<Utc>,
    /// Is alive
    pub alive: bool,
}
