//! Session protocol: initial state on connect and inbound commands.

use std::sync::Arc;

use tracing::{debug, warn};

use officehub_core::types::{NotificationId, UserId};

use crate::channel::Topic;
use crate::connection::ConnectionHandle;
use crate::notification::NotificationDispatcher;

use super::builder;
use super::types::{InboundMessage, OutboundMessage, parse_inbound};

const NOT_FOUND: &str = "Notification not found";

/// Handles frames received from sessions.
///
/// Only the notification topic accepts commands; frames on other topics
/// refresh the heartbeat and are otherwise ignored.
#[derive(Debug, Clone)]
pub struct InboundHandler {
    dispatcher: Arc<NotificationDispatcher>,
}

impl InboundHandler {
    /// Creates a new handler.
    pub fn new(dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Push the initial state of a freshly accepted session.
    pub async fn on_connect(&self, handle: &ConnectionHandle) {
        let Topic::User(user_id) = handle.topic else {
            return;
        };
        match self.dispatcher.notifications().unread_count(user_id).await {
            Ok(count) => {
                handle.send(OutboundMessage::UnreadCount { count });
            }
            Err(e) => warn!(conn_id = %handle.id, error = %e, "Failed to load unread count"),
        }
    }

    /// Process one text frame.
    pub async fn handle(&self, handle: &ConnectionHandle, raw: &str) {
        handle.touch();

        let Topic::User(user_id) = handle.topic else {
            debug!(conn_id = %handle.id, topic = %handle.topic, "Ignoring inbound frame");
            return;
        };

        match parse_inbound(raw) {
            Ok(Some(InboundMessage::MarkRead { notification_id })) => {
                self.mark_read(handle, user_id, notification_id).await;
            }
            Ok(Some(InboundMessage::GetNotifications {})) => {
                self.get_notifications(handle, user_id).await;
            }
            Ok(None) => debug!(conn_id = %handle.id, "Ignoring unknown command"),
            Err(e) => {
                handle.send(OutboundMessage::error(e.to_string()));
            }
        }
    }

    async fn mark_read(&self, handle: &ConnectionHandle, user_id: UserId, id: NotificationId) {
        match self.dispatcher.notifications().mark_read(user_id, id).await {
            Ok(_) => self.dispatcher.push_unread_count(user_id).await,
            Err(e) if e.is_not_found() => {
                handle.send(OutboundMessage::error(NOT_FOUND));
            }
            Err(e) => {
                warn!(conn_id = %handle.id, notification_id = %id, error = %e, "Mark read failed");
                handle.send(OutboundMessage::error("Failed to mark notification as read"));
            }
        }
    }

    async fn get_notifications(&self, handle: &ConnectionHandle, user_id: UserId) {
        match self.dispatcher.notifications().recent(user_id, None).await {
            Ok(recent) => {
                handle.send(builder::notifications_list(&recent));
            }
            Err(e) => {
                warn!(conn_id = %handle.id, error = %e, "Failed to load notifications");
                handle.send(OutboundMessage::error("Failed to load notifications"));
            }
        }
    }
}
