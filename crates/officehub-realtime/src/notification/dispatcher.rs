//! Delivery dispatcher: gates each channel on the recipient's preferences
//! and hands allowed notifications to email or the real-time fan-out.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use officehub_core::error::AppError;
use officehub_core::types::UserId;
use officehub_database::UserDirectory;
use officehub_entity::{DeliveryChannel, NewNotification, Notification};
use officehub_service::{Mailer, NotificationService, PreferenceService};

use crate::channel::Topic;
use crate::connection::ConnectionManager;
use crate::message::{OutboundMessage, builder};

use super::quiet;

/// Routes persisted notifications to their delivery channels.
///
/// Every failure past preference resolution is logged and reported as
/// `false`; nothing propagates to the caller.
pub struct NotificationDispatcher {
    connections: Arc<ConnectionManager>,
    notifications: Arc<NotificationService>,
    preferences: Arc<PreferenceService>,
    users: Arc<dyn UserDirectory>,
    mailer: Mailer,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("email_enabled", &self.mailer.is_enabled())
            .finish()
    }
}

impl NotificationDispatcher {
    /// Create a new dispatcher
    pub fn new(
        connections: Arc<ConnectionManager>,
        notifications: Arc<NotificationService>,
        preferences: Arc<PreferenceService>,
        users: Arc<dyn UserDirectory>,
        mailer: Mailer,
    ) -> Self {
        Self {
            connections,
            notifications,
            preferences,
            users,
            mailer,
        }
    }

    /// The notification service backing this dispatcher.
    pub fn notifications(&self) -> &Arc<NotificationService> {
        &self.notifications
    }

    /// Deliver `notification` over `channel` if the recipient allows it.
    ///
    /// Returns `true` when the notification was handed to the channel and
    /// `false` when it was suppressed or the channel failed.
    pub async fn dispatch(&self, notification: &Notification, channel: DeliveryChannel) -> bool {
        let preference = self.preferences.resolve(notification.recipient_id).await;

        if !preference.should_deliver(notification.category, channel) {
            debug!(
                notification_id = %notification.id,
                channel = %channel,
                category = %notification.category,
                "Suppressed by preferences"
            );
            return false;
        }

        let config = self.notifications.config();
        if config.enforce_quiet_hours
            && quiet::suppresses(&preference, channel, Utc::now(), config.timezone_offset_minutes)
        {
            debug!(
                notification_id = %notification.id,
                channel = %channel,
                "Suppressed by quiet hours"
            );
            return false;
        }

        match channel {
            DeliveryChannel::Email => self.send_email(notification).await,
            DeliveryChannel::Push | DeliveryChannel::InApp => self.push(notification).await,
        }
    }

    /// Post-creation delivery: in-app always, email when configured.
    pub async fn deliver_new(&self, notification: &Notification) -> bool {
        let mut delivered = self.dispatch(notification, DeliveryChannel::InApp).await;
        if self.notifications.config().email_on_create {
            delivered |= self.dispatch(notification, DeliveryChannel::Email).await;
        }
        delivered
    }

    /// Persist a notification and deliver it.
    pub async fn publish(&self, input: NewNotification) -> Result<Notification, AppError> {
        let notification = self.notifications.create(input).await?;
        self.deliver_new(&notification).await;
        Ok(notification)
    }

    /// Deliver notifications that were already persisted.
    pub async fn deliver_all(&self, notifications: &[Notification]) {
        for n in notifications {
            self.deliver_new(n).await;
        }
    }

    /// Push the user's current unread count to their notification topic.
    pub async fn push_unread_count(&self, user_id: UserId) {
        match self.notifications.unread_count(user_id).await {
            Ok(count) => {
                self.connections
                    .broadcast(&Topic::User(user_id), &OutboundMessage::UnreadCount { count });
            }
            Err(e) => warn!(user_id = %user_id, error = %e, "Failed to count unread notifications"),
        }
    }

    async fn push(&self, notification: &Notification) -> bool {
        let topic = Topic::User(notification.recipient_id);
        self.connections
            .broadcast(&topic, &builder::new_notification(notification));
        self.push_unread_count(notification.recipient_id).await;
        true
    }

    async fn send_email(&self, notification: &Notification) -> bool {
        if !self.mailer.is_enabled() {
            debug!(notification_id = %notification.id, "Email transport not configured");
            return false;
        }

        let recipient = match self.users.find_by_id(notification.recipient_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(
                    notification_id = %notification.id,
                    recipient_id = %notification.recipient_id,
                    "Email recipient not found"
                );
                return false;
            }
            Err(e) => {
                warn!(notification_id = %notification.id, error = %e, "Recipient lookup failed");
                return false;
            }
        };

        if let Err(e) = self.mailer.send_notification(notification, &recipient).await {
            warn!(
                notification_id = %notification.id,
                to = %recipient.email,
                error = %e,
                "Failed to send notification email"
            );
            return false;
        }

        if let Err(e) = self.notifications.mark_sent(notification.id).await {
            warn!(notification_id = %notification.id, error = %e, "Failed to mark notification sent");
        }
        info!(notification_id = %notification.id, to = %recipient.email, "Notification emailed");
        true
    }
}
