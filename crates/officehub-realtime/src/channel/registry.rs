//! Topic registry: group membership and fan-out.

use std::sync::Arc;

use dashmap::DashMap;

use crate::connection::handle::{ConnectionHandle, ConnectionId};
use crate::message::OutboundMessage;

use super::group::TopicGroup;
use super::subscription::SubscriptionTracker;
use super::topic::Topic;

/// Registry of all active topics.
///
/// A broadcast holds its topic's entry exclusively while it queues the
/// event for every subscriber, so all subscribers of a topic observe
/// broadcasts in the same order. Nothing is ordered across topics.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    /// Topic name → subscribers.
    topics: DashMap<String, TopicGroup>,
    /// Subscription tracker (reverse index).
    subscriptions: SubscriptionTracker,
}

impl ChannelRegistry {
    /// Creates a new topic registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a connection to a topic.
    pub fn subscribe(&self, topic: &Topic, handle: Arc<ConnectionHandle>) {
        let name = topic.name();
        let conn_id = handle.id;
        self.topics.entry(name.clone()).or_default().join(handle);
        self.subscriptions.add(conn_id, name);
    }

    /// Unsubscribes a connection from all topics.
    pub fn unsubscribe_all(&self, conn_id: ConnectionId) {
        for name in self.subscriptions.remove_all(conn_id) {
            self.leave(&name, conn_id);
        }
    }

    fn leave(&self, name: &str, conn_id: ConnectionId) {
        if let Some(mut group) = self.topics.get_mut(name) {
            group.leave(conn_id);
            if group.is_empty() {
                drop(group);
                self.topics.remove_if(name, |_, g| g.is_empty());
            }
        }
    }

    /// Queues `message` for every subscriber of `topic`.
    ///
    /// Returns the number of sessions the event was queued for.
    pub fn broadcast(&self, topic: &Topic, message: &OutboundMessage) -> usize {
        self.broadcast_where(topic, message, |_| true)
    }

    /// Like [`broadcast`](Self::broadcast), skipping sessions for which
    /// `filter` returns false.
    pub fn broadcast_where(
        &self,
        topic: &Topic,
        message: &OutboundMessage,
        filter: impl Fn(&ConnectionHandle) -> bool,
    ) -> usize {
        let Some(mut group) = self.topics.get_mut(&topic.name()) else {
            return 0;
        };
        group.prune();

        let mut delivered = 0;
        for member in group.members() {
            if filter(member) && member.send(message.clone()) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Returns the subscription count for a connection.
    pub fn subscription_count(&self, conn_id: ConnectionId) -> usize {
        self.subscriptions.count(conn_id)
    }

    /// Returns subscriber count for a topic.
    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.topics
            .get(&topic.name())
            .map(|g| g.len())
            .unwrap_or(0)
    }

    /// Returns total number of active topics.
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}
