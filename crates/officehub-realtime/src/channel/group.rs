//! A single topic with its subscribers.

use std::sync::Arc;

use crate::connection::handle::{ConnectionHandle, ConnectionId};

/// Subscribers of one topic, in join order.
#[derive(Debug, Default)]
pub struct TopicGroup {
    members: Vec<Arc<ConnectionHandle>>,
}

impl TopicGroup {
    /// Adds a subscriber. Joining twice is a no-op.
    pub fn join(&mut self, handle: Arc<ConnectionHandle>) {
        if !self.members.iter().any(|m| m.id == handle.id) {
            self.members.push(handle);
        }
    }

    /// Removes a subscriber.
    pub fn leave(&mut self, conn_id: ConnectionId) {
        self.members.retain(|m| m.id != conn_id);
    }

    /// Drops subscribers whose session has closed.
    pub fn prune(&mut self) {
        self.members.retain(|m| m.is_alive());
    }

    /// Current subscribers.
    pub fn members(&self) -> &[Arc<ConnectionHandle>] {
        &self.members
    }

    /// Returns subscriber count.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the group has any subscribers.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
