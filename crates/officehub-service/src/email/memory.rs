//! In-process transport that records messages instead of sending them.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::transport::{EmailError, EmailMessage, EmailTransport};

/// Records every accepted message. Can be told to fail the next `n`
/// deliveries.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    attempts: Arc<AtomicUsize>,
    failures_left: Arc<AtomicUsize>,
}

impl MemoryTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `n` calls to `send`.
    pub fn fail_next(&self, n: usize) {
        self.failures_left.store(n, Ordering::SeqCst);
    }

    /// Messages accepted so far.
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }

    /// Number of `send` calls, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailTransport for MemoryTransport {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(EmailError::Unavailable("connection refused".to_string()));
        }
        if message.to.is_empty() {
            return Err(EmailError::NoRecipients);
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}
