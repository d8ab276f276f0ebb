//! Message broker seam.

use async_trait::async_trait;
use derive_getters::Getters;
use gili_error::GiliResult;
use serde::{Deserialize, Serialize};

/// One message taken from the work queue, not yet acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Delivery {
    /// Broker-assigned tag used for acknowledgement
    tag: u64,
    /// Raw message body
    body: Vec<u8>,
}

impl Delivery {
    /// Wrap a received message.
    pub fn new(tag: u64, body: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            body: body.into(),
        }
    }

    /// Body decoded as a story identifier: lossy UTF-8, surrounding whitespace trimmed.
    pub fn story_id(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_string()
    }
}

/// At-least-once work queue with a dead-letter queue.
#[async_trait]
pub trait MessageBroker: Send + Sync {
    /// Wait for the next delivery. `Ok(None)` means the consumer closed.
    async fn next_delivery(&mut self) -> GiliResult<Option<Delivery>>;

    /// Acknowledge a delivery so it is never redelivered.
    async fn ack(&self, delivery: &Delivery) -> GiliResult<()>;

    /// Publish a copy of `body` to the dead-letter queue.
    async fn publish_dead_letter(&self, body: &[u8]) -> GiliResult<()>;
}
