//! Channel-backed broker for tests and local runs.

use async_trait::async_trait;
use gili_error::{BrokerError, BrokerErrorKind, GiliResult};
use gili_interface::{Delivery, MessageBroker};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug, Default)]
struct Ledger {
    acked: Vec<u64>,
    dead_letters: Vec<Vec<u8>>,
    fail_dead_letter: bool,
    fail_ack: bool,
}

/// In-memory work queue with a dead-letter list.
///
/// Messages are published through the paired [`InMemoryBrokerHandle`].
#[derive(Debug)]
pub struct InMemoryBroker {
    receiver: mpsc::UnboundedReceiver<Delivery>,
    ledger: Arc<Mutex<Ledger>>,
    dead_letter_queue: String,
}

/// Publishing and inspection side of an [`InMemoryBroker`].
#[derive(Debug, Clone)]
pub struct InMemoryBrokerHandle {
    sender: Arc<Mutex<Option<mpsc::UnboundedSender<Delivery>>>>,
    ledger: Arc<Mutex<Ledger>>,
    next_tag: Arc<AtomicU64>,
}

impl InMemoryBroker {
    /// Create a broker and its handle.
    ///
    /// # Example
    /// ```
    /// use gili_interface::MessageBroker;
    /// use gili_worker::InMemoryBroker;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let (mut broker, handle) = InMemoryBroker::new("story_evaluation_dlq");
    /// handle.publish("story-1");
    /// handle.close();
    ///
    /// let delivery = broker.next_delivery().await.unwrap().unwrap();
    /// assert_eq!(delivery.story_id(), "story-1");
    /// assert!(broker.next_delivery().await.unwrap().is_none());
    /// # }
    /// ```
    pub fn new(dead_letter_queue: impl Into<String>) -> (Self, InMemoryBrokerHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let ledger = Arc::new(Mutex::new(Ledger::default()));
        let broker = Self {
            receiver,
            ledger: Arc::clone(&ledger),
            dead_letter_queue: dead_letter_queue.into(),
        };
        let handle = InMemoryBrokerHandle {
            sender: Arc::new(Mutex::new(Some(sender))),
            ledger,
            next_tag: Arc::new(AtomicU64::new(1)),
        };
        (broker, handle)
    }

    fn ledger(&self) -> Result<std::sync::MutexGuard<'_, Ledger>, BrokerError> {
        self.ledger
            .lock()
            .map_err(|e| BrokerError::new(BrokerErrorKind::Consume(e.to_string())))
    }
}

impl InMemoryBrokerHandle {
    /// Enqueue a message body. Returns its delivery tag, or `None` once closed.
    pub fn publish(&self, body: impl Into<Vec<u8>>) -> Option<u64> {
        let tag = self.next_tag.fetch_add(1, Ordering::SeqCst);
        let guard = self.sender.lock().ok()?;
        let sender = guard.as_ref()?;
        sender.send(Delivery::new(tag, body)).ok()?;
        Some(tag)
    }

    /// Stop accepting messages; the consumer ends after draining the queue.
    pub fn close(&self) {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
    }

    /// Tags acknowledged so far, in order.
    pub fn acked(&self) -> Vec<u64> {
        self.ledger
            .lock()
            .map(|ledger| ledger.acked.clone())
            .unwrap_or_default()
    }

    /// Bodies published to the dead-letter queue, in order.
    pub fn dead_letters(&self) -> Vec<Vec<u8>> {
        self.ledger
            .lock()
            .map(|ledger| ledger.dead_letters.clone())
            .unwrap_or_default()
    }

    /// Make dead-letter publishing fail.
    pub fn fail_dead_letters(&self, fail: bool) {
        if let Ok(mut ledger) = self.ledger.lock() {
            ledger.fail_dead_letter = fail;
        }
    }

    /// Make acknowledgements fail.
    pub fn fail_acks(&self, fail: bool) {
        if let Ok(mut ledger) = self.ledger.lock() {
            ledger.fail_ack = fail;
        }
    }
}

#[async_trait]
impl MessageBroker for InMemoryBroker {
    async fn next_delivery(&mut self) -> GiliResult<Option<Delivery>> {
        Ok(self.receiver.recv().await)
    }

    async fn ack(&self, delivery: &Delivery) -> GiliResult<()> {
        let mut ledger = self.ledger()?;
        if ledger.fail_ack {
            return Err(BrokerError::new(BrokerErrorKind::Ack {
                tag: *delivery.tag(),
                message: "simulated ack failure".to_string(),
            })
            .into());
        }
        ledger.acked.push(*delivery.tag());
        Ok(())
    }

    async fn publish_dead_letter(&self, body: &[u8]) -> GiliResult<()> {
        let mut ledger = self.ledger()?;
        if ledger.fail_dead_letter {
            return Err(BrokerError::new(BrokerErrorKind::Publish {
                queue: self.dead_letter_queue.clone(),
                message: "simulated publish failure".to_string(),
            })
            .into());
        }
        ledger.dead_letters.push(body.to_vec());
        Ok(())
    }
}
