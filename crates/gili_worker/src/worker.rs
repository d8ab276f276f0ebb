//! Queue consumer: one story per message, one message at a time.

use crate::update_skill_progress;
use gili_core::StoryStatus;
use gili_error::GiliResult;
use gili_interface::{Delivery, GiliDriver, MessageBroker, StoryRepository};
use gili_pipeline::Pipeline;
use std::future::Future;
use tracing::instrument;

/// How one delivery was handled. Every outcome is acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MessageOutcome {
    /// Feedback and skill progress persisted
    #[display("completed")]
    Completed,
    /// Story failed validation; marked failed without feedback
    #[display("rejected")]
    Rejected,
    /// No story with this identifier
    #[display("not found")]
    NotFound,
    /// Processing failed; the body was routed to the dead-letter queue
    #[display("dead-lettered: {}", reason)]
    DeadLettered {
        /// Failure description
        reason: String,
    },
}

/// Consumes story identifiers and persists their evaluations.
#[derive(Debug)]
pub struct Worker<D, R, B> {
    pipeline: Pipeline<D>,
    repository: R,
    broker: B,
}

impl<D, R, B> Worker<D, R, B>
where
    D: GiliDriver,
    R: StoryRepository,
    B: MessageBroker,
{
    /// Assemble a worker from its collaborators.
    pub fn new(pipeline: Pipeline<D>, repository: R, broker: B) -> Self {
        Self {
            pipeline,
            repository,
            broker,
        }
    }

    /// The story store.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The message broker.
    pub fn broker(&self) -> &B {
        &self.broker
    }

    /// Give back the broker, e.g. to close it.
    pub fn into_broker(self) -> B {
        self.broker
    }

    /// Consume until the queue closes or `shutdown` resolves.
    ///
    /// Shutdown is only observed between messages; a message in flight is
    /// always finished and acknowledged.
    ///
    /// # Errors
    ///
    /// Returns the broker error if receiving fails. Unacknowledged messages
    /// are redelivered by the broker.
    pub async fn run<F>(&mut self, shutdown: F) -> GiliResult<usize>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut handled = 0;

        loop {
            let delivery = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping consumer");
                    break;
                }
                delivery = self.broker.next_delivery() => delivery?,
            };

            let Some(delivery) = delivery else {
                tracing::info!("Consumer closed");
                break;
            };

            self.handle_delivery(&delivery).await;
            handled += 1;
        }

        Ok(handled)
    }

    /// Process one delivery, route failures to the dead-letter queue, and ack.
    #[instrument(skip(self, delivery), fields(tag = *delivery.tag(), story_id = %delivery.story_id()))]
    pub async fn handle_delivery(&self, delivery: &Delivery) -> MessageOutcome {
        let story_id = delivery.story_id();

        let outcome = match self.process(&story_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Story processing failed");
                self.dead_letter(&story_id, delivery).await;
                MessageOutcome::DeadLettered {
                    reason: e.to_string(),
                }
            }
        };

        // Ack unconditionally, even when the dead-letter publish failed.
        if let Err(e) = self.broker.ack(delivery).await {
            tracing::error!(error = %e, "Failed to acknowledge delivery");
        }

        tracing::info!(%outcome, "Message handled");
        outcome
    }

    async fn process(&self, story_id: &str) -> GiliResult<MessageOutcome> {
        if let Err(e) = self
            .repository
            .set_status(story_id, StoryStatus::Processing)
            .await
        {
            tracing::warn!(error = %e, "Could not mark story processing");
        }

        let Some(story) = self.repository.load_story(story_id).await? else {
            tracing::warn!("Story not found");
            return Ok(MessageOutcome::NotFound);
        };

        let user_id = story.user_id().clone();
        let result = self.pipeline.run(story).await;

        if let Some(note) = &result.error {
            tracing::warn!(note = %note, "Evaluation degraded to fallback");
        }

        match result.persistable_evaluation() {
            Some(evaluation) => {
                self.repository.upsert_feedback(story_id, evaluation).await?;
                update_skill_progress(&self.repository, &user_id, evaluation).await?;
                self.repository
                    .set_status(story_id, StoryStatus::Completed)
                    .await?;
                Ok(MessageOutcome::Completed)
            }
            None => {
                tracing::info!(errors = ?result.validation_errors, "Story rejected");
                self.repository
                    .set_status(story_id, StoryStatus::Failed)
                    .await?;
                Ok(MessageOutcome::Rejected)
            }
        }
    }

    async fn dead_letter(&self, story_id: &str, delivery: &Delivery) {
        if let Err(e) = self
            .repository
            .set_status(story_id, StoryStatus::Failed)
            .await
        {
            tracing::warn!(error = %e, "Could not mark story failed");
        }

        if let Err(e) = self.broker.publish_dead_letter(delivery.body()).await {
            tracing::error!(error = %e, "Failed to publish to dead-letter queue");
        }
    }
}
