//! RabbitMQ adapter built on lapin.

use crate::BrokerConfig;
use async_trait::async_trait;
use futures_util::StreamExt;
use gili_error::{BrokerError, BrokerErrorKind, GiliResult};
use gili_interface::{Delivery, MessageBroker};
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, BasicQosOptions,
    QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, Consumer};
use tracing::instrument;

/// Persistent delivery mode for dead-lettered copies.
const PERSISTENT: u8 = 2;

/// One connection, one channel, one consumer on the work queue.
pub struct AmqpBroker {
    connection: Connection,
    channel: Channel,
    consumer: Consumer,
    dead_letter_queue: String,
}

impl std::fmt::Debug for AmqpBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmqpBroker")
            .field("channel", &self.channel.id())
            .field("dead_letter_queue", &self.dead_letter_queue)
            .finish()
    }
}

impl AmqpBroker {
    /// Connect, declare both queues durable, set QoS and start consuming.
    #[instrument(skip(config), fields(queue = %config.queue, prefetch = config.prefetch))]
    pub async fn connect(config: &BrokerConfig) -> GiliResult<Self> {
        let connection = Connection::connect(&config.url, ConnectionProperties::default())
            .await
            .map_err(|e| BrokerError::new(BrokerErrorKind::Connection(e.to_string())))?;

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| BrokerError::new(BrokerErrorKind::Connection(e.to_string())))?;

        for queue in [&config.queue, &config.dead_letter_queue] {
            channel
                .queue_declare(
                    queue,
                    QueueDeclareOptions {
                        durable: true,
                        ..QueueDeclareOptions::default()
                    },
                    FieldTable::default(),
                )
                .await
                .map_err(|e| {
                    BrokerError::new(BrokerErrorKind::Declare {
                        queue: queue.clone(),
                        message: e.to_string(),
                    })
                })?;
        }

        channel
            .basic_qos(config.prefetch, BasicQosOptions::default())
            .await
            .map_err(|e| {
                BrokerError::new(BrokerErrorKind::Declare {
                    queue: config.queue.clone(),
                    message: e.to_string(),
                })
            })?;

        let consumer = channel
            .basic_consume(
                &config.queue,
                &config.consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| BrokerError::new(BrokerErrorKind::Consume(e.to_string())))?;

        tracing::info!("Connected to broker, listening on {}", config.queue);

        Ok(Self {
            connection,
            channel,
            consumer,
            dead_letter_queue: config.dead_letter_queue.clone(),
        })
    }

    /// Close the channel and the connection.
    pub async fn close(self) -> GiliResult<()> {
        self.channel
            .close(200, "worker shutdown")
            .await
            .map_err(|e| BrokerError::new(BrokerErrorKind::Connection(e.to_string())))?;
        self.connection
            .close(200, "worker shutdown")
            .await
            .map_err(|e| BrokerError::new(BrokerErrorKind::Connection(e.to_string())))?;
        Ok(())
    }
}

#[async_trait]
impl MessageBroker for AmqpBroker {
    async fn next_delivery(&mut self) -> GiliResult<Option<Delivery>> {
        match self.consumer.next().await {
            Some(Ok(delivery)) => Ok(Some(Delivery::new(delivery.delivery_tag, delivery.data))),
            Some(Err(e)) => Err(BrokerError::new(BrokerErrorKind::Consume(e.to_string())).into()),
            None => Ok(None),
        }
    }

    async fn ack(&self, delivery: &Delivery) -> GiliResult<()> {
        let tag = *delivery.tag();
        self.channel
            .basic_ack(tag, BasicAckOptions::default())
            .await
            .map_err(|e| {
                BrokerError::new(BrokerErrorKind::Ack {
                    tag,
                    message: e.to_string(),
                })
            })?;
        Ok(())
    }

    async fn publish_dead_letter(&self, body: &[u8]) -> GiliResult<()> {
        let publish_error = |e: lapin::Error| {
            BrokerError::new(BrokerErrorKind::Publish {
                queue: self.dead_letter_queue.clone(),
                message: e.to_string(),
            })
        };

        self.channel
            .basic_publish(
                "",
                &self.dead_letter_queue,
                BasicPublishOptions::default(),
                body,
                BasicProperties::default().with_delivery_mode(PERSISTENT),
            )
            .await
            .map_err(publish_error)?
            .await
            .map_err(publish_error)?;
        Ok(())
    }
}
