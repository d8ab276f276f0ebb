//! Message broker adapters.

#[cfg(feature = "amqp")]
mod amqp;
mod in_memory;

#[cfg(feature = "amqp")]
pub use amqp::AmqpBroker;
pub use in_memory::{InMemoryBroker, InMemoryBrokerHandle};
