//! Queue worker for the Gili story evaluation service.
//!
//! The worker takes story identifiers off a durable queue, evaluates each
//! story through [`gili_pipeline::Pipeline`], and persists the feedback and
//! the author's skill progress. Failures are routed to a dead-letter queue;
//! every message is acknowledged exactly once.
//!
//! # Features
//!
//! - `amqp` (default): RabbitMQ adapter built on lapin
//! - `otel`: export spans to stdout through OpenTelemetry

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod broker;
mod config;
mod observability;
mod skill_progress;
mod worker;

#[cfg(feature = "amqp")]
pub use broker::AmqpBroker;
pub use broker::{InMemoryBroker, InMemoryBrokerHandle};
pub use config::{BrokerConfig, DatabaseConfig, GiliConfig, ModelConfig, ObservabilitySettings};
pub use observability::{ObservabilityConfig, init_observability};
pub use skill_progress::update_skill_progress;
pub use worker::{MessageOutcome, Worker};
