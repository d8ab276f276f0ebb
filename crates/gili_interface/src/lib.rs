//! Trait definitions for the Gili story evaluation worker.
//!
//! The pipeline and the worker are written against these seams: a reasoning
//! capability, a story store and a message broker. Production adapters and
//! in-memory doubles live in the downstream crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod broker;
mod driver;
mod repository;

pub use broker::{Delivery, MessageBroker};
pub use driver::GiliDriver;
pub use repository::StoryRepository;
