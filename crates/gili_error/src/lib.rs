//! Error types for the Gili story evaluation worker.
//!
//! This crate provides the foundation error types used throughout the Gili workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use gili_error::{ConfigError, GiliResult};
//!
//! fn load_settings() -> GiliResult<String> {
//!     Err(ConfigError::new("missing [broker] section"))?
//! }
//!
//! match load_settings() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod broker;
mod builder;
mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod evaluation;
mod models;

pub use broker::{BrokerError, BrokerErrorKind};
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{GiliError, GiliErrorKind, GiliResult};
pub use evaluation::{EvaluationError, EvaluationErrorKind};
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
