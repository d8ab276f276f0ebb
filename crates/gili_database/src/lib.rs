//! PostgreSQL integration for the Gili story evaluation worker.
//!
//! This crate provides the schema the worker touches, row models, and two
//! [`StoryRepository`](gili_interface::StoryRepository) implementations:
//! a diesel-backed PostgreSQL repository and an in-memory one for tests and
//! local runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use gili_database::{establish_connection, PostgresStoryRepository};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = establish_connection("postgres://localhost/gili")?;
//! let repo = PostgresStoryRepository::new(conn);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod in_memory_repository;
mod models;
mod story_repository;

/// Diesel table definitions.
#[allow(missing_docs)]
pub mod schema;

pub use connection::{establish_connection, parse_id};
pub use in_memory_repository::{InMemoryStoryRepository, StoreOperation};
pub use models::{NewStoryFeedbackRow, SkillProgressRow, StoryRow};
pub use story_repository::PostgresStoryRepository;

use gili_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
