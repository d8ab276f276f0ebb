//! Database connection utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use gili_error::{DatabaseError, DatabaseErrorKind};
use uuid::Uuid;

/// Establish a connection to the PostgreSQL database at `database_url`.
///
/// # Errors
///
/// Returns a connection error if the database cannot be reached.
pub fn establish_connection(database_url: &str) -> DatabaseResult<PgConnection> {
    PgConnection::establish(database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Parse a textual identifier into a store key.
///
/// # Examples
///
/// ```
/// use gili_database::parse_id;
///
/// assert!(parse_id("7f1b3c9e-2a4d-4e8f-9b6a-1c2d3e4f5a6b").is_ok());
/// assert!(parse_id("not-a-uuid").is_err());
/// ```
#[track_caller]
pub fn parse_id(id: &str) -> DatabaseResult<Uuid> {
    Uuid::parse_str(id)
        .map_err(|_| DatabaseError::new(DatabaseErrorKind::InvalidIdentifier(id.to_string())))
}
