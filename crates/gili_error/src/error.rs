//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{BrokerError, BuilderError, ConfigError, EvaluationError, ModelsError};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use gili_error::{BrokerError, BrokerErrorKind, GiliError};
///
/// let broker_err = BrokerError::new(BrokerErrorKind::Consume("stream reset".to_string()));
/// let err: GiliError = broker_err.into();
/// assert!(format!("{}", err).contains("stream reset"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GiliErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Model provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Evaluation parsing error
    #[from(EvaluationError)]
    Evaluation(EvaluationError),
    /// Message broker error
    #[from(BrokerError)]
    Broker(BrokerError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Gili error with kind discrimination.
///
/// # Examples
///
/// ```
/// use gili_error::{ConfigError, GiliResult};
///
/// fn might_fail() -> GiliResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Gili Error: {}", _0)]
pub struct GiliError(Box<GiliErrorKind>);

impl GiliError {
    /// Create a new error from a kind.
    pub fn new(kind: GiliErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GiliErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to GiliErrorKind
impl<T> From<T> for GiliError
where
    T: Into<GiliErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Gili operations.
pub type GiliResult<T> = std::result::Result<T, GiliError>;
