//! Message broker error types.

/// Broker error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BrokerErrorKind {
    /// Could not connect or open a channel
    #[display("Broker connection error: {}", _0)]
    Connection(String),
    /// Queue declaration or QoS setup failed
    #[display("Failed to declare queue '{}': {}", queue, message)]
    Declare {
        /// Queue name
        queue: String,
        /// Underlying error
        message: String,
    },
    /// Receiving a delivery failed
    #[display("Failed to consume: {}", _0)]
    Consume(String),
    /// Acknowledging a delivery failed
    #[display("Failed to acknowledge delivery {}: {}", tag, message)]
    Ack {
        /// Delivery tag
        tag: u64,
        /// Underlying error
        message: String,
    },
    /// Publishing failed
    #[display("Failed to publish to '{}': {}", queue, message)]
    Publish {
        /// Destination queue
        queue: String,
        /// Underlying error
        message: String,
    },
}

/// Broker error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Broker Error: {} at line {} in {}", kind, line, file)]
pub struct BrokerError {
    /// The specific error condition
    pub kind: BrokerErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl BrokerError {
    /// Create a new BrokerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BrokerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
