//! Errors raised while turning a model response into an evaluation.
//!
//! These never escape the evaluator: they are rendered into the note carried
//! by a degraded outcome.

/// Specific evaluation failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EvaluationErrorKind {
    /// Response did not contain a fenced code block
    #[display("No fenced code block found in response (length: {})", _0)]
    NoCodeBlock(usize),

    /// Fenced block was not a valid evaluation document
    #[display("Invalid evaluation JSON: {}", _0)]
    InvalidJson(String),

    /// A score was outside 0..=100
    #[display("Score '{}' out of range: {}", field, value)]
    ScoreOutOfRange {
        /// Name of the offending score field
        field: String,
        /// Value the model produced
        value: i64,
    },

    /// The reasoning call did not answer in time
    #[display("Reasoning call timed out after {}s", _0)]
    Timeout(u64),
}

/// Evaluation error with location tracking.
///
/// # Examples
///
/// ```
/// use gili_error::{EvaluationError, EvaluationErrorKind};
///
/// let err = EvaluationError::new(EvaluationErrorKind::NoCodeBlock(42));
/// assert!(format!("{}", err).contains("No fenced code block"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Evaluation Error: {} at line {} in {}", kind, line, file)]
pub struct EvaluationError {
    /// The specific error condition
    pub kind: EvaluationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl EvaluationError {
    /// Create a new EvaluationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: EvaluationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
