//! Evaluation values produced by the pipeline.

use crate::StoryInput;
use serde::{Deserialize, Serialize};

/// Scores and coaching feedback for one story.
///
/// Built by the evaluator, normalized in place by post-validation, then
/// handed to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// How clearly the story is told (0-100)
    pub clarity_score: u8,
    /// Beginning/middle/end structure (0-100)
    pub structure_score: u8,
    /// Originality (0-100)
    pub creativity_score: u8,
    /// Emotional expression (0-100)
    pub expression_score: u8,
    /// Overall impression (0-100)
    pub overall_score: u8,
    /// Narrative feedback addressed to the student
    pub feedback_text: String,
    /// What the story does well, in order
    pub strengths: Vec<String>,
    /// Suggested improvements, in order
    pub improvements: Vec<String>,
}

impl Evaluation {
    /// All five scores in declaration order.
    pub fn scores(&self) -> [u8; 5] {
        [
            self.clarity_score,
            self.structure_score,
            self.creativity_score,
            self.expression_score,
            self.overall_score,
        ]
    }

    /// Mutable access to all five scores in declaration order.
    pub fn scores_mut(&mut self) -> [&mut u8; 5] {
        [
            &mut self.clarity_score,
            &mut self.structure_score,
            &mut self.creativity_score,
            &mut self.expression_score,
            &mut self.overall_score,
        ]
    }
}

/// What the evaluator produced for a valid story.
///
/// A degraded outcome still carries a usable evaluation (the length-based
/// fallback); the note explains why the reasoning result was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationOutcome {
    /// The reasoning capability answered with a well-formed evaluation
    Scored(Evaluation),
    /// The reasoning capability failed; a fallback was substituted
    Degraded {
        /// Fallback evaluation
        evaluation: Evaluation,
        /// Description of the failure
        note: String,
    },
}

impl EvaluationOutcome {
    /// Whether a fallback was substituted.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Borrow the evaluation regardless of how it was obtained.
    pub fn evaluation(&self) -> &Evaluation {
        match self {
            Self::Scored(evaluation) | Self::Degraded { evaluation, .. } => evaluation,
        }
    }

    /// Split into the evaluation and the optional failure note.
    pub fn into_parts(self) -> (Evaluation, Option<String>) {
        match self {
            Self::Scored(evaluation) => (evaluation, None),
            Self::Degraded { evaluation, note } => (evaluation, Some(note)),
        }
    }
}

/// Terminal output of the evaluation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// The story that was evaluated
    pub story: StoryInput,
    /// Whether the story passed validation
    pub is_valid: bool,
    /// Validation errors; empty iff `is_valid`
    pub validation_errors: Vec<String>,
    /// Coaching evaluation, or the zero-score skip result for invalid stories
    pub evaluation: Option<Evaluation>,
    /// Set when the reasoning call failed and a fallback was substituted
    pub error: Option<String>,
}

impl PipelineResult {
    /// Whether the result was produced by the skip path.
    pub fn is_skipped(&self) -> bool {
        !self.is_valid
    }

    /// The evaluation to persist, if this result should be persisted at all.
    ///
    /// Skip results are never persisted.
    pub fn persistable_evaluation(&self) -> Option<&Evaluation> {
        if self.is_valid {
            self.evaluation.as_ref()
        } else {
            None
        }
    }
}
