//! Pipeline orchestration: validate, then evaluate or skip.

use crate::{Evaluator, EvaluatorConfig, post_validate, validate};
use gili_core::{Evaluation, PipelineResult, StoryInput};
use gili_interface::GiliDriver;
use tracing::instrument;

/// Pipeline stages. Transitions only move forward:
/// `Validating -> {Evaluating, Skipping}`, `Evaluating -> PostValidating`,
/// and `{PostValidating, Skipping} -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Stage {
    /// Running the rule-based gate
    Validating,
    /// Asking the reasoning capability
    Evaluating,
    /// Building the zero-score result for invalid input
    Skipping,
    /// Normalizing the evaluation
    PostValidating,
    /// Terminal
    Done,
}

/// Zero-score evaluation reported for a story that failed validation.
///
/// # Examples
///
/// ```
/// use gili_pipeline::skip_evaluation;
///
/// let evaluation = skip_evaluation(&["too short".to_string()]);
/// assert_eq!(evaluation.overall_score, 0);
/// assert_eq!(evaluation.feedback_text, "Story could not be evaluated: too short");
/// assert!(evaluation.strengths.is_empty());
/// ```
pub fn skip_evaluation(errors: &[String]) -> Evaluation {
    Evaluation {
        clarity_score: 0,
        structure_score: 0,
        creativity_score: 0,
        expression_score: 0,
        overall_score: 0,
        feedback_text: format!("Story could not be evaluated: {}", errors.join(", ")),
        strengths: Vec::new(),
        improvements: errors.to_vec(),
    }
}

/// Runs stories through the evaluation stages.
#[derive(Debug)]
pub struct Pipeline<D> {
    evaluator: Evaluator<D>,
}

impl<D: GiliDriver> Pipeline<D> {
    /// Create a pipeline around a reasoning driver.
    pub fn new(driver: D, config: &EvaluatorConfig) -> Self {
        Self {
            evaluator: Evaluator::new(driver, config),
        }
    }

    /// The evaluator stage.
    pub fn evaluator(&self) -> &Evaluator<D> {
        &self.evaluator
    }

    /// Evaluate one story. Always produces a result.
    #[instrument(skip(self, story), fields(story_id = %story.story_id(), user_id = %story.user_id()))]
    pub async fn run(&self, story: StoryInput) -> PipelineResult {
        let mut result = PipelineResult {
            story,
            is_valid: false,
            validation_errors: Vec::new(),
            evaluation: None,
            error: None,
        };
        let mut stage = Stage::Validating;

        while stage != Stage::Done {
            tracing::debug!(%stage, "Entering stage");
            stage = match stage {
                Stage::Validating => {
                    let validation = validate(result.story.content());
                    result.is_valid = validation.is_valid();
                    result.validation_errors = validation.errors();
                    if result.is_valid {
                        Stage::Evaluating
                    } else {
                        tracing::info!(
                            errors = ?result.validation_errors,
                            "Story failed validation"
                        );
                        Stage::Skipping
                    }
                }
                Stage::Evaluating => {
                    let outcome = self.evaluator.evaluate(&result.story).await;
                    tracing::debug!(
                        degraded = outcome.is_degraded(),
                        overall = outcome.evaluation().overall_score,
                        "Evaluation finished"
                    );
                    let (evaluation, note) = outcome.into_parts();
                    result.evaluation = Some(evaluation);
                    result.error = note;
                    Stage::PostValidating
                }
                Stage::PostValidating => {
                    if let Some(evaluation) = result.evaluation.as_mut() {
                        post_validate(evaluation);
                    }
                    Stage::Done
                }
                Stage::Skipping => {
                    result.evaluation = Some(skip_evaluation(&result.validation_errors));
                    Stage::Done
                }
                Stage::Done => Stage::Done,
            };
        }

        result
    }
}
