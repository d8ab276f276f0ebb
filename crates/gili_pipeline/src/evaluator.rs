//! Reasoning-backed evaluation with a deterministic fallback.

use crate::{SYSTEM_PROMPT, evaluation_prompt, parse_evaluation};
use derive_builder::Builder;
use derive_getters::Getters;
use gili_core::{Evaluation, EvaluationOutcome, GenerateRequest, Message, StoryInput};
use gili_error::{EvaluationError, EvaluationErrorKind, GiliResult};
use gili_interface::GiliDriver;
use std::time::Duration;
use tracing::instrument;

/// Request parameters for the reasoning call.
///
/// # Examples
///
/// ```
/// use gili_pipeline::EvaluatorConfig;
/// use std::time::Duration;
///
/// let config = EvaluatorConfig::builder()
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(*config.temperature(), 0.7);
/// assert_eq!(*config.timeout(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Builder)]
#[builder(setter(into))]
pub struct EvaluatorConfig {
    /// Sampling temperature
    #[builder(default = "0.7")]
    temperature: f32,
    /// Completion token limit
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Model override; the driver's model is used when unset
    #[builder(default)]
    model: Option<String>,
    /// Deadline for one reasoning call
    #[builder(default = "Duration::from_secs(30)")]
    timeout: Duration,
}

impl EvaluatorConfig {
    /// Start building a configuration.
    pub fn builder() -> EvaluatorConfigBuilder {
        EvaluatorConfigBuilder::default()
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
            model: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Length-only heuristic used whenever the reasoning call fails.
///
/// # Examples
///
/// ```
/// use gili_pipeline::fallback_evaluation;
///
/// let evaluation = fallback_evaluation(&"x".repeat(150));
/// assert_eq!(evaluation.clarity_score, 70);
/// assert_eq!(evaluation.structure_score, 65);
/// ```
pub fn fallback_evaluation(content: &str) -> Evaluation {
    let length = content.chars().count();

    let mut base: u8 = 60;
    if length > 100 {
        base += 10;
    }
    if length > 300 {
        base += 10;
    }

    Evaluation {
        clarity_score: base,
        structure_score: base - 5,
        creativity_score: base,
        expression_score: base - 5,
        overall_score: base,
        feedback_text: "Thank you for sharing your story! You were brave enough to tell it, \
                        and that is wonderful. Keep practicing!"
            .to_string(),
        strengths: vec![
            "Brave enough to tell a story".to_string(),
            "Made an effort to share ideas".to_string(),
        ],
        improvements: vec![
            "Try adding more detail".to_string(),
            "Describe your feelings in the story".to_string(),
        ],
    }
}

/// Asks the reasoning capability to evaluate valid stories.
#[derive(Debug)]
pub struct Evaluator<D> {
    driver: D,
    config: EvaluatorConfig,
}

impl<D: GiliDriver> Evaluator<D> {
    /// Create an evaluator that sends requests through `driver`.
    pub fn new(driver: D, config: &EvaluatorConfig) -> Self {
        Self {
            driver,
            config: config.clone(),
        }
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Evaluate a story that already passed validation.
    ///
    /// Never fails: any transport, timeout or parse failure yields a
    /// degraded outcome carrying the fallback and a description.
    #[instrument(
        skip(self, story),
        fields(
            story_id = %story.story_id(),
            age_level = %story.age_level(),
            model = %self.driver.model_name(),
        )
    )]
    pub async fn evaluate(&self, story: &StoryInput) -> EvaluationOutcome {
        match self.request_evaluation(story).await {
            Ok(evaluation) => {
                tracing::debug!(overall = evaluation.overall_score, "Evaluation parsed");
                EvaluationOutcome::Scored(evaluation)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reasoning call failed, using fallback evaluation");
                EvaluationOutcome::Degraded {
                    evaluation: fallback_evaluation(story.content()),
                    note: e.to_string(),
                }
            }
        }
    }

    fn request(&self, story: &StoryInput) -> GenerateRequest {
        GenerateRequest::builder()
            .messages(vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(evaluation_prompt(story)),
            ])
            .temperature(Some(self.config.temperature))
            .max_tokens(self.config.max_tokens)
            .model(self.config.model.clone())
            .build()
            .unwrap_or_default()
    }

    async fn request_evaluation(&self, story: &StoryInput) -> GiliResult<Evaluation> {
        let request = self.request(story);
        let timeout = self.config.timeout;

        let response = tokio::time::timeout(timeout, self.driver.generate(&request))
            .await
            .map_err(|_| EvaluationError::new(EvaluationErrorKind::Timeout(timeout.as_secs())))??;

        Ok(parse_evaluation(&response.text)?)
    }
}
