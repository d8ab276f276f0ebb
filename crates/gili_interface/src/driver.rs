//! Reasoning capability seam.

use async_trait::async_trait;
use gili_core::{GenerateRequest, GenerateResponse};
use gili_error::GiliResult;

/// A text-generation backend the evaluator can ask for an evaluation.
///
/// Implementations own their transport timeout; the evaluator applies its
/// own deadline on top.
#[async_trait]
pub trait GiliDriver: Send + Sync {
    /// Send the messages and return the model's free-text answer.
    async fn generate(&self, req: &GenerateRequest) -> GiliResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-3.5-turbo").
    fn model_name(&self) -> &str;
}
