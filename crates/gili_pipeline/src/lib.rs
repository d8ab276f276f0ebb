//! Story evaluation pipeline for the Gili story evaluation worker.
//!
//! A story passes through a fixed sequence of stages:
//!
//! - **validate**: rule-based gate on the raw content
//! - **evaluate**: ask the reasoning capability for scores, falling back to a
//!   length heuristic on any failure
//! - **post-validate**: normalize the evaluation to the feedback contract
//!
//! Invalid stories short-circuit to a zero-score skip result.
//!
//! # Example
//!
//! ```no_run
//! use gili_core::StoryInput;
//! use gili_pipeline::{EvaluatorConfig, Pipeline};
//! # use gili_interface::GiliDriver;
//! # async fn example<D: GiliDriver>(driver: D) -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(driver, &EvaluatorConfig::default());
//! let story = StoryInput::builder()
//!     .story_id("story-1")
//!     .user_id("user-1")
//!     .content("Once upon a time, a little boat sailed home.")
//!     .build()?;
//! let result = pipeline.run(story).await;
//! assert!(result.is_valid);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod evaluator;
mod extraction;
mod orchestrator;
mod post_validator;
mod prompts;
mod validator;

pub use evaluator::{Evaluator, EvaluatorConfig, EvaluatorConfigBuilder, fallback_evaluation};
pub use extraction::{extract_fenced_block, parse_evaluation};
pub use orchestrator::{Pipeline, Stage, skip_evaluation};
pub use post_validator::{
    BANNED_WORDS, FILLER_STRENGTH, MAX_IMPROVEMENTS, MIN_SCORE, REPLACEMENT, post_validate,
};
pub use prompts::{DEFAULT_PROMPT_TITLE, SYSTEM_PROMPT, age_context, evaluation_prompt};
pub use validator::{Validation, ValidationIssue, validate};
