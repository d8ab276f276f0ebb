//! Core data types for the Gili story evaluation worker.
//!
//! This crate provides the values that flow between the pipeline, the worker
//! and the store: the story being evaluated, the evaluation produced for it,
//! the pipeline's terminal result, and the skill-leveling arithmetic.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod evaluation;
mod request;
mod skill;
mod story;

pub use evaluation::{Evaluation, EvaluationOutcome, PipelineResult};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, Message, Role};
pub use skill::{SkillKind, SkillProgress, skill_gain};
pub use story::{AgeLevel, InputType, StoryInput, StoryInputBuilder, StoryStatus};
