//! Story input and lifecycle types.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Age band of the story's author.
///
/// The store keeps the legacy school-level codes (`sd`, `smp`, `sma`,
/// `kuliah`); both spellings parse.
///
/// # Examples
///
/// ```
/// use gili_core::AgeLevel;
///
/// assert_eq!("middle".parse::<AgeLevel>().unwrap(), AgeLevel::Middle);
/// assert_eq!("smp".parse::<AgeLevel>().unwrap(), AgeLevel::Middle);
/// assert_eq!(AgeLevel::from_store(Some("unknown")), AgeLevel::Primary);
/// assert_eq!(AgeLevel::Tertiary.to_string(), "tertiary");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum AgeLevel {
    /// Primary school (7-12)
    #[default]
    #[serde(alias = "sd")]
    #[strum(to_string = "primary", serialize = "sd")]
    Primary,
    /// Middle school (13-15)
    #[serde(alias = "smp")]
    #[strum(to_string = "middle", serialize = "smp")]
    Middle,
    /// Secondary school (16-18)
    #[serde(alias = "sma")]
    #[strum(to_string = "secondary", serialize = "sma")]
    Secondary,
    /// University (18+)
    #[serde(alias = "kuliah")]
    #[strum(to_string = "tertiary", serialize = "kuliah")]
    Tertiary,
}

impl AgeLevel {
    /// Interpret a stored level, falling back to primary when it is missing or unknown.
    pub fn from_store(level: Option<&str>) -> Self {
        level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or_default()
    }
}

/// How the story was captured.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InputType {
    /// Typed text
    #[default]
    Text,
    /// Transcribed audio
    Audio,
}

impl InputType {
    /// Interpret a stored input type, defaulting to text.
    pub fn from_store(input_type: &str) -> Self {
        input_type.trim().parse().unwrap_or_default()
    }
}

/// Persisted processing status of a story.
///
/// `Pending` is written by the submitting service; the worker only writes
/// the other three.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoryStatus {
    /// Submitted, waiting in the queue
    Pending,
    /// A worker picked it up
    Processing,
    /// Feedback persisted
    Completed,
    /// Rejected by validation or processing failed
    Failed,
}

impl StoryStatus {
    /// Column value for this status.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A story to evaluate, assembled once per queue message.
///
/// # Examples
///
/// ```
/// use gili_core::{AgeLevel, StoryInput};
///
/// let story = StoryInput::builder()
///     .story_id("story-1")
///     .user_id("user-1")
///     .content("Once upon a time there was a brave little cat.")
///     .age_level(AgeLevel::Middle)
///     .prompt_title("My Pet")
///     .build()
///     .unwrap();
///
/// assert_eq!(story.story_id(), "story-1");
/// assert_eq!(story.prompt_title().as_deref(), Some("My Pet"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct StoryInput {
    /// Story identifier (the queue message body)
    story_id: String,
    /// Author identifier
    user_id: String,
    /// Raw story text
    content: String,
    /// Capture modality
    #[builder(default)]
    input_type: InputType,
    /// Author's age band
    #[builder(default)]
    age_level: AgeLevel,
    /// Title of the prompt the story answers, if any
    #[builder(default, setter(into, strip_option))]
    prompt_title: Option<String>,
}

impl StoryInput {
    /// Start building a story input.
    pub fn builder() -> StoryInputBuilder {
        StoryInputBuilder::default()
    }
}
