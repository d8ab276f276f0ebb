//! Story store seam.

use async_trait::async_trait;
use gili_core::{Evaluation, SkillKind, SkillProgress, StoryInput, StoryStatus};
use gili_error::GiliResult;

/// Persistence operations the worker needs for one story.
///
/// Every method is a single logical write or read; the worker decides which
/// failures are fatal for a message.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Overwrite the story's status.
    async fn set_status(&self, story_id: &str, status: StoryStatus) -> GiliResult<()>;

    /// Load the story joined with its author's age level and prompt title.
    ///
    /// Returns `Ok(None)` when no story with this identifier exists.
    async fn load_story(&self, story_id: &str) -> GiliResult<Option<StoryInput>>;

    /// Insert or replace the single feedback record for a story.
    async fn upsert_feedback(&self, story_id: &str, evaluation: &Evaluation) -> GiliResult<()>;

    /// Add `gain` progress points to one of the user's skills.
    ///
    /// The read-modify-write must be atomic per (user, skill). Returns
    /// `Ok(None)` when the skill is missing from the catalog, in which case
    /// nothing is written.
    async fn apply_skill_gain(
        &self,
        user_id: &str,
        skill: SkillKind,
        gain: i32,
    ) -> GiliResult<Option<SkillProgress>>;
}
