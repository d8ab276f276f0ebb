//! In-memory implementation of StoryRepository for testing.
//!
//! Stores stories, feedback and skill progress in maps behind `RwLock`s.
//! Individual operations can be made to fail to exercise the worker's
//! failure handling.

use async_trait::async_trait;
use gili_core::{Evaluation, SkillKind, SkillProgress, StoryInput, StoryStatus};
use gili_error::{DatabaseError, DatabaseErrorKind, GiliResult};
use gili_interface::StoryRepository;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Repository operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// [`StoryRepository::set_status`]
    SetStatus,
    /// [`StoryRepository::load_story`]
    LoadStory,
    /// [`StoryRepository::upsert_feedback`]
    UpsertFeedback,
    /// [`StoryRepository::apply_skill_gain`]
    ApplySkillGain,
}

/// In-memory story store.
///
/// Cloning shares the underlying maps, so a test can keep a handle while the
/// worker owns another.
///
/// # Example
/// ```
/// use gili_database::InMemoryStoryRepository;
///
/// # #[tokio::main]
/// # async fn main() {
/// let repo = InMemoryStoryRepository::new();
/// assert_eq!(repo.feedback_count().await, 0);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStoryRepository {
    stories: Arc<RwLock<HashMap<String, StoryInput>>>,
    statuses: Arc<RwLock<HashMap<String, Vec<StoryStatus>>>>,
    feedback: Arc<RwLock<HashMap<String, Evaluation>>>,
    catalog: Arc<RwLock<HashSet<SkillKind>>>,
    progress: Arc<RwLock<HashMap<(String, SkillKind), SkillProgress>>>,
    failures: Arc<RwLock<HashSet<StoreOperation>>>,
}

impl InMemoryStoryRepository {
    /// Create an empty store whose skill catalog holds every skill.
    pub fn new() -> Self {
        Self {
            stories: Arc::new(RwLock::new(HashMap::new())),
            statuses: Arc::new(RwLock::new(HashMap::new())),
            feedback: Arc::new(RwLock::new(HashMap::new())),
            catalog: Arc::new(RwLock::new(SkillKind::ALL.into_iter().collect())),
            progress: Arc::new(RwLock::new(HashMap::new())),
            failures: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Add or replace a story.
    pub async fn insert_story(&self, story: StoryInput) {
        self.stories
            .write()
            .await
            .insert(story.story_id().clone(), story);
    }

    /// Remove a skill from the catalog.
    pub async fn remove_skill(&self, skill: SkillKind) {
        self.catalog.write().await.remove(&skill);
    }

    /// Seed an accumulator.
    pub async fn set_progress(&self, user_id: &str, skill: SkillKind, progress: SkillProgress) {
        self.progress
            .write()
            .await
            .insert((user_id.to_string(), skill), progress);
    }

    /// Make every later call of `operation` fail.
    pub async fn fail_on(&self, operation: StoreOperation) {
        self.failures.write().await.insert(operation);
    }

    /// Let `operation` succeed again.
    pub async fn recover(&self, operation: StoreOperation) {
        self.failures.write().await.remove(&operation);
    }

    /// Latest status written for a story.
    pub async fn status(&self, story_id: &str) -> Option<StoryStatus> {
        self.statuses
            .read()
            .await
            .get(story_id)
            .and_then(|history| history.last().copied())
    }

    /// Every status written for a story, oldest first.
    pub async fn status_history(&self, story_id: &str) -> Vec<StoryStatus> {
        self.statuses
            .read()
            .await
            .get(story_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Stored feedback for a story.
    pub async fn feedback(&self, story_id: &str) -> Option<Evaluation> {
        self.feedback.read().await.get(story_id).cloned()
    }

    /// Number of feedback records.
    pub async fn feedback_count(&self) -> usize {
        self.feedback.read().await.len()
    }

    /// Stored accumulator for a (user, skill) pair.
    pub async fn progress(&self, user_id: &str, skill: SkillKind) -> Option<SkillProgress> {
        self.progress
            .read()
            .await
            .get(&(user_id.to_string(), skill))
            .copied()
    }

    /// Number of (user, skill) accumulators.
    pub async fn progress_count(&self) -> usize {
        self.progress.read().await.len()
    }

    #[track_caller]
    fn simulated(operation: StoreOperation) -> DatabaseError {
        DatabaseError::new(DatabaseErrorKind::Simulated(format!("{:?}", operation)))
    }

    async fn check(&self, operation: StoreOperation) -> Result<(), DatabaseError> {
        if self.failures.read().await.contains(&operation) {
            Err(Self::simulated(operation))
        } else {
            Ok(())
        }
    }
}

impl Default for InMemoryStoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn set_status(&self, story_id: &str, status: StoryStatus) -> GiliResult<()> {
        self.check(StoreOperation::SetStatus).await?;
        self.statuses
            .write()
            .await
            .entry(story_id.to_string())
            .or_default()
            .push(status);
        Ok(())
    }

    async fn load_story(&self, story_id: &str) -> GiliResult<Option<StoryInput>> {
        self.check(StoreOperation::LoadStory).await?;
        Ok(self.stories.read().await.get(story_id).cloned())
    }

    async fn upsert_feedback(&self, story_id: &str, evaluation: &Evaluation) -> GiliResult<()> {
        self.check(StoreOperation::UpsertFeedback).await?;
        self.feedback
            .write()
            .await
            .insert(story_id.to_string(), evaluation.clone());
        Ok(())
    }

    async fn apply_skill_gain(
        &self,
        user_id: &str,
        skill: SkillKind,
        gain: i32,
    ) -> GiliResult<Option<SkillProgress>> {
        self.check(StoreOperation::ApplySkillGain).await?;
        if !self.catalog.read().await.contains(&skill) {
            return Ok(None);
        }

        let mut progress = self.progress.write().await;
        let key = (user_id.to_string(), skill);
        let updated = SkillProgress::apply(progress.get(&key).copied(), gain);
        progress.insert(key, updated);
        Ok(Some(updated))
    }
}
