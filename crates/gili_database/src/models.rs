//! Row models for the tables the worker reads and writes.

use crate::schema::story_feedback;
use diesel::prelude::*;
use gili_core::{AgeLevel, Evaluation, InputType, SkillProgress, StoryInput};
use gili_error::{BuilderError, BuilderErrorKind};
use uuid::Uuid;

/// A story joined with its author's level.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct StoryRow {
    /// Story id
    pub id: Uuid,
    /// Author id
    pub user_id: Uuid,
    /// Story text
    pub content: Option<String>,
    /// Capture modality
    pub input_type: String,
    /// Prompt title
    pub prompt_title: Option<String>,
    /// Author's stored level code
    pub level: Option<String>,
}

impl StoryRow {
    /// Assemble the pipeline input for this row.
    pub fn into_story_input(self) -> Result<StoryInput, BuilderError> {
        let mut builder = StoryInput::builder();
        builder
            .story_id(self.id.to_string())
            .user_id(self.user_id.to_string())
            .content(self.content.unwrap_or_default())
            .input_type(InputType::from_store(&self.input_type))
            .age_level(AgeLevel::from_store(self.level.as_deref()));
        if let Some(title) = self.prompt_title {
            builder.prompt_title(title);
        }
        builder
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))
    }
}

/// Insertable feedback record, one per story.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = story_feedback)]
pub struct NewStoryFeedbackRow {
    /// Story the feedback belongs to
    pub story_id: Uuid,
    /// Clarity score
    pub clarity_score: i32,
    /// Structure score
    pub structure_score: i32,
    /// Creativity score
    pub creativity_score: i32,
    /// Expression score
    pub expression_score: i32,
    /// Overall score
    pub overall_score: i32,
    /// Narrative feedback
    pub feedback_text: String,
    /// Ordered strengths
    pub strengths: Vec<String>,
    /// Ordered improvements
    pub improvements: Vec<String>,
}

impl NewStoryFeedbackRow {
    /// Build the row for a story's evaluation.
    pub fn new(story_id: Uuid, evaluation: &Evaluation) -> Self {
        Self {
            story_id,
            clarity_score: i32::from(evaluation.clarity_score),
            structure_score: i32::from(evaluation.structure_score),
            creativity_score: i32::from(evaluation.creativity_score),
            expression_score: i32::from(evaluation.expression_score),
            overall_score: i32::from(evaluation.overall_score),
            feedback_text: evaluation.feedback_text.clone(),
            strengths: evaluation.strengths.clone(),
            improvements: evaluation.improvements.clone(),
        }
    }
}

/// Accumulator returned by the skill progress upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, QueryableByName)]
pub struct SkillProgressRow {
    /// Level after the update
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub level: i32,
    /// Progress after the update
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub progress: i32,
    /// Stories counted after the update
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub total_stories: i32,
}

impl From<SkillProgressRow> for SkillProgress {
    fn from(row: SkillProgressRow) -> Self {
        Self {
            level: row.level,
            progress: row.progress,
            total_stories: row.total_stories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_row_maps_store_codes() {
        let id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let row = StoryRow {
            id,
            user_id,
            content: None,
            input_type: "audio".to_string(),
            prompt_title: None,
            level: Some("smp".to_string()),
        };

        let story = row.into_story_input().unwrap();
        assert_eq!(story.story_id(), &id.to_string());
        assert_eq!(story.user_id(), &user_id.to_string());
        assert_eq!(story.content(), "");
        assert_eq!(*story.input_type(), InputType::Audio);
        assert_eq!(*story.age_level(), AgeLevel::Middle);
        assert_eq!(*story.prompt_title(), None);
    }

    #[test]
    fn feedback_row_widens_scores() {
        let evaluation = Evaluation {
            clarity_score: 100,
            structure_score: 40,
            creativity_score: 55,
            expression_score: 61,
            overall_score: 70,
            feedback_text: "Lovely".to_string(),
            strengths: vec!["Vivid".to_string()],
            improvements: Vec::new(),
        };
        let story_id = Uuid::new_v4();

        let row = NewStoryFeedbackRow::new(story_id, &evaluation);
        assert_eq!(row.story_id, story_id);
        assert_eq!(row.clarity_score, 100);
        assert_eq!(row.structure_score, 40);
        assert_eq!(row.strengths, vec!["Vivid".to_string()]);
    }
}
