//! PostgreSQL implementation of StoryRepository.

use crate::schema::{skills, stories, story_feedback, users};
use crate::{DatabaseResult, NewStoryFeedbackRow, SkillProgressRow, StoryRow, parse_id};

use gili_core::{Evaluation, SkillKind, SkillProgress, StoryInput, StoryStatus};
use gili_error::GiliResult;
use gili_interface::StoryRepository;

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Uuid as SqlUuid};
use diesel::upsert::excluded;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::instrument;
use uuid::Uuid;

/// Creates or advances one (user, skill) accumulator in a single statement.
///
/// Concurrent workers updating the same row serialize on the unique
/// constraint, so no gain is lost.
const UPSERT_SKILL_PROGRESS: &str = "\
INSERT INTO skill_progress (user_id, skill_id, level, progress, total_stories, updated_at)
VALUES ($1, $2, 1, $3, 1, CURRENT_TIMESTAMP)
ON CONFLICT (user_id, skill_id) DO UPDATE SET
    progress = CASE
        WHEN skill_progress.progress + EXCLUDED.progress >= 100
        THEN (skill_progress.progress + EXCLUDED.progress) % 100
        ELSE skill_progress.progress + EXCLUDED.progress
    END,
    level = CASE
        WHEN skill_progress.progress + EXCLUDED.progress >= 100
        THEN skill_progress.level + 1
        ELSE skill_progress.level
    END,
    total_stories = skill_progress.total_stories + 1,
    updated_at = CURRENT_TIMESTAMP
RETURNING level, progress, total_stories";

/// PostgreSQL implementation of StoryRepository using Diesel ORM.
///
/// Holds the instance's single connection behind an async mutex; the worker
/// handles one message at a time, so the lock is never contended in practice.
pub struct PostgresStoryRepository {
    conn: Arc<Mutex<PgConnection>>,
}

impl PostgresStoryRepository {
    /// Create a repository that owns `conn`.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a repository from a shared connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }
}

fn update_status(
    conn: &mut PgConnection,
    story_id: Uuid,
    status: StoryStatus,
) -> DatabaseResult<()> {
    diesel::update(stories::table.find(story_id))
        .set((
            stories::status.eq(status.as_str()),
            stories::updated_at.eq(now.nullable()),
        ))
        .execute(conn)?;
    Ok(())
}

fn select_story(conn: &mut PgConnection, story_id: Uuid) -> DatabaseResult<Option<StoryRow>> {
    let row = stories::table
        .inner_join(users::table)
        .filter(stories::id.eq(story_id))
        .select((
            stories::id,
            stories::user_id,
            stories::content,
            stories::input_type,
            stories::prompt_title,
            users::level,
        ))
        .first::<StoryRow>(conn)
        .optional()?;
    Ok(row)
}

fn upsert_feedback_row(conn: &mut PgConnection, row: &NewStoryFeedbackRow) -> DatabaseResult<()> {
    diesel::insert_into(story_feedback::table)
        .values(row)
        .on_conflict(story_feedback::story_id)
        .do_update()
        .set((
            story_feedback::clarity_score.eq(excluded(story_feedback::clarity_score)),
            story_feedback::structure_score.eq(excluded(story_feedback::structure_score)),
            story_feedback::creativity_score.eq(excluded(story_feedback::creativity_score)),
            story_feedback::expression_score.eq(excluded(story_feedback::expression_score)),
            story_feedback::overall_score.eq(excluded(story_feedback::overall_score)),
            story_feedback::feedback_text.eq(excluded(story_feedback::feedback_text)),
            story_feedback::strengths.eq(excluded(story_feedback::strengths)),
            story_feedback::improvements.eq(excluded(story_feedback::improvements)),
        ))
        .execute(conn)?;
    Ok(())
}

fn upsert_skill_progress(
    conn: &mut PgConnection,
    user_id: Uuid,
    skill: SkillKind,
    gain: i32,
) -> DatabaseResult<Option<SkillProgressRow>> {
    let skill_id = skills::table
        .filter(skills::name.eq(skill.catalog_name()))
        .select(skills::id)
        .first::<Uuid>(conn)
        .optional()?;

    let Some(skill_id) = skill_id else {
        return Ok(None);
    };

    let row = diesel::sql_query(UPSERT_SKILL_PROGRESS)
        .bind::<SqlUuid, _>(user_id)
        .bind::<SqlUuid, _>(skill_id)
        .bind::<Integer, _>(gain)
        .get_result::<SkillProgressRow>(conn)?;
    Ok(Some(row))
}

#[async_trait]
impl StoryRepository for PostgresStoryRepository {
    #[instrument(skip(self, status), fields(status = %status))]
    async fn set_status(&self, story_id: &str, status: StoryStatus) -> GiliResult<()> {
        let id = parse_id(story_id)?;
        let mut conn = self.conn.lock().await;
        update_status(&mut conn, id, status)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn load_story(&self, story_id: &str) -> GiliResult<Option<StoryInput>> {
        let id = parse_id(story_id)?;
        let row = {
            let mut conn = self.conn.lock().await;
            select_story(&mut conn, id)?
        };
        match row {
            Some(row) => Ok(Some(row.into_story_input()?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, evaluation), fields(overall = evaluation.overall_score))]
    async fn upsert_feedback(&self, story_id: &str, evaluation: &Evaluation) -> GiliResult<()> {
        let row = NewStoryFeedbackRow::new(parse_id(story_id)?, evaluation);
        let mut conn = self.conn.lock().await;
        upsert_feedback_row(&mut conn, &row)?;
        Ok(())
    }

    #[instrument(skip(self, skill), fields(skill = %skill))]
    async fn apply_skill_gain(
        &self,
        user_id: &str,
        skill: SkillKind,
        gain: i32,
    ) -> GiliResult<Option<SkillProgress>> {
        let user_id = parse_id(user_id)?;
        let mut conn = self.conn.lock().await;
        let row = upsert_skill_progress(&mut conn, user_id, skill, gain)?;
        Ok(row.map(SkillProgress::from))
    }
}
