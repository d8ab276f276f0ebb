//! Tests against a live PostgreSQL database.
//!
//! Each test runs inside a test transaction that is rolled back when its
//! connection drops, so the database is left untouched.

use diesel::prelude::*;
use diesel::sql_types::{Text, Uuid as SqlUuid};
use gili_core::{AgeLevel, Evaluation, SkillKind, SkillProgress, StoryStatus};
use gili_database::schema::{stories, story_feedback};
use gili_database::{PostgresStoryRepository, establish_connection};
use gili_interface::StoryRepository;
use std::env;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

struct Fixture {
    conn: Arc<Mutex<PgConnection>>,
    repo: PostgresStoryRepository,
    user_id: Uuid,
    story_id: Uuid,
}

async fn fixture() -> anyhow::Result<Fixture> {
    dotenvy::dotenv().ok();
    let url = env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");

    let mut conn = establish_connection(&url)?;
    conn.begin_test_transaction()?;

    let user_id = Uuid::new_v4();
    let story_id = Uuid::new_v4();

    diesel::sql_query(
        "INSERT INTO users (id, name, email, level) VALUES ($1, 'Test Author', $2, 'smp')",
    )
    .bind::<SqlUuid, _>(user_id)
    .bind::<Text, _>(format!("{user_id}@example.test"))
    .execute(&mut conn)?;

    diesel::sql_query(
        "INSERT INTO stories (id, user_id, input_type, content, prompt_title, status) \
         VALUES ($1, $2, 'text', 'A turtle walked all the way to the sea.', 'My Pet', 'pending')",
    )
    .bind::<SqlUuid, _>(story_id)
    .bind::<SqlUuid, _>(user_id)
    .execute(&mut conn)?;

    for skill in SkillKind::ALL {
        diesel::sql_query(
            "INSERT INTO skills (id, name) SELECT $1, $2 \
             WHERE NOT EXISTS (SELECT 1 FROM skills WHERE name = $2)",
        )
        .bind::<SqlUuid, _>(Uuid::new_v4())
        .bind::<Text, _>(skill.catalog_name())
        .execute(&mut conn)?;
    }

    let conn = Arc::new(Mutex::new(conn));
    let repo = PostgresStoryRepository::from_arc(Arc::clone(&conn));

    Ok(Fixture {
        conn,
        repo,
        user_id,
        story_id,
    })
}

fn evaluation(overall: u8) -> Evaluation {
    Evaluation {
        clarity_score: 70,
        structure_score: 65,
        creativity_score: 75,
        expression_score: 60,
        overall_score: overall,
        feedback_text: "A brave little journey.".to_string(),
        strengths: vec!["Clear goal".to_string(), "Kind crab".to_string()],
        improvements: vec!["Describe the sea".to_string()],
    }
}

#[tokio::test]
#[cfg_attr(not(feature = "integration"), ignore)]
async fn test_load_story_joins_author_level() -> anyhow::Result<()> {
    let fx = fixture().await?;

    let story = fx
        .repo
        .load_story(&fx.story_id.to_string())
        .await?
        .expect("seeded story should load");

    assert_eq!(story.user_id(), &fx.user_id.to_string());
    assert_eq!(*story.age_level(), AgeLevel::Middle);
    assert_eq!(story.prompt_title().as_deref(), Some("My Pet"));

    let missing = fx.repo.load_story(&Uuid::new_v4().to_string()).await?;
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "integration"), ignore)]
async fn test_set_status_writes_column() -> anyhow::Result<()> {
    let fx = fixture().await?;

    fx.repo
        .set_status(&fx.story_id.to_string(), StoryStatus::Completed)
        .await?;

    let status: Option<String> = {
        let mut conn = fx.conn.lock().await;
        stories::table
            .find(fx.story_id)
            .select(stories::status)
            .first(&mut *conn)?
    };
    assert_eq!(status.as_deref(), Some("completed"));
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "integration"), ignore)]
async fn test_feedback_upsert_keeps_one_row_with_latest_scores() -> anyhow::Result<()> {
    let fx = fixture().await?;
    let story_id = fx.story_id.to_string();

    fx.repo.upsert_feedback(&story_id, &evaluation(55)).await?;
    fx.repo.upsert_feedback(&story_id, &evaluation(88)).await?;

    let overall: Vec<Option<i32>> = {
        let mut conn = fx.conn.lock().await;
        story_feedback::table
            .filter(story_feedback::story_id.eq(fx.story_id))
            .select(story_feedback::overall_score)
            .load(&mut *conn)?
    };
    assert_eq!(overall, vec![Some(88)]);
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "integration"), ignore)]
async fn test_first_gain_creates_level_one_row() -> anyhow::Result<()> {
    let fx = fixture().await?;
    let user_id = fx.user_id.to_string();

    let progress = fx
        .repo
        .apply_skill_gain(&user_id, SkillKind::Creativity, 7)
        .await?;

    assert_eq!(
        progress,
        Some(SkillProgress {
            level: 1,
            progress: 7,
            total_stories: 1
        })
    );
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "integration"), ignore)]
async fn test_gain_past_one_hundred_levels_up() -> anyhow::Result<()> {
    let fx = fixture().await?;
    let user_id = fx.user_id.to_string();

    fx.repo
        .apply_skill_gain(&user_id, SkillKind::NarrativeClarity, 95)
        .await?;
    let progress = fx
        .repo
        .apply_skill_gain(&user_id, SkillKind::NarrativeClarity, 10)
        .await?;

    assert_eq!(
        progress,
        Some(SkillProgress {
            level: 2,
            progress: 5,
            total_stories: 2
        })
    );
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "integration"), ignore)]
async fn test_gain_below_one_hundred_keeps_level() -> anyhow::Result<()> {
    let fx = fixture().await?;
    let user_id = fx.user_id.to_string();

    fx.repo
        .apply_skill_gain(&user_id, SkillKind::StoryArc, 50)
        .await?;
    let progress = fx
        .repo
        .apply_skill_gain(&user_id, SkillKind::StoryArc, 3)
        .await?;

    assert_eq!(
        progress,
        Some(SkillProgress {
            level: 1,
            progress: 53,
            total_stories: 2
        })
    );
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "integration"), ignore)]
async fn test_skill_missing_from_catalog_returns_none() -> anyhow::Result<()> {
    let fx = fixture().await?;

    {
        let mut conn = fx.conn.lock().await;
        diesel::sql_query("UPDATE skills SET name = name || ' (retired)' WHERE name = $1")
            .bind::<Text, _>(SkillKind::EmotionalExpression.catalog_name())
            .execute(&mut *conn)?;
    }

    let progress = fx
        .repo
        .apply_skill_gain(&fx.user_id.to_string(), SkillKind::EmotionalExpression, 9)
        .await?;

    assert!(progress.is_none());
    Ok(())
}
