use gili_core::{AgeLevel, Evaluation, SkillKind, SkillProgress, StoryInput, StoryStatus};
use gili_database::{InMemoryStoryRepository, StoreOperation};
use gili_interface::StoryRepository;

fn story() -> StoryInput {
    StoryInput::builder()
        .story_id("story-1")
        .user_id("user-1")
        .content("A long enough story about a dragon.")
        .age_level(AgeLevel::Secondary)
        .build()
        .unwrap()
}

fn evaluation(overall: u8) -> Evaluation {
    Evaluation {
        clarity_score: 70,
        structure_score: 65,
        creativity_score: 70,
        expression_score: 65,
        overall_score: overall,
        feedback_text: "Good job".to_string(),
        strengths: vec!["Brave".to_string(), "Clear".to_string()],
        improvements: vec!["More detail".to_string()],
    }
}

#[tokio::test]
async fn load_story_returns_inserted_story() {
    let repo = InMemoryStoryRepository::new();
    repo.insert_story(story()).await;

    let loaded = repo.load_story("story-1").await.unwrap();
    assert_eq!(loaded, Some(story()));
    assert_eq!(repo.load_story("missing").await.unwrap(), None);
}

#[tokio::test]
async fn feedback_upsert_replaces_previous_record() {
    let repo = InMemoryStoryRepository::new();

    repo.upsert_feedback("story-1", &evaluation(60)).await.unwrap();
    repo.upsert_feedback("story-1", &evaluation(80)).await.unwrap();

    assert_eq!(repo.feedback_count().await, 1);
    assert_eq!(repo.feedback("story-1").await.unwrap().overall_score, 80);
}

#[tokio::test]
async fn status_history_is_recorded_in_order() {
    let repo = InMemoryStoryRepository::new();

    repo.set_status("story-1", StoryStatus::Processing).await.unwrap();
    repo.set_status("story-1", StoryStatus::Completed).await.unwrap();

    assert_eq!(
        repo.status_history("story-1").await,
        vec![StoryStatus::Processing, StoryStatus::Completed]
    );
    assert_eq!(repo.status("story-1").await, Some(StoryStatus::Completed));
}

#[tokio::test]
async fn skill_gain_levels_up_existing_progress() {
    let repo = InMemoryStoryRepository::new();
    repo.set_progress(
        "user-1",
        SkillKind::StoryArc,
        SkillProgress {
            level: 1,
            progress: 95,
            total_stories: 3,
        },
    )
    .await;

    let updated = repo
        .apply_skill_gain("user-1", SkillKind::StoryArc, 10)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.level, 2);
    assert_eq!(updated.progress, 5);
    assert_eq!(updated.total_stories, 4);
}

#[tokio::test]
async fn skill_missing_from_catalog_is_skipped() {
    let repo = InMemoryStoryRepository::new();
    repo.remove_skill(SkillKind::Creativity).await;

    let result = repo
        .apply_skill_gain("user-1", SkillKind::Creativity, 7)
        .await
        .unwrap();

    assert_eq!(result, None);
    assert_eq!(repo.progress_count().await, 0);
}

#[tokio::test]
async fn concurrent_gains_are_not_lost() {
    let repo = InMemoryStoryRepository::new();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.apply_skill_gain("user-1", SkillKind::Creativity, 10)
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let progress = repo.progress("user-1", SkillKind::Creativity).await.unwrap();
    assert_eq!(progress.total_stories, 20);
    assert_eq!(progress.level, 3);
    assert_eq!(progress.progress, 0);
}

#[tokio::test]
async fn injected_failure_surfaces_and_recovers() {
    let repo = InMemoryStoryRepository::new();
    repo.fail_on(StoreOperation::UpsertFeedback).await;

    assert!(repo.upsert_feedback("story-1", &evaluation(70)).await.is_err());
    assert_eq!(repo.feedback_count().await, 0);

    repo.recover(StoreOperation::UpsertFeedback).await;
    assert!(repo.upsert_feedback("story-1", &evaluation(70)).await.is_ok());
}
