use gili_core::{Evaluation, SkillKind, SkillProgress, skill_gain};

fn evaluation() -> Evaluation {
    Evaluation {
        clarity_score: 85,
        structure_score: 72,
        creativity_score: 40,
        expression_score: 9,
        overall_score: 70,
        feedback_text: "Nice story".to_string(),
        strengths: vec!["Clear".to_string()],
        improvements: vec!["More detail".to_string()],
    }
}

#[test]
fn first_story_starts_at_level_one() {
    let progress = SkillProgress::apply(None, 8);
    assert_eq!(progress.level, 1);
    assert_eq!(progress.progress, 8);
    assert_eq!(progress.total_stories, 1);
}

#[test]
fn crossing_threshold_levels_up_with_remainder() {
    let existing = SkillProgress {
        level: 3,
        progress: 95,
        total_stories: 12,
    };
    let progress = SkillProgress::apply(Some(existing), 10);
    assert_eq!(progress.level, 4);
    assert_eq!(progress.progress, 5);
    assert_eq!(progress.total_stories, 13);
}

#[test]
fn below_threshold_keeps_level() {
    let existing = SkillProgress {
        level: 2,
        progress: 50,
        total_stories: 4,
    };
    let progress = existing.advance(3);
    assert_eq!(progress.level, 2);
    assert_eq!(progress.progress, 53);
    assert_eq!(progress.total_stories, 5);
}

#[test]
fn exactly_one_hundred_rolls_over_to_zero() {
    let existing = SkillProgress {
        level: 1,
        progress: 90,
        total_stories: 9,
    };
    let progress = existing.advance(10);
    assert_eq!((progress.level, progress.progress), (2, 0));
}

#[test]
fn gain_is_score_divided_by_ten() {
    assert_eq!(skill_gain(0), 0);
    assert_eq!(skill_gain(9), 0);
    assert_eq!(skill_gain(85), 8);
    assert_eq!(skill_gain(100), 10);
}

#[test]
fn skills_read_their_source_scores() {
    let eval = evaluation();
    let gains: Vec<_> = SkillKind::ALL
        .iter()
        .map(|skill| (skill.catalog_name(), skill_gain(skill.score(&eval))))
        .collect();

    assert_eq!(
        gains,
        vec![
            ("Narrative Clarity", 8),
            ("Story Arc", 7),
            ("Emotional Expression", 0),
            ("Creativity", 4),
        ]
    );
}
