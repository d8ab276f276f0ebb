//! Normalization of evaluations to the feedback contract.

use gili_core::Evaluation;

/// Floor applied to every score.
pub const MIN_SCORE: u8 = 40;

/// Words replaced in the narrative feedback, matched case-sensitively.
pub const BANNED_WORDS: &[&str] = &["bad", "ugly", "fail", "wrong"];

/// Text substituted for each banned word.
pub const REPLACEMENT: &str = "needs improvement";

/// Strength appended when fewer than two are present.
pub const FILLER_STRENGTH: &str = "Showed courage in telling a story";

/// Maximum number of improvements kept.
pub const MAX_IMPROVEMENTS: usize = 3;

/// Normalize an evaluation in place.
///
/// Steps run in order: floor scores, rewrite banned words, pad strengths,
/// truncate improvements. Padding appends a single filler, so an evaluation
/// with no strengths ends up with one.
///
/// # Examples
///
/// ```
/// use gili_core::Evaluation;
/// use gili_pipeline::post_validate;
///
/// let mut evaluation = Evaluation {
///     clarity_score: 12,
///     structure_score: 55,
///     creativity_score: 40,
///     expression_score: 0,
///     overall_score: 39,
///     feedback_text: "The ending was bad.".to_string(),
///     strengths: vec![],
///     improvements: vec!["a".into(), "b".into(), "c".into(), "d".into()],
/// };
/// post_validate(&mut evaluation);
///
/// assert_eq!(evaluation.scores(), [40, 55, 40, 40, 40]);
/// assert_eq!(evaluation.feedback_text, "The ending was needs improvement.");
/// assert_eq!(evaluation.strengths.len(), 1);
/// assert_eq!(evaluation.improvements.len(), 3);
/// ```
#[tracing::instrument(skip_all)]
pub fn post_validate(evaluation: &mut Evaluation) {
    for score in evaluation.scores_mut() {
        *score = (*score).max(MIN_SCORE);
    }

    for word in BANNED_WORDS {
        if evaluation.feedback_text.contains(word) {
            evaluation.feedback_text = evaluation.feedback_text.replace(word, REPLACEMENT);
        }
    }

    if evaluation.strengths.len() < 2 {
        evaluation.strengths.push(FILLER_STRENGTH.to_string());
    }

    evaluation.improvements.truncate(MAX_IMPROVEMENTS);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation() -> Evaluation {
        Evaluation {
            clarity_score: 80,
            structure_score: 75,
            creativity_score: 90,
            expression_score: 70,
            overall_score: 85,
            feedback_text: "A wonderful adventure.".to_string(),
            strengths: vec!["Imaginative".to_string(), "Well paced".to_string()],
            improvements: vec!["Add dialogue".to_string()],
        }
    }

    #[test]
    fn high_scores_are_untouched() {
        let mut eval = evaluation();
        post_validate(&mut eval);
        assert_eq!(eval, evaluation());
    }

    #[test]
    fn replacement_is_case_sensitive() {
        let mut eval = evaluation();
        eval.feedback_text = "Bad start, but nothing went wrong after that.".to_string();
        post_validate(&mut eval);
        assert_eq!(
            eval.feedback_text,
            "Bad start, but nothing went needs improvement after that."
        );
    }

    #[test]
    fn replacement_is_literal_substring() {
        let mut eval = evaluation();
        eval.feedback_text = "No failure here.".to_string();
        post_validate(&mut eval);
        assert_eq!(eval.feedback_text, "No needs improvementure here.");
    }

    #[test]
    fn one_strength_gets_one_filler() {
        let mut eval = evaluation();
        eval.strengths = vec!["Funny".to_string()];
        post_validate(&mut eval);
        assert_eq!(eval.strengths, vec!["Funny", FILLER_STRENGTH]);
    }

    #[test]
    fn zero_strengths_get_a_single_filler() {
        let mut eval = evaluation();
        eval.strengths.clear();
        post_validate(&mut eval);
        assert_eq!(eval.strengths, vec![FILLER_STRENGTH]);
    }

    #[test]
    fn improvements_keep_first_three_in_order() {
        let mut eval = evaluation();
        eval.improvements = ["one", "two", "three", "four", "five"]
            .into_iter()
            .map(String::from)
            .collect();
        post_validate(&mut eval);
        assert_eq!(eval.improvements, vec!["one", "two", "three"]);
    }
}
