//! Utilities for extracting an evaluation from a model response.
//!
//! Models wrap their JSON in markdown fences and surround it with prose.
//! Only fenced content is accepted; a bare JSON answer counts as malformed.

use gili_core::Evaluation;
use gili_error::{EvaluationError, EvaluationErrorKind};
use serde::Deserialize;

/// Return the content of the first fenced block.
///
/// A block tagged `json` wins over an earlier untagged one. For an untagged
/// fence a bare language tag on the opening line is skipped; anything else
/// on that line is content. An unclosed fence yields everything after it,
/// as truncated answers do.
///
/// # Examples
///
/// ```
/// use gili_pipeline::extract_fenced_block;
///
/// let response = "Sure!\n```json\n{\"a\": 1}\n```\nEnjoy.";
/// assert_eq!(extract_fenced_block(response), Some("{\"a\": 1}"));
/// assert_eq!(extract_fenced_block("{\"a\": 1}"), None);
/// ```
pub fn extract_fenced_block(response: &str) -> Option<&str> {
    const FENCE: &str = "```";
    const JSON_FENCE: &str = "```json";

    if let Some(start) = response.find(JSON_FENCE) {
        let content_start = start + JSON_FENCE.len();
        return Some(until_fence(&response[content_start..]));
    }

    let start = response.find(FENCE)?;
    let rest = &response[start + FENCE.len()..];
    let body = match rest.split_once('\n') {
        Some((opening, body)) if is_language_tag(opening) => body,
        _ => rest,
    };

    Some(until_fence(body))
}

fn is_language_tag(line: &str) -> bool {
    let tag = line.trim();
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}

fn until_fence(rest: &str) -> &str {
    match rest.find("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

/// Wire shape of the model's answer. Scores are range-checked after
/// decoding.
#[derive(Debug, Deserialize)]
struct EvaluationDocument {
    clarity_score: i64,
    structure_score: i64,
    creativity_score: i64,
    expression_score: i64,
    overall_score: i64,
    feedback_text: String,
    strengths: Vec<String>,
    improvements: Vec<String>,
}

#[track_caller]
fn score(field: &str, value: i64) -> Result<u8, EvaluationError> {
    u8::try_from(value)
        .ok()
        .filter(|score| *score <= 100)
        .ok_or_else(|| {
            EvaluationError::new(EvaluationErrorKind::ScoreOutOfRange {
                field: field.to_string(),
                value,
            })
        })
}

/// Parse a model response into an evaluation.
///
/// # Errors
///
/// Fails when the response has no fenced block, the block is not a JSON
/// object with every required field, or a score lies outside 0..=100.
pub fn parse_evaluation(response: &str) -> Result<Evaluation, EvaluationError> {
    let block = extract_fenced_block(response).ok_or_else(|| {
        tracing::warn!(response_length = response.len(), "No fenced block in response");
        EvaluationError::new(EvaluationErrorKind::NoCodeBlock(response.len()))
    })?;

    let doc: EvaluationDocument = serde_json::from_str(block)
        .map_err(|e| EvaluationError::new(EvaluationErrorKind::InvalidJson(e.to_string())))?;

    Ok(Evaluation {
        clarity_score: score("clarity_score", doc.clarity_score)?,
        structure_score: score("structure_score", doc.structure_score)?,
        creativity_score: score("creativity_score", doc.creativity_score)?,
        expression_score: score("expression_score", doc.expression_score)?,
        overall_score: score("overall_score", doc.overall_score)?,
        feedback_text: doc.feedback_text,
        strengths: doc.strengths,
        improvements: doc.improvements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
  "clarity_score": 85,
  "structure_score": 70,
  "creativity_score": 90,
  "expression_score": 65,
  "overall_score": 80,
  "feedback_text": "What a lively story!",
  "strengths": ["Vivid details", "Clear ending"],
  "improvements": ["Describe how the hero felt"]
}"#;

    #[test]
    fn parses_json_fenced_block() {
        let response = format!("Here is my evaluation:\n\n```json\n{DOC}\n```\n\nKeep writing!");
        let evaluation = parse_evaluation(&response).unwrap();

        assert_eq!(evaluation.clarity_score, 85);
        assert_eq!(evaluation.overall_score, 80);
        assert_eq!(evaluation.strengths.len(), 2);
        assert_eq!(evaluation.improvements, vec!["Describe how the hero felt"]);
    }

    #[test]
    fn json_tag_wins_over_earlier_generic_block() {
        let response = "```\nnot json\n```\n```json\n{\"a\": 1}\n```";
        assert_eq!(extract_fenced_block(response), Some("{\"a\": 1}"));
    }

    #[test]
    fn generic_block_skips_language_tag() {
        let response = format!("```javascript\n{DOC}\n```");
        assert!(parse_evaluation(&response).is_ok());
    }

    #[test]
    fn single_line_generic_block_is_not_skipped() {
        let compact = DOC.replace('\n', " ");
        let response = format!("Here you go: ```{compact}```\nHope this helps!");
        assert_eq!(extract_fenced_block(&response), Some(compact.as_str()));
        assert_eq!(parse_evaluation(&response).unwrap().clarity_score, 85);
    }

    #[test]
    fn generic_block_starting_on_fence_line_keeps_brace() {
        let response = format!("```{DOC}\n```\nThanks!");
        assert_eq!(extract_fenced_block(&response), Some(DOC));
        assert_eq!(parse_evaluation(&response).unwrap().overall_score, 80);
    }

    #[test]
    fn unclosed_fence_takes_the_rest() {
        let response = format!("```json\n{DOC}\n");
        assert!(parse_evaluation(&response).is_ok());
    }

    #[test]
    fn bare_json_is_rejected() {
        let err = parse_evaluation(DOC).unwrap_err();
        assert!(matches!(err.kind, EvaluationErrorKind::NoCodeBlock(_)));
    }

    #[test]
    fn missing_field_is_invalid_json() {
        let response = "```json\n{\"clarity_score\": 50}\n```";
        let err = parse_evaluation(response).unwrap_err();
        assert!(matches!(err.kind, EvaluationErrorKind::InvalidJson(_)));
    }

    #[test]
    fn out_of_range_score_is_reported() {
        let doc = DOC.replace("\"overall_score\": 80", "\"overall_score\": 120");
        let response = format!("```json\n{doc}\n```");
        let err = parse_evaluation(&response).unwrap_err();
        assert_eq!(
            err.kind,
            EvaluationErrorKind::ScoreOutOfRange {
                field: "overall_score".to_string(),
                value: 120
            }
        );
    }

    #[test]
    fn negative_score_is_reported() {
        let doc = DOC.replace("\"clarity_score\": 85", "\"clarity_score\": -3");
        let response = format!("```json\n{doc}\n```");
        let err = parse_evaluation(&response).unwrap_err();
        assert!(matches!(
            err.kind,
            EvaluationErrorKind::ScoreOutOfRange { value: -3, .. }
        ));
    }
}
