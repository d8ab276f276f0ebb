//! Turning a finished evaluation into skill progress.

use gili_core::{Evaluation, SkillKind, SkillProgress, skill_gain};
use gili_error::GiliResult;
use gili_interface::StoryRepository;
use tracing::instrument;

/// Apply one story's gains to the author's four skills.
///
/// Each skill is one atomic upsert in the store. Skills missing from the
/// catalog are skipped. Returns the accumulators that were written, in
/// update order.
#[instrument(skip(repository, evaluation))]
pub async fn update_skill_progress<R>(
    repository: &R,
    user_id: &str,
    evaluation: &Evaluation,
) -> GiliResult<Vec<(SkillKind, SkillProgress)>>
where
    R: StoryRepository + ?Sized,
{
    let mut updated = Vec::with_capacity(SkillKind::ALL.len());

    for skill in SkillKind::ALL {
        let gain = skill_gain(skill.score(evaluation));
        match repository.apply_skill_gain(user_id, skill, gain).await? {
            Some(progress) => {
                tracing::debug!(
                    %skill,
                    gain,
                    level = progress.level,
                    progress = progress.progress,
                    "Skill progress updated"
                );
                updated.push((skill, progress));
            }
            None => tracing::warn!(%skill, "Skill missing from catalog, skipping"),
        }
    }

    Ok(updated)
}
