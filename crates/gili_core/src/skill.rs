//! Skill accumulators and leveling arithmetic.

use crate::Evaluation;
use serde::{Deserialize, Serialize};

/// Progress points needed to gain a level.
const LEVEL_THRESHOLD: i32 = 100;

/// The four skills tracked per user, keyed by their catalog names.
///
/// # Examples
///
/// ```
/// use gili_core::SkillKind;
///
/// assert_eq!(SkillKind::StoryArc.catalog_name(), "Story Arc");
/// assert_eq!(SkillKind::ALL.len(), 4);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum SkillKind {
    /// Fed by the clarity score
    #[strum(serialize = "Narrative Clarity")]
    NarrativeClarity,
    /// Fed by the structure score
    #[strum(serialize = "Story Arc")]
    StoryArc,
    /// Fed by the expression score
    #[strum(serialize = "Emotional Expression")]
    EmotionalExpression,
    /// Fed by the creativity score
    #[strum(serialize = "Creativity")]
    Creativity,
}

impl SkillKind {
    /// Every skill, in the order updates are applied.
    pub const ALL: [SkillKind; 4] = [
        SkillKind::NarrativeClarity,
        SkillKind::StoryArc,
        SkillKind::EmotionalExpression,
        SkillKind::Creativity,
    ];

    /// Name of the skill in the store's skill catalog.
    pub fn catalog_name(&self) -> &'static str {
        self.into()
    }

    /// The evaluation score that feeds this skill.
    pub fn score(&self, evaluation: &Evaluation) -> u8 {
        match self {
            SkillKind::NarrativeClarity => evaluation.clarity_score,
            SkillKind::StoryArc => evaluation.structure_score,
            SkillKind::EmotionalExpression => evaluation.expression_score,
            SkillKind::Creativity => evaluation.creativity_score,
        }
    }
}

/// Progress points earned from one score: `score div 10`, 0 to 10.
///
/// # Examples
///
/// ```
/// use gili_core::skill_gain;
///
/// assert_eq!(skill_gain(85), 8);
/// assert_eq!(skill_gain(100), 10);
/// assert_eq!(skill_gain(9), 0);
/// ```
pub fn skill_gain(score: u8) -> i32 {
    i32::from(score) / 10
}

/// Per (user, skill) accumulator as held by the store.
///
/// `advance` is the in-process statement of the leveling rule; the
/// PostgreSQL repository evaluates the same rule inside a single upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillProgress {
    /// Current level, starting at 1
    pub level: i32,
    /// Progress towards the next level, in 0..100
    pub progress: i32,
    /// Stories that contributed to this skill
    pub total_stories: i32,
}

impl SkillProgress {
    /// Accumulator created by the first story that touches a skill.
    pub fn first(gain: i32) -> Self {
        Self {
            level: 1,
            progress: gain,
            total_stories: 1,
        }
    }

    /// Apply one story's gain, rolling progress over into a new level.
    ///
    /// # Examples
    ///
    /// ```
    /// use gili_core::SkillProgress;
    ///
    /// let before = SkillProgress { level: 2, progress: 95, total_stories: 7 };
    /// let after = before.advance(10);
    /// assert_eq!((after.level, after.progress, after.total_stories), (3, 5, 8));
    /// ```
    pub fn advance(self, gain: i32) -> Self {
        let raw = self.progress + gain;
        let (level, progress) = if raw >= LEVEL_THRESHOLD {
            (self.level + 1, raw % LEVEL_THRESHOLD)
        } else {
            (self.level, raw)
        };
        Self {
            level,
            progress,
            total_stories: self.total_stories + 1,
        }
    }

    /// Create or advance an accumulator.
    pub fn apply(existing: Option<Self>, gain: i32) -> Self {
        match existing {
            Some(progress) => progress.advance(gain),
            None => Self::first(gain),
        }
    }
}
