//! Cover evaluators.
//!
//! Token evaluators turn an admissible blocker set into a category; the
//! intersection mode picks which one runs. [`WallCoverEvaluator`] handles the
//! path where a wall obstructs the center line.

mod coverage;
mod size_rank;
mod tactical;
mod wall;

pub use coverage::CoverageEvaluator;
pub use size_rank::{CreatureSizeRankEvaluator, SizeRankContact};
pub use tactical::TacticalEvaluator;
pub use wall::{WALL_SAMPLE_TOLERANCE_PX, WallCoverEvaluator, WallVerdict, category_for_wall_coverage};

use crate::config::IntersectionMode;
use crate::state::{CoverCategory, Entity, EntityId, WallSegment};

/// Everything a token evaluator looks at.
#[derive(Clone, Copy, Debug)]
pub struct EvaluationInput<'a> {
    pub attacker: &'a Entity,
    pub target: &'a Entity,
    /// Blockers that survived selection and the elevation gate.
    pub blockers: &'a [&'a Entity],
    /// Scene walls. Only the tactical evaluator reads them, for corner lines.
    pub walls: &'a [WallSegment],
    /// The target holds the large-creature cover feat.
    pub target_has_large_creature_feat: bool,
}

/// Category computed by a token evaluator and the blockers that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub category: CoverCategory,
    /// Blockers that contributed to `category`, in scene order.
    pub contributors: Vec<EntityId>,
}

impl Evaluation {
    pub fn none() -> Self {
        Self {
            category: CoverCategory::None,
            contributors: Vec::new(),
        }
    }
}

/// Strategy that turns blockers into a cover category.
pub trait CoverEvaluator {
    fn kind(&self) -> EvaluatorKind;

    fn evaluate(&self, input: &EvaluationInput<'_>) -> Evaluation;
}

/// Identifies a token evaluator in logs and results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum EvaluatorKind {
    Tactical,
    Coverage,
    CreatureSizeRank,
}

/// Token evaluator selected by the intersection mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenEvaluator {
    Tactical(TacticalEvaluator),
    Coverage(CoverageEvaluator),
    CreatureSizeRank(CreatureSizeRankEvaluator),
}

impl TokenEvaluator {
    pub const fn for_mode(mode: IntersectionMode) -> Self {
        match mode {
            IntersectionMode::Tactical => Self::Tactical(TacticalEvaluator),
            IntersectionMode::Coverage => Self::Coverage(CoverageEvaluator),
            IntersectionMode::Permissive => {
                Self::CreatureSizeRank(CreatureSizeRankEvaluator::new(SizeRankContact::Touch))
            }
            IntersectionMode::CenterToCenter => {
                Self::CreatureSizeRank(CreatureSizeRankEvaluator::new(SizeRankContact::Penetrate))
            }
        }
    }
}

impl CoverEvaluator for TokenEvaluator {
    fn kind(&self) -> EvaluatorKind {
        match self {
            Self::Tactical(evaluator) => evaluator.kind(),
            Self::Coverage(evaluator) => evaluator.kind(),
            Self::CreatureSizeRank(evaluator) => evaluator.kind(),
        }
    }

    fn evaluate(&self, input: &EvaluationInput<'_>) -> Evaluation {
        match self {
            Self::Tactical(evaluator) => evaluator.evaluate(input),
            Self::Coverage(evaluator) => evaluator.evaluate(input),
            Self::CreatureSizeRank(evaluator) => evaluator.evaluate(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selects_evaluator() {
        assert_eq!(
            TokenEvaluator::for_mode(IntersectionMode::Tactical).kind(),
            EvaluatorKind::Tactical
        );
        assert_eq!(
            TokenEvaluator::for_mode(IntersectionMode::Coverage).kind(),
            EvaluatorKind::Coverage
        );
        assert_eq!(
            TokenEvaluator::for_mode(IntersectionMode::Permissive),
            TokenEvaluator::CreatureSizeRank(CreatureSizeRankEvaluator::new(SizeRankContact::Touch))
        );
        assert_eq!(
            TokenEvaluator::for_mode(IntersectionMode::CenterToCenter),
            TokenEvaluator::CreatureSizeRank(CreatureSizeRankEvaluator::new(
                SizeRankContact::Penetrate
            ))
        );
    }
}
