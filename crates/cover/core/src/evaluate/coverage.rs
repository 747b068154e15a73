//! Percentage of the center line covered by blocker footprints.

use super::{CoverEvaluator, Evaluation, EvaluationInput, EvaluatorKind};
use crate::geometry::segment_rect_penetration_length;
use crate::state::CoverCategory;

pub const GREATER_THRESHOLD_PCT: f64 = 75.0;
pub const STANDARD_THRESHOLD_PCT: f64 = 50.0;
pub const LESSER_THRESHOLD_PCT: f64 = 20.0;

/// Sums each blocker's penetration as a share of its longer side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoverageEvaluator;

impl CoverageEvaluator {
    pub fn category_for(pct: f64) -> CoverCategory {
        if pct >= GREATER_THRESHOLD_PCT {
            CoverCategory::Greater
        } else if pct >= STANDARD_THRESHOLD_PCT {
            CoverCategory::Standard
        } else if pct >= LESSER_THRESHOLD_PCT {
            CoverCategory::Lesser
        } else {
            CoverCategory::None
        }
    }
}

impl CoverEvaluator for CoverageEvaluator {
    fn kind(&self) -> EvaluatorKind {
        EvaluatorKind::Coverage
    }

    fn evaluate(&self, input: &EvaluationInput<'_>) -> Evaluation {
        let from = input.attacker.center();
        let to = input.target.center();

        let mut total = 0.0;
        let mut contributors = Vec::new();
        for blocker in input.blockers {
            let length = segment_rect_penetration_length(from, to, &blocker.rect);
            if length <= 0.0 {
                continue;
            }
            // Zero-size footprints floor to one pixel.
            total += length / blocker.rect.longer_side().max(1.0) * 100.0;
            contributors.push(blocker.id);
        }

        let pct = f64::min(total, 100.0);
        let category = Self::category_for(pct);
        tracing::trace!(pct, %category, "coverage");
        Evaluation {
            category,
            contributors,
        }
    }
}
