//! Creature size comparison.

use super::{CoverEvaluator, Evaluation, EvaluationInput, EvaluatorKind};
use crate::geometry::{Point, segment_rect_penetration_length, segment_touches_rect};
use crate::state::{CoverCategory, Entity};

/// Size ranks a blocker must exceed the combatants by to give standard cover.
pub const STANDARD_RANK_GAP: i32 = 2;

/// How a blocker must meet the center line to count as intersecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeRankContact {
    /// Any contact, boundary included.
    Touch,
    /// The line must pass through a strictly positive length of the footprint.
    Penetrate,
}

impl SizeRankContact {
    fn meets(self, from: Point, to: Point, blocker: &Entity) -> bool {
        match self {
            Self::Touch => segment_touches_rect(from, to, &blocker.rect),
            Self::Penetrate => segment_rect_penetration_length(from, to, &blocker.rect) > 0.0,
        }
    }
}

/// Blockers much larger than both combatants give standard cover; any
/// other intersecting blocker gives lesser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreatureSizeRankEvaluator {
    contact: SizeRankContact,
}

impl CreatureSizeRankEvaluator {
    pub const fn new(contact: SizeRankContact) -> Self {
        Self { contact }
    }

    fn qualifies_for_standard(input: &EvaluationInput<'_>, blocker: &Entity) -> bool {
        let over_target = blocker.size.ranks_above(input.target.size) >= STANDARD_RANK_GAP;
        if input.target_has_large_creature_feat && over_target {
            return true;
        }
        over_target && blocker.size.ranks_above(input.attacker.size) >= STANDARD_RANK_GAP
    }
}

impl CoverEvaluator for CreatureSizeRankEvaluator {
    fn kind(&self) -> EvaluatorKind {
        EvaluatorKind::CreatureSizeRank
    }

    fn evaluate(&self, input: &EvaluationInput<'_>) -> Evaluation {
        let from = input.attacker.center();
        let to = input.target.center();

        let mut category = CoverCategory::None;
        let mut contributors = Vec::new();
        for blocker in input.blockers {
            if !self.contact.meets(from, to, blocker) {
                continue;
            }
            contributors.push(blocker.id);
            let granted = if Self::qualifies_for_standard(input, blocker) {
                CoverCategory::Standard
            } else {
                CoverCategory::Lesser
            };
            category = category.max(granted);
        }

        Evaluation {
            category,
            contributors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::state::{EntityId, SizeRank};

    fn token(id: u32, x1: f64, y1: f64, x2: f64, y2: f64, size: SizeRank) -> Entity {
        Entity::new(EntityId(id), Rect::new(x1, y1, x2, y2)).with_size(size)
    }

    fn run(
        contact: SizeRankContact,
        attacker_size: SizeRank,
        target_size: SizeRank,
        blockers: &[&Entity],
        feat: bool,
    ) -> Evaluation {
        let attacker = token(1, -50.0, -50.0, 50.0, 50.0, attacker_size);
        let target = token(2, 950.0, -50.0, 1050.0, 50.0, target_size);
        CreatureSizeRankEvaluator::new(contact).evaluate(&EvaluationInput {
            attacker: &attacker,
            target: &target,
            blockers,
            walls: &[],
            target_has_large_creature_feat: feat,
        })
    }

    #[test]
    fn same_size_blocker_gives_lesser() {
        let blocker = token(3, 450.0, -50.0, 550.0, 50.0, SizeRank::Medium);
        let evaluation = run(SizeRankContact::Penetrate, SizeRank::Medium, SizeRank::Medium, &[&blocker], false);
        assert_eq!(evaluation.category, CoverCategory::Lesser);
        assert_eq!(evaluation.contributors, vec![EntityId(3)]);
    }

    #[test]
    fn huge_blocker_between_mediums_gives_standard() {
        let blocker = token(3, 400.0, -100.0, 600.0, 100.0, SizeRank::Huge);
        let evaluation = run(SizeRankContact::Penetrate, SizeRank::Medium, SizeRank::Medium, &[&blocker], false);
        assert_eq!(evaluation.category, CoverCategory::Standard);
    }

    #[test]
    fn blocker_must_outrank_both_combatants() {
        let blocker = token(3, 400.0, -100.0, 600.0, 100.0, SizeRank::Huge);
        let evaluation = run(SizeRankContact::Penetrate, SizeRank::Large, SizeRank::Medium, &[&blocker], false);
        assert_eq!(evaluation.category, CoverCategory::Lesser);
    }

    #[test]
    fn large_creature_feat_only_compares_against_the_target() {
        let blocker = token(3, 400.0, -100.0, 600.0, 100.0, SizeRank::Huge);
        let evaluation = run(SizeRankContact::Penetrate, SizeRank::Large, SizeRank::Medium, &[&blocker], true);
        assert_eq!(evaluation.category, CoverCategory::Standard);
    }

    #[test]
    fn line_along_an_edge_counts_for_both_rules() {
        // Bottom edge sits exactly on the center line y = 0.
        let blocker = token(3, 450.0, -100.0, 550.0, 0.0, SizeRank::Medium);
        assert_eq!(
            run(SizeRankContact::Touch, SizeRank::Medium, SizeRank::Medium, &[&blocker], false).category,
            CoverCategory::Lesser
        );

        assert_eq!(
            run(SizeRankContact::Penetrate, SizeRank::Medium, SizeRank::Medium, &[&blocker], false).category,
            CoverCategory::Lesser
        );
    }

    #[test]
    fn single_point_contact_only_counts_when_touching_is_enough() {
        // Diagonal line y = x meets this footprint only at its corner (500, 500).
        let attacker = token(1, -50.0, -50.0, 50.0, 50.0, SizeRank::Medium);
        let target = token(2, 950.0, 950.0, 1050.0, 1050.0, SizeRank::Medium);
        let corner = token(3, 500.0, 400.0, 600.0, 500.0, SizeRank::Medium);
        let blockers = [&corner];
        let input = EvaluationInput {
            attacker: &attacker,
            target: &target,
            blockers: &blockers,
            walls: &[],
            target_has_large_creature_feat: false,
        };

        let touch = CreatureSizeRankEvaluator::new(SizeRankContact::Touch).evaluate(&input);
        assert_eq!(touch.category, CoverCategory::Lesser);

        let penetrate = CreatureSizeRankEvaluator::new(SizeRankContact::Penetrate).evaluate(&input);
        assert_eq!(penetrate, Evaluation::none());
    }

    #[test]
    fn off_line_blockers_are_ignored() {
        let blocker = token(3, 450.0, 300.0, 550.0, 400.0, SizeRank::Gargantuan);
        let evaluation = run(SizeRankContact::Touch, SizeRank::Medium, SizeRank::Medium, &[&blocker], false);
        assert_eq!(evaluation, Evaluation::none());
    }
}
