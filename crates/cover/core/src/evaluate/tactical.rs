//! Corner-to-corner line counting.

use super::{CoverEvaluator, Evaluation, EvaluationInput, EvaluatorKind};
use crate::error::degrade;
use crate::geometry::{Point, SightLine, segment_rect_penetration_length};
use crate::state::{CoverCategory, Entity, EntityId, WallSegment};
use crate::walls::{effective_blocks, wall_crossing};

/// Lines that only run along a blocker's edge do not count as blocked.
pub const GRAZE_TOLERANCE_PX: f64 = 1e-6;

/// The attacker picks the corner of its footprint with the fewest blocked
/// lines to the target's corners; that count maps to the category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TacticalEvaluator;

impl TacticalEvaluator {
    /// Blocked lines from `corner` to each target corner, plus the blockers involved.
    fn count_from(&self, corner: Point, input: &EvaluationInput<'_>) -> (usize, Vec<EntityId>) {
        let mut blocked = 0;
        let mut contributors = Vec::new();

        for target_corner in input.target.rect.corners() {
            let line = SightLine::new(corner, target_corner).with_elevations(
                input.attacker.center_elevation(),
                input.target.center_elevation(),
            );

            let by_wall = input
                .walls
                .iter()
                .any(|wall| wall_blocks_line(wall, corner, &line));

            let mut by_token = false;
            for blocker in input.blockers {
                if token_blocks_line(blocker, &line) {
                    by_token = true;
                    if !contributors.contains(&blocker.id) {
                        contributors.push(blocker.id);
                    }
                }
            }

            if by_wall || by_token {
                blocked += 1;
            }
        }

        (blocked, contributors)
    }
}

fn wall_blocks_line(wall: &WallSegment, origin: Point, line: &SightLine) -> bool {
    if !effective_blocks(wall, origin) {
        return false;
    }
    match wall_crossing(wall, line) {
        Ok(hit) => hit.is_some(),
        Err(e) => degrade(e, false),
    }
}

fn token_blocks_line(blocker: &Entity, line: &SightLine) -> bool {
    let interior = blocker.rect.inset(GRAZE_TOLERANCE_PX);
    segment_rect_penetration_length(line.from, line.to, &interior) > 0.0
}

impl CoverEvaluator for TacticalEvaluator {
    fn kind(&self) -> EvaluatorKind {
        EvaluatorKind::Tactical
    }

    fn evaluate(&self, input: &EvaluationInput<'_>) -> Evaluation {
        let mut best: Option<(CoverCategory, Vec<EntityId>)> = None;

        for corner in input.attacker.rect.corners() {
            let (blocked, contributors) = self.count_from(corner, input);
            let category = CoverCategory::from_blocked_lines(blocked);
            tracing::trace!(%corner, blocked, %category, "attacker corner");

            // Strictly lower only: ties keep the earlier corner.
            let better = match &best {
                Some((current, _)) => category < *current,
                None => true,
            };
            if better {
                best = Some((category, contributors));
            }
        }

        match best {
            Some((category, contributors)) => Evaluation {
                category,
                contributors,
            },
            None => Evaluation::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::state::WallId;

    fn token(id: u32, x1: f64, y1: f64, x2: f64, y2: f64) -> Entity {
        Entity::new(EntityId(id), Rect::new(x1, y1, x2, y2))
    }

    fn evaluate(attacker: &Entity, target: &Entity, blockers: &[&Entity], walls: &[WallSegment]) -> Evaluation {
        TacticalEvaluator.evaluate(&EvaluationInput {
            attacker,
            target,
            blockers,
            walls,
            target_has_large_creature_feat: false,
        })
    }

    #[test]
    fn blocker_in_the_middle_blocks_two_lines_per_corner() {
        let attacker = token(1, -50.0, -50.0, 50.0, 50.0);
        let blocker = token(3, 450.0, -50.0, 550.0, 50.0);
        let target = token(2, 950.0, -50.0, 1050.0, 50.0);

        let evaluation = evaluate(&attacker, &target, &[&blocker], &[]);
        assert_eq!(evaluation.category, CoverCategory::Standard);
        assert_eq!(evaluation.contributors, vec![EntityId(3)]);
    }

    #[test]
    fn attacker_picks_the_least_obstructed_corner() {
        // Corner counts: (0,0)=2, (100,0)=3, (100,100)=0, (0,100)=1.
        let attacker = token(1, 0.0, 0.0, 100.0, 100.0);
        let target = token(2, 500.0, 0.0, 600.0, 100.0);
        let wall = WallSegment::new(WallId(1), Point::new(300.0, -200.0), Point::new(300.0, 45.0));

        let tactical = TacticalEvaluator;
        let input = EvaluationInput {
            attacker: &attacker,
            target: &target,
            blockers: &[],
            walls: core::slice::from_ref(&wall),
            target_has_large_creature_feat: false,
        };
        let counts: Vec<usize> = attacker
            .rect
            .corners()
            .iter()
            .map(|&corner| tactical.count_from(corner, &input).0)
            .collect();
        assert_eq!(counts, vec![2, 3, 0, 1]);

        assert_eq!(tactical.evaluate(&input).category, CoverCategory::None);
    }

    #[test]
    fn open_door_does_not_block_corner_lines() {
        let attacker = token(1, 0.0, 0.0, 100.0, 100.0);
        let target = token(2, 500.0, 0.0, 600.0, 100.0);
        let door = WallSegment::new(WallId(1), Point::new(300.0, -500.0), Point::new(300.0, 500.0))
            .with_door(crate::state::DoorState::Open);

        let evaluation = evaluate(&attacker, &target, &[], core::slice::from_ref(&door));
        assert_eq!(evaluation.category, CoverCategory::None);
    }

    #[test]
    fn full_wall_gives_greater() {
        let attacker = token(1, 0.0, 0.0, 100.0, 100.0);
        let target = token(2, 500.0, 0.0, 600.0, 100.0);
        let wall = WallSegment::new(WallId(1), Point::new(300.0, -500.0), Point::new(300.0, 500.0));

        let evaluation = evaluate(&attacker, &target, &[], core::slice::from_ref(&wall));
        assert_eq!(evaluation.category, CoverCategory::Greater);
        assert!(evaluation.contributors.is_empty());
    }

    #[test]
    fn no_blockers_no_cover() {
        let attacker = token(1, 0.0, 0.0, 100.0, 100.0);
        let target = token(2, 500.0, 0.0, 600.0, 100.0);
        assert_eq!(evaluate(&attacker, &target, &[], &[]), Evaluation::none());
    }
}
