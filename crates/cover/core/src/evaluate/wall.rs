//! Cover from walls crossing the center line.
//!
//! Manual wall overrides short-circuit everything else. Otherwise the
//! evaluator classifies the obstruction and, for blocking terrain, estimates
//! how much of the target's perimeter the walls hide from the attacker.

use crate::config::CoverSettings;
use crate::error::degrade;
use crate::geometry::{Point, Rect, SightLine, segment_rect_penetration_length};
use crate::result::{CoverResult, OverrideSource};
use crate::state::{CoverCategory, Entity, WallId, WallSegment};
use crate::walls::{active_override, effective_blocks, wall_crossing};

/// A wall must cross a sample ray this far before the sample to block it.
pub const WALL_SAMPLE_TOLERANCE_PX: f64 = 1.0;

/// Evenly spaced points taken along each edge, corners excluded.
const EDGE_SAMPLES: usize = 5;

/// Maps a perimeter coverage percentage to a category.
///
/// Only called once blocking terrain is known to cross the center line, so
/// anything below the standard threshold still floors to standard.
pub fn category_for_wall_coverage(pct: f64, settings: &CoverSettings) -> CoverCategory {
    if settings.wall_cover_allow_greater && pct >= settings.wall_cover_greater_threshold_pct {
        return CoverCategory::Greater;
    }
    if pct < settings.wall_cover_standard_threshold_pct {
        tracing::trace!(pct, "below standard threshold, flooring to standard");
    }
    CoverCategory::Standard
}

/// Outcome of the wall path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WallVerdict {
    /// A manual override on `wall` decided the category.
    Override { category: CoverCategory, wall: WallId },
    /// Nothing crosses the line.
    Clear,
    /// Only creatures stand on the line.
    CreatureSpace,
    /// Walls hide `coverage_pct` of the target's perimeter.
    Terrain { category: CoverCategory, coverage_pct: f64 },
}

impl WallVerdict {
    pub fn category(&self) -> CoverCategory {
        match *self {
            Self::Override { category, .. } | Self::Terrain { category, .. } => category,
            Self::Clear => CoverCategory::None,
            Self::CreatureSpace => CoverCategory::Lesser,
        }
    }

    pub fn into_result(self) -> CoverResult {
        match self {
            Self::Override { category, wall } => {
                CoverResult::overridden(category, None, OverrideSource::Wall(wall))
            }
            other => CoverResult::computed(other.category()),
        }
    }
}

/// Wall-path evaluator configured from the current settings.
#[derive(Clone, Copy, Debug)]
pub struct WallCoverEvaluator<'s> {
    settings: &'s CoverSettings,
}

impl<'s> WallCoverEvaluator<'s> {
    pub fn new(settings: &'s CoverSettings) -> Self {
        Self { settings }
    }

    pub fn evaluate(
        &self,
        attacker: &Entity,
        target: &Entity,
        walls: &[WallSegment],
        blockers: &[&Entity],
    ) -> WallVerdict {
        let origin = attacker.center();
        let line = SightLine::new(origin, target.center())
            .with_elevations(attacker.center_elevation(), target.center_elevation());

        let crossing: Vec<&WallSegment> = walls
            .iter()
            .filter(|wall| crosses(wall, &line))
            .collect();

        if let Some((wall, category)) = highest_override(&crossing, origin) {
            tracing::debug!(%wall, %category, "wall override");
            return WallVerdict::Override { category, wall };
        }

        let terrain = crossing.iter().any(|wall| effective_blocks(wall, origin));
        if !terrain {
            let creature_space = blockers.iter().any(|blocker| {
                segment_rect_penetration_length(line.from, line.to, &blocker.rect) > 0.0
            });
            return if creature_space {
                WallVerdict::CreatureSpace
            } else {
                WallVerdict::Clear
            };
        }

        let coverage_pct = self.perimeter_coverage(attacker, target, walls);
        let category = category_for_wall_coverage(coverage_pct, self.settings);
        tracing::debug!(coverage_pct, %category, "wall coverage");
        WallVerdict::Terrain {
            category,
            coverage_pct,
        }
    }

    /// Percentage of perimeter samples hidden from the attacker's center.
    pub fn perimeter_coverage(&self, attacker: &Entity, target: &Entity, walls: &[WallSegment]) -> f64 {
        let origin = attacker.center();
        let blocking: Vec<&WallSegment> = walls
            .iter()
            .filter(|wall| effective_blocks(wall, origin))
            .collect();

        let samples = perimeter_samples(&target.rect);
        let blocked = samples
            .iter()
            .filter(|&&sample| {
                let ray = SightLine::new(origin, sample)
                    .with_elevations(attacker.center_elevation(), target.center_elevation());
                blocking.iter().any(|wall| blocks_before(wall, &ray))
            })
            .count();

        blocked as f64 / samples.len() as f64 * 100.0
    }
}

fn crosses(wall: &WallSegment, line: &SightLine) -> bool {
    match wall_crossing(wall, line) {
        Ok(hit) => hit.is_some(),
        Err(e) => degrade(e, false),
    }
}

/// True when `wall` crosses `ray` more than the tolerance before its end.
fn blocks_before(wall: &WallSegment, ray: &SightLine) -> bool {
    match wall_crossing(wall, ray) {
        Ok(Some(hit)) => ray.from.distance(hit) < ray.length() - WALL_SAMPLE_TOLERANCE_PX,
        Ok(None) => false,
        Err(e) => degrade(e, false),
    }
}

/// Highest active override among `walls`; the first wall wins ties.
fn highest_override(walls: &[&WallSegment], origin: Point) -> Option<(WallId, CoverCategory)> {
    let mut best: Option<(WallId, CoverCategory)> = None;
    for wall in walls {
        let Some(category) = active_override(wall, origin) else {
            continue;
        };
        match best {
            Some((_, current)) if current >= category => {}
            _ => best = Some((wall.id, category)),
        }
    }
    best
}

/// Four corners, five interior points per edge, and the center.
pub(crate) fn perimeter_samples(rect: &Rect) -> Vec<Point> {
    let corners = rect.corners();
    let mut samples = Vec::with_capacity(4 + 4 * EDGE_SAMPLES + 1);
    samples.extend_from_slice(&corners);

    for i in 0..corners.len() {
        let from = corners[i];
        let to = corners[(i + 1) % corners.len()];
        for step in 1..=EDGE_SAMPLES {
            samples.push(from.lerp(to, step as f64 / (EDGE_SAMPLES + 1) as f64));
        }
    }

    samples.push(rect.center());
    samples
}
