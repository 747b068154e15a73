//! Elevation gate.
//!
//! Narrows candidate blockers to those whose vertical span actually meets the
//! 3-D sight line at the blocker's horizontal position. The intersection mode
//! picks one of four interpolation strategies. Every strategy fails open: a
//! blocker is kept whenever the elevation data it needs is missing.

use crate::config::IntersectionMode;
use crate::geometry::{SightLine, VerticalSpan};
use crate::state::Entity;

/// Tolerance band used by [`ElevationPolicy::Moderate`], in feet.
pub const MODERATE_TOLERANCE_FT: f64 = 3.0;

/// Tolerance band used by [`ElevationPolicy::Tactical`], in feet.
pub const TACTICAL_TOLERANCE_FT: f64 = 1.0;

/// Interpolation strategy for deciding whether a blocker spans the sight line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ElevationPolicy {
    /// Single line between the two center elevations.
    CenterToCenter,
    /// Full range swept by every top/bottom combination of the combatants.
    Permissive,
    /// Center line with a ±3 ft band.
    Moderate,
    /// Every corner pair, center elevations, ±1 ft band; any pair suffices.
    Tactical,
}

impl ElevationPolicy {
    /// Strategy used for a given intersection mode.
    pub const fn for_mode(mode: IntersectionMode) -> Self {
        match mode {
            IntersectionMode::CenterToCenter => Self::CenterToCenter,
            IntersectionMode::Permissive => Self::Permissive,
            IntersectionMode::Coverage => Self::Moderate,
            IntersectionMode::Tactical => Self::Tactical,
        }
    }

    /// True when `blocker` spans the sight line from `attacker` to `target`.
    pub fn admits(self, attacker: &Entity, target: &Entity, blocker: &Entity) -> bool {
        let Some(span) = blocker.vertical_span else {
            return true;
        };

        let admitted = match self {
            Self::CenterToCenter => center_line(attacker, target, blocker, span, 0.0),
            Self::Moderate => center_line(attacker, target, blocker, span, MODERATE_TOLERANCE_FT),
            Self::Permissive => swept_range(attacker, target, blocker, span),
            Self::Tactical => corner_pairs(attacker, target, blocker, span),
        };

        admitted.unwrap_or(true)
    }

    /// Keeps only the blockers this strategy admits, preserving order.
    pub fn filter<'b>(
        self,
        attacker: &Entity,
        target: &Entity,
        blockers: impl IntoIterator<Item = &'b Entity>,
    ) -> Vec<&'b Entity> {
        blockers
            .into_iter()
            .filter(|blocker| {
                let keep = self.admits(attacker, target, blocker);
                if !keep {
                    tracing::trace!(blocker = %blocker.id, policy = %self, "blocker below or above sight line");
                }
                keep
            })
            .collect()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn center_line(
    attacker: &Entity,
    target: &Entity,
    blocker: &Entity,
    span: VerticalSpan,
    tolerance: f64,
) -> Option<bool> {
    let from = attacker.center_elevation()?;
    let to = target.center_elevation()?;
    let t = SightLine::new(attacker.center(), target.center()).progress(blocker.center());
    let elevation = lerp(from, to, t);
    Some(span.overlaps(elevation - tolerance, elevation + tolerance))
}

fn swept_range(
    attacker: &Entity,
    target: &Entity,
    blocker: &Entity,
    span: VerticalSpan,
) -> Option<bool> {
    let a = attacker.vertical_span?;
    let b = target.vertical_span?;
    let t = SightLine::new(attacker.center(), target.center()).progress(blocker.center());

    let samples = [
        lerp(a.bottom, b.bottom, t),
        lerp(a.bottom, b.top, t),
        lerp(a.top, b.bottom, t),
        lerp(a.top, b.top, t),
    ];
    let lo = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(span.overlaps(lo, hi))
}

fn corner_pairs(
    attacker: &Entity,
    target: &Entity,
    blocker: &Entity,
    span: VerticalSpan,
) -> Option<bool> {
    let from = attacker.center_elevation()?;
    let to = target.center_elevation()?;
    let center = blocker.center();

    let any = attacker.rect.corners().iter().any(|&ac| {
        target.rect.corners().iter().any(|&tc| {
            let elevation = lerp(from, to, SightLine::new(ac, tc).progress(center));
            span.overlaps(
                elevation - TACTICAL_TOLERANCE_FT,
                elevation + TACTICAL_TOLERANCE_FT,
            )
        })
    });
    Some(any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};
    use crate::state::EntityId;

    fn token(id: u32, cx: f64, span: Option<VerticalSpan>) -> Entity {
        let mut e = Entity::new(EntityId(id), Rect::centered(Point::new(cx, 0.0), 100.0, 100.0));
        e.vertical_span = span;
        e
    }

    fn ground(height: f64) -> Option<VerticalSpan> {
        Some(VerticalSpan::from_height(0.0, height))
    }

    #[test]
    fn blocker_on_the_ground_between_grounded_combatants_is_admitted() {
        let attacker = token(1, 0.0, ground(5.0));
        let target = token(2, 1000.0, ground(5.0));
        let blocker = token(3, 500.0, ground(5.0));

        for policy in [
            ElevationPolicy::CenterToCenter,
            ElevationPolicy::Permissive,
            ElevationPolicy::Moderate,
            ElevationPolicy::Tactical,
        ] {
            assert!(policy.admits(&attacker, &target, &blocker), "{policy}");
        }
    }

    #[test]
    fn flying_combatants_ignore_grounded_blocker_on_center_line() {
        let attacker = token(1, 0.0, Some(VerticalSpan::from_height(30.0, 5.0)));
        let target = token(2, 1000.0, Some(VerticalSpan::from_height(30.0, 5.0)));
        let blocker = token(3, 500.0, ground(5.0));

        assert!(!ElevationPolicy::CenterToCenter.admits(&attacker, &target, &blocker));
        assert!(!ElevationPolicy::Moderate.admits(&attacker, &target, &blocker));
        assert!(!ElevationPolicy::Tactical.admits(&attacker, &target, &blocker));
        assert!(!ElevationPolicy::Permissive.admits(&attacker, &target, &blocker));
    }

    #[test]
    fn moderate_band_reaches_three_feet() {
        // Sight line runs at 7.5 ft; blocker top at 5 ft is 2.5 ft below it.
        let attacker = token(1, 0.0, Some(VerticalSpan::from_height(5.0, 5.0)));
        let target = token(2, 1000.0, Some(VerticalSpan::from_height(5.0, 5.0)));
        let blocker = token(3, 500.0, ground(5.0));

        assert!(!ElevationPolicy::CenterToCenter.admits(&attacker, &target, &blocker));
        assert!(ElevationPolicy::Moderate.admits(&attacker, &target, &blocker));
    }

    #[test]
    fn tactical_band_reaches_one_foot() {
        // Sight line runs at 7.5 ft for every corner pair.
        let attacker = token(1, 0.0, Some(VerticalSpan::from_height(5.0, 5.0)));
        let target = token(2, 1000.0, Some(VerticalSpan::from_height(5.0, 5.0)));
        let half_foot_below = token(3, 500.0, ground(7.0));
        let foot_and_a_half_below = token(4, 500.0, ground(6.0));

        assert!(ElevationPolicy::Tactical.admits(&attacker, &target, &half_foot_below));
        assert!(!ElevationPolicy::CenterToCenter.admits(&attacker, &target, &half_foot_below));

        assert!(!ElevationPolicy::Tactical.admits(&attacker, &target, &foot_and_a_half_below));
        assert!(ElevationPolicy::Moderate.admits(&attacker, &target, &foot_and_a_half_below));
    }

    #[test]
    fn tactical_interpolates_along_each_corner_line() {
        // Line rises from 0 ft to 20 ft. The center line is at 10 ft over the
        // blocker; the corner line (-50,-50) -> (950,-50) is at about 11.05 ft.
        let attacker = token(1, 0.0, Some(VerticalSpan::new(0.0, 0.0)));
        let target = token(2, 1000.0, Some(VerticalSpan::new(20.0, 20.0)));
        let blocker = token(3, 500.0, Some(VerticalSpan::new(11.5, 12.0)));

        assert!(ElevationPolicy::Tactical.admits(&attacker, &target, &blocker));
        assert!(!ElevationPolicy::CenterToCenter.admits(&attacker, &target, &blocker));

        let higher = token(4, 500.0, Some(VerticalSpan::new(12.5, 13.0)));
        assert!(!ElevationPolicy::Tactical.admits(&attacker, &target, &higher));
    }

    #[test]
    fn permissive_uses_the_swept_range() {
        // Attacker spans 10..40, target 10..40; blocker 0..12 overlaps the bottom edge.
        let attacker = token(1, 0.0, Some(VerticalSpan::new(10.0, 40.0)));
        let target = token(2, 1000.0, Some(VerticalSpan::new(10.0, 40.0)));
        let blocker = token(3, 500.0, Some(VerticalSpan::new(0.0, 12.0)));

        assert!(ElevationPolicy::Permissive.admits(&attacker, &target, &blocker));
        assert!(!ElevationPolicy::CenterToCenter.admits(&attacker, &target, &blocker));
    }

    #[test]
    fn interpolation_follows_the_slope() {
        // Line from 0 ft to 20 ft; halfway it is at 10 ft.
        let attacker = token(1, 0.0, Some(VerticalSpan::new(0.0, 0.0)));
        let target = token(2, 1000.0, Some(VerticalSpan::new(20.0, 20.0)));
        let at_ten = token(3, 500.0, Some(VerticalSpan::new(9.0, 11.0)));
        let too_low = token(4, 500.0, Some(VerticalSpan::new(0.0, 5.0)));

        assert!(ElevationPolicy::CenterToCenter.admits(&attacker, &target, &at_ten));
        assert!(!ElevationPolicy::CenterToCenter.admits(&attacker, &target, &too_low));
    }

    #[test]
    fn missing_elevation_fails_open() {
        let attacker = token(1, 0.0, None);
        let target = token(2, 1000.0, ground(5.0));
        let blocker = token(3, 500.0, Some(VerticalSpan::new(100.0, 105.0)));
        let no_span = token(4, 500.0, None);

        for policy in [
            ElevationPolicy::CenterToCenter,
            ElevationPolicy::Permissive,
            ElevationPolicy::Moderate,
            ElevationPolicy::Tactical,
        ] {
            assert!(policy.admits(&attacker, &target, &blocker));
            assert!(policy.admits(&attacker, &target, &no_span));
        }
    }

    #[test]
    fn filter_preserves_order() {
        let attacker = token(1, 0.0, ground(5.0));
        let target = token(2, 1000.0, ground(5.0));
        let a = token(3, 300.0, ground(5.0));
        let high = token(4, 500.0, Some(VerticalSpan::new(50.0, 60.0)));
        let b = token(5, 700.0, ground(5.0));

        let kept = ElevationPolicy::CenterToCenter.filter(&attacker, &target, [&a, &high, &b]);
        let ids: Vec<_> = kept.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(3), EntityId(5)]);
    }

    #[test]
    fn mode_mapping() {
        assert_eq!(
            ElevationPolicy::for_mode(IntersectionMode::Coverage),
            ElevationPolicy::Moderate
        );
        assert_eq!(
            ElevationPolicy::for_mode(IntersectionMode::Tactical),
            ElevationPolicy::Tactical
        );
    }
}
