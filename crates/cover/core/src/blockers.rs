//! Admissible blocker selection.
//!
//! Builds the set of tokens that may contribute cover between an attacker
//! and a target. Exclusions are checked in a fixed order, but the order only
//! matters for short-circuiting: the admissible set is the same either way.

use crate::config::{CoverSettings, Perspective};
use crate::env::SceneOracle;
use crate::geometry::same_grid_cell;
use crate::state::Entity;

/// Why a candidate was left out of the blocker set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Exclusion {
    /// The candidate is the attacker or the target.
    Combatant,
    /// Selected or controlled by the querying user.
    Controlled,
    /// Hidden from the canvas.
    Hidden,
    Undetected,
    Dead,
    Prone,
    Ally,
    /// Loot piles and hazards never block.
    NotACreature,
    /// Shares a grid cell with the attacker or the target.
    SameCell,
    /// Tiny creatures cannot shield larger targets.
    TinyVersusLarger,
}

/// Applies the configured exclusion rules to scene tokens.
#[derive(Clone, Copy, Debug)]
pub struct BlockerSelector<'s> {
    settings: &'s CoverSettings,
    grid_size: f64,
}

impl<'s> BlockerSelector<'s> {
    pub fn new(settings: &'s CoverSettings, grid_size: f64) -> Self {
        Self {
            settings,
            grid_size,
        }
    }

    /// First rule that excludes `candidate`, or `None` when it may block.
    pub fn exclusion<S>(
        &self,
        scene: &S,
        attacker: &Entity,
        target: &Entity,
        candidate: &Entity,
    ) -> Option<Exclusion>
    where
        S: SceneOracle + ?Sized,
    {
        // A point origin is not a token, so no scene entity can be it.
        let is_attacker = candidate.id == attacker.id && !attacker.id.is_origin();
        if is_attacker || candidate.id == target.id {
            return Some(Exclusion::Combatant);
        }
        if scene.is_controlled(candidate.id) {
            return Some(Exclusion::Controlled);
        }
        if candidate.is_hidden() {
            return Some(Exclusion::Hidden);
        }
        if self.settings.ignore_undetected {
            let observer = match self.settings.undetected_perspective {
                Perspective::Attacker => attacker.id,
                Perspective::Target => target.id,
            };
            if scene.is_undetected(candidate.id, observer) {
                return Some(Exclusion::Undetected);
            }
        }
        if self.settings.ignore_dead && candidate.is_dead() {
            return Some(Exclusion::Dead);
        }
        if !self.settings.allow_prone_blockers && candidate.is_prone() {
            return Some(Exclusion::Prone);
        }
        if self.settings.ignore_allies && candidate.alliance == attacker.alliance {
            return Some(Exclusion::Ally);
        }
        if !candidate.is_creature() {
            return Some(Exclusion::NotACreature);
        }
        if same_grid_cell(&candidate.rect, &attacker.rect, self.grid_size)
            || same_grid_cell(&candidate.rect, &target.rect, self.grid_size)
        {
            return Some(Exclusion::SameCell);
        }
        if candidate.size.is_tiny() && !target.size.is_tiny() {
            return Some(Exclusion::TinyVersusLarger);
        }
        None
    }

    /// Admissible blockers among `candidates`, in their original order.
    pub fn select<S>(
        &self,
        scene: &S,
        attacker: &Entity,
        target: &Entity,
        candidates: &[Entity],
    ) -> Vec<Entity>
    where
        S: SceneOracle + ?Sized,
    {
        candidates
            .iter()
            .filter(|candidate| match self.exclusion(scene, attacker, target, candidate) {
                Some(reason) => {
                    tracing::trace!(candidate = %candidate.id, %reason, "blocker excluded");
                    false
                }
                None => true,
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SceneSnapshot;
    use crate::geometry::{Point, Rect};
    use crate::state::{Alliance, EntityFlags, EntityId, EntityKind, SizeRank};

    fn cell(id: u32, col: f64) -> Entity {
        Entity::new(
            EntityId(id),
            Rect::new(col * 100.0, 0.0, col * 100.0 + 100.0, 100.0),
        )
    }

    fn combatants() -> (Entity, Entity) {
        (
            cell(1, 0.0).with_alliance(Alliance::Party),
            cell(2, 10.0).with_alliance(Alliance::Opposition),
        )
    }

    fn check(settings: &CoverSettings, scene: &SceneSnapshot, candidate: &Entity) -> Option<Exclusion> {
        let (attacker, target) = combatants();
        BlockerSelector::new(settings, scene.grid_size).exclusion(scene, &attacker, &target, candidate)
    }

    #[test]
    fn plain_creature_between_combatants_is_admitted() {
        let settings = CoverSettings::default();
        let scene = SceneSnapshot::default();
        assert_eq!(check(&settings, &scene, &cell(3, 5.0)), None);
    }

    #[test]
    fn combatants_and_controlled_tokens_are_excluded() {
        let settings = CoverSettings::default();
        let scene = SceneSnapshot::default().with_controlled(EntityId(3));
        assert_eq!(check(&settings, &scene, &cell(1, 5.0)), Some(Exclusion::Combatant));
        assert_eq!(check(&settings, &scene, &cell(3, 5.0)), Some(Exclusion::Controlled));
    }

    #[test]
    fn hidden_tokens_are_always_excluded() {
        let settings = CoverSettings::default();
        let scene = SceneSnapshot::default();
        let hidden = cell(3, 5.0).with_flags(EntityFlags::HIDDEN);
        assert_eq!(check(&settings, &scene, &hidden), Some(Exclusion::Hidden));
    }

    #[test]
    fn undetected_rule_uses_configured_perspective() {
        let scene = SceneSnapshot::default().with_undetected(EntityId(3), EntityId(2));
        let blocker = cell(3, 5.0);

        let mut settings = CoverSettings::default();
        assert_eq!(check(&settings, &scene, &blocker), None);

        settings.ignore_undetected = true;
        assert_eq!(check(&settings, &scene, &blocker), None);

        settings.undetected_perspective = Perspective::Target;
        assert_eq!(check(&settings, &scene, &blocker), Some(Exclusion::Undetected));
    }

    #[test]
    fn dead_and_prone_follow_settings() {
        let scene = SceneSnapshot::default();
        let dead = cell(3, 5.0).with_hit_points(0);
        let prone = cell(4, 6.0).with_flags(EntityFlags::PRONE);

        let mut settings = CoverSettings::default();
        assert_eq!(check(&settings, &scene, &dead), Some(Exclusion::Dead));
        assert_eq!(check(&settings, &scene, &prone), None);

        settings.ignore_dead = false;
        settings.allow_prone_blockers = false;
        assert_eq!(check(&settings, &scene, &dead), None);
        assert_eq!(check(&settings, &scene, &prone), Some(Exclusion::Prone));
    }

    #[test]
    fn allies_of_the_attacker_are_skipped_when_configured() {
        let scene = SceneSnapshot::default();
        let ally = cell(3, 5.0).with_alliance(Alliance::Party);
        let mut settings = CoverSettings::default();
        assert_eq!(check(&settings, &scene, &ally), None);
        settings.ignore_allies = true;
        assert_eq!(check(&settings, &scene, &ally), Some(Exclusion::Ally));
    }

    #[test]
    fn loot_and_hazards_never_block() {
        let settings = CoverSettings::default();
        let scene = SceneSnapshot::default();
        let loot = cell(3, 5.0).with_kind(EntityKind::Loot);
        let hazard = cell(4, 6.0).with_kind(EntityKind::Hazard);
        assert_eq!(check(&settings, &scene, &loot), Some(Exclusion::NotACreature));
        assert_eq!(check(&settings, &scene, &hazard), Some(Exclusion::NotACreature));
    }

    #[test]
    fn blocker_in_attacker_cell_is_excluded() {
        let settings = CoverSettings::default();
        let scene = SceneSnapshot::default();
        let overlapping = Entity::new(EntityId(3), Rect::centered(Point::new(50.0, 50.0), 100.0, 100.0));
        assert_eq!(check(&settings, &scene, &overlapping), Some(Exclusion::SameCell));
    }

    #[test]
    fn tiny_blocker_only_shields_tiny_targets() {
        let settings = CoverSettings::default();
        let scene = SceneSnapshot::default();
        let tiny = cell(3, 5.0).with_size(SizeRank::Tiny);
        let (attacker, target) = combatants();
        let selector = BlockerSelector::new(&settings, 100.0);

        assert_eq!(
            selector.exclusion(&scene, &attacker, &target, &tiny),
            Some(Exclusion::TinyVersusLarger)
        );

        let tiny_target = target.with_size(SizeRank::Tiny);
        assert_eq!(selector.exclusion(&scene, &attacker, &tiny_target, &tiny), None);
    }

    #[test]
    fn select_keeps_scene_order() {
        let settings = CoverSettings::default();
        let scene = SceneSnapshot::default();
        let (attacker, target) = combatants();
        let candidates = vec![
            cell(5, 7.0),
            cell(3, 3.0).with_flags(EntityFlags::HIDDEN),
            cell(4, 4.0),
        ];
        let selected = BlockerSelector::new(&settings, 100.0).select(&scene, &attacker, &target, &candidates);
        let ids: Vec<_> = selected.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(5), EntityId(4)]);
    }
}
