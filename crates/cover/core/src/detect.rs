//! Cover detection entry points.
//!
//! [`CoverDetector`] is the only type hosts need: it reads the scene through
//! a [`CoverEnv`], picks the wall or token path, and never fails. Whatever
//! step cannot run (missing oracle, malformed data) is logged and skipped.

use std::sync::Arc;
use std::time::Duration;

use crate::blockers::BlockerSelector;
use crate::config::CoverSettings;
use crate::elevation::ElevationPolicy;
use crate::env::CoverEnv;
use crate::error::{GeometryError, degrade};
use crate::evaluate::{CoverEvaluator, EvaluationInput, TokenEvaluator, WallCoverEvaluator};
use crate::feats::{FeatUpgradeCache, FeatUpgradeRecord};
use crate::geometry::{Position, SightLine};
use crate::hooks::{AdjustmentContext, CoverAdjustmentHook, DetectionPath, run_hooks};
use crate::overrides::OverridePipeline;
use crate::result::CoverResult;
use crate::state::{Entity, EntityId, PairKey, WallId, WallSegment};
use crate::walls::{active_override, effective_blocks, wall_crossing};

/// Walls found on the attacker–target center line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SegmentAnalysis {
    /// Walls that block from the attacker's side or carry an active override.
    pub obstructing: Vec<WallId>,
}

impl SegmentAnalysis {
    pub fn is_obstructed(&self) -> bool {
        !self.obstructing.is_empty()
    }
}

/// Stateless cover calculator plus the feat-upgrade attribution cache.
#[derive(Clone)]
pub struct CoverDetector {
    hooks: Arc<[Arc<dyn CoverAdjustmentHook>]>,
    feat_cache: Arc<FeatUpgradeCache>,
}

impl CoverDetector {
    pub fn new() -> Self {
        Self {
            hooks: Arc::from(Vec::new()),
            feat_cache: Arc::new(FeatUpgradeCache::default()),
        }
    }

    /// Detector whose feat records expire after the configured TTL.
    pub fn from_settings(settings: &CoverSettings) -> Self {
        Self::new().with_feat_cache(Arc::new(FeatUpgradeCache::new(Duration::from_secs(
            settings.feat_record_ttl_secs,
        ))))
    }

    /// Installs adjustment hooks, sorted by priority (stable for equal priorities).
    #[must_use]
    pub fn with_hooks(mut self, mut hooks: Vec<Arc<dyn CoverAdjustmentHook>>) -> Self {
        hooks.sort_by_key(|hook| hook.priority());
        self.hooks = hooks.into();
        self
    }

    /// Shares a feat cache with other detectors or with the UI layer.
    #[must_use]
    pub fn with_feat_cache(mut self, cache: Arc<FeatUpgradeCache>) -> Self {
        self.feat_cache = cache;
        self
    }

    pub fn feat_cache(&self) -> &Arc<FeatUpgradeCache> {
        &self.feat_cache
    }

    /// Pulls the feat-upgrade attribution for a pair, if one is fresh.
    pub fn take_feat_upgrade(&self, attacker: EntityId, target: EntityId) -> Option<FeatUpgradeRecord> {
        self.feat_cache.take(PairKey::new(attacker, target))
    }

    /// Cover `target` enjoys against `attacker`.
    pub fn detect_between_tokens(
        &self,
        env: &CoverEnv<'_>,
        attacker: &Entity,
        target: &Entity,
    ) -> CoverResult {
        if attacker.id == target.id && !attacker.id.is_origin() {
            return CoverResult::none();
        }
        for entity in [attacker, target] {
            if !entity.rect.is_finite() {
                return degrade(GeometryError::MalformedFootprint(entity.id), CoverResult::none());
            }
        }

        let settings = env.settings();
        let walls = env.scene_walls();
        let blockers = self.admissible_blockers(env, &settings, attacker, target);
        let blocker_refs: Vec<&Entity> = blockers.iter().collect();

        let analysis = Self::analyze_segment(attacker, target, &walls);
        let (path, result) = if analysis.is_obstructed() {
            tracing::debug!(attacker = %attacker.id, target = %target.id, walls = analysis.obstructing.len(), "wall path");
            let verdict =
                WallCoverEvaluator::new(&settings).evaluate(attacker, target, &walls, &blocker_refs);
            (DetectionPath::Walls, verdict.into_result())
        } else {
            let result = self.token_path(env, &settings, attacker, target, &blocker_refs, &walls);
            (DetectionPath::Tokens, result)
        };

        let ctx = AdjustmentContext {
            attacker,
            target,
            path,
        };
        let result = run_hooks(&self.hooks, &ctx, result);
        tracing::debug!(attacker = %attacker.id, target = %target.id, %path, category = %result.category, "cover detected");
        result
    }

    /// Cover `target` enjoys against an effect originating at `origin`.
    pub fn detect_from_point(&self, env: &CoverEnv<'_>, origin: Position, target: &Entity) -> CoverResult {
        let attacker = Entity::at_point(EntityId::ORIGIN, origin);
        self.detect_between_tokens(env, &attacker, target)
    }

    /// Walls on the center line that send the query down the wall path.
    pub fn analyze_segment(attacker: &Entity, target: &Entity, walls: &[WallSegment]) -> SegmentAnalysis {
        let origin = attacker.center();
        let line = SightLine::new(origin, target.center())
            .with_elevations(attacker.center_elevation(), target.center_elevation());

        let obstructing = walls
            .iter()
            .filter(|wall| {
                let obstructs = effective_blocks(wall, origin) || active_override(wall, origin).is_some();
                obstructs
                    && match wall_crossing(wall, &line) {
                        Ok(hit) => hit.is_some(),
                        Err(e) => degrade(e, false),
                    }
            })
            .map(|wall| wall.id)
            .collect();

        SegmentAnalysis { obstructing }
    }

    fn admissible_blockers(
        &self,
        env: &CoverEnv<'_>,
        settings: &CoverSettings,
        attacker: &Entity,
        target: &Entity,
    ) -> Vec<Entity> {
        let scene = match env.scene() {
            Ok(scene) => scene,
            Err(e) => return degrade(e, Vec::new()),
        };

        let candidates: Vec<Entity> = scene
            .entities()
            .into_iter()
            .filter(|entity| {
                entity.rect.is_finite() || degrade(GeometryError::MalformedFootprint(entity.id), false)
            })
            .collect();

        BlockerSelector::new(settings, env.grid_size()).select(scene, attacker, target, &candidates)
    }

    fn token_path(
        &self,
        env: &CoverEnv<'_>,
        settings: &CoverSettings,
        attacker: &Entity,
        target: &Entity,
        blockers: &[&Entity],
        walls: &[WallSegment],
    ) -> CoverResult {
        let mode = settings.intersection_mode;
        let gated = ElevationPolicy::for_mode(mode).filter(attacker, target, blockers.iter().copied());

        let feats = match env.feats() {
            Ok(feats) => Some(feats),
            Err(e) => degrade(e, None),
        };
        let target_has_large_creature_feat =
            feats.is_some_and(|feats| feats.has_large_creature_cover_feat(target));

        let evaluator = TokenEvaluator::for_mode(mode);
        let evaluation = evaluator.evaluate(&EvaluationInput {
            attacker,
            target,
            blockers: &gated,
            walls,
            target_has_large_creature_feat,
        });
        tracing::debug!(%mode, evaluator = %evaluator.kind(), category = %evaluation.category, contributors = evaluation.contributors.len(), "token path");

        OverridePipeline::new(&self.feat_cache).apply(
            &evaluation,
            evaluator.kind(),
            attacker,
            target,
            &gated,
            feats,
        )
    }
}

impl Default for CoverDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CoverDetector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CoverDetector")
            .field("hooks", &self.hooks.iter().map(|hook| hook.name()).collect::<Vec<_>>())
            .field("feat_cache", &self.feat_cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};
    use crate::state::CoverOverride;

    fn token(id: u32, cx: f64) -> Entity {
        Entity::new(EntityId(id), Rect::centered(Point::new(cx, 0.0), 100.0, 100.0))
    }

    #[test]
    fn override_wall_obstructs_even_when_transparent() {
        let attacker = token(1, 0.0);
        let target = token(2, 1000.0);
        let walls = [
            WallSegment::new(WallId(1), Point::new(500.0, -100.0), Point::new(500.0, 100.0))
                .with_override(CoverOverride::None),
            WallSegment::new(WallId(2), Point::new(500.0, 200.0), Point::new(500.0, 300.0)),
        ];
        let analysis = CoverDetector::analyze_segment(&attacker, &target, &walls);
        assert_eq!(analysis.obstructing, vec![WallId(1)]);
    }

    #[test]
    fn same_token_has_no_cover_from_itself() {
        let detector = CoverDetector::new();
        let env = CoverEnv::empty();
        let token = token(1, 0.0);
        assert_eq!(detector.detect_between_tokens(&env, &token, &token), CoverResult::none());
    }

    #[test]
    fn malformed_footprint_fails_to_none() {
        let detector = CoverDetector::new();
        let env = CoverEnv::empty();
        let broken = Entity::new(EntityId(1), Rect::new(f64::NAN, 0.0, 1.0, 1.0));
        assert_eq!(
            detector.detect_between_tokens(&env, &broken, &token(2, 1000.0)),
            CoverResult::none()
        );
    }

    #[test]
    fn hooks_are_sorted_by_priority() {
        struct Named(&'static str, i32);
        impl CoverAdjustmentHook for Named {
            fn name(&self) -> &'static str {
                self.0
            }
            fn priority(&self) -> i32 {
                self.1
            }
            fn adjust(
                &self,
                _ctx: &AdjustmentContext<'_>,
                current: crate::state::CoverCategory,
            ) -> crate::state::CoverCategory {
                current
            }
        }

        let detector = CoverDetector::new().with_hooks(vec![
            Arc::new(Named("late", 10)) as Arc<dyn CoverAdjustmentHook>,
            Arc::new(Named("early", -5)) as Arc<dyn CoverAdjustmentHook>,
            Arc::new(Named("default", 0)) as Arc<dyn CoverAdjustmentHook>,
        ]);
        let names: Vec<_> = detector.hooks.iter().map(|hook| hook.name()).collect();
        assert_eq!(names, vec!["early", "default", "late"]);
    }
}
