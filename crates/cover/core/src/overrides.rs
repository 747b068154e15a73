//! Token overrides and feat upgrades applied to a token-path evaluation.

use std::time::Instant;

use crate::env::FeatOracle;
use crate::evaluate::{Evaluation, EvaluatorKind};
use crate::feats::{FeatUpgradeCache, FeatUpgradeRecord};
use crate::result::{CoverResult, OverrideSource};
use crate::state::{CoverCategory, Entity, EntityId};

/// Turns an [`Evaluation`] into a [`CoverResult`].
///
/// 1. The highest manual override among the contributing blockers replaces
///    the computed category.
/// 2. Otherwise, a size-rank result above `none` is offered to the feat
///    provider for the target. A raised category is recorded in the cache.
#[derive(Clone, Copy, Debug)]
pub struct OverridePipeline<'c> {
    cache: &'c FeatUpgradeCache,
}

impl<'c> OverridePipeline<'c> {
    pub fn new(cache: &'c FeatUpgradeCache) -> Self {
        Self { cache }
    }

    pub fn apply<F>(
        &self,
        evaluation: &Evaluation,
        kind: EvaluatorKind,
        attacker: &Entity,
        target: &Entity,
        blockers: &[&Entity],
        feats: Option<&F>,
    ) -> CoverResult
    where
        F: FeatOracle + ?Sized,
    {
        if let Some((id, category)) = token_override(evaluation, blockers) {
            tracing::debug!(token = %id, original = %evaluation.category, %category, "token override");
            return CoverResult::overridden(category, Some(evaluation.category), OverrideSource::Token(id));
        }

        let computed = evaluation.category;
        if kind != EvaluatorKind::CreatureSizeRank || computed == CoverCategory::None {
            return CoverResult::computed(computed);
        }
        let Some(feats) = feats else {
            return CoverResult::computed(computed);
        };

        let upgrade = feats.upgrade_cover_for_entity(target, computed);
        if upgrade.category <= computed {
            return CoverResult::computed(computed)
                .with_hide_gate_lifted(upgrade.can_override_hide_gate);
        }

        self.cache.insert(FeatUpgradeRecord {
            attacker: attacker.id,
            target: target.id,
            from: computed,
            to: upgrade.category,
            reason: feats.upgrade_reason(target),
            created_at: Instant::now(),
        });
        CoverResult::upgraded(upgrade.category, computed, upgrade.can_override_hide_gate)
    }
}

/// Highest override carried by a contributing blocker; the first in scene order wins ties.
fn token_override(evaluation: &Evaluation, blockers: &[&Entity]) -> Option<(EntityId, CoverCategory)> {
    let mut best: Option<(EntityId, CoverCategory)> = None;
    for blocker in blockers {
        if !evaluation.contributors.contains(&blocker.id) {
            continue;
        }
        let Some(category) = blocker.cover_override.category() else {
            continue;
        };
        match best {
            Some((_, current)) if current >= category => {}
            _ => best = Some((blocker.id, category)),
        }
    }
    best
}
