//! In-memory oracle implementations.
//!
//! Snapshots capture a scene (tokens, walls, per-viewer detection facts) and
//! a feat table as plain data, so they can be loaded from files, built in
//! tests, or captured from a live host for offline inspection.

use super::{FeatOracle, FeatUpgrade, SceneOracle, WallOracle};
use crate::state::{CoverCategory, Entity, EntityId, WallSegment};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of everything a scene exposes to the cover core.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneSnapshot {
    pub grid_size: f64,
    pub entities: Vec<Entity>,
    pub walls: Vec<WallSegment>,
    /// Tokens selected or controlled by the querying user.
    pub controlled: Vec<EntityId>,
    /// `(blocker, observer)` pairs where the observer has not detected the blocker.
    pub undetected: Vec<(EntityId, EntityId)>,
}

impl SceneSnapshot {
    pub const DEFAULT_GRID_SIZE: f64 = 100.0;

    pub fn new(grid_size: f64) -> Self {
        Self {
            grid_size,
            entities: Vec::new(),
            walls: Vec::new(),
            controlled: Vec::new(),
            undetected: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    #[must_use]
    pub fn with_wall(mut self, wall: WallSegment) -> Self {
        self.walls.push(wall);
        self
    }

    #[must_use]
    pub fn with_controlled(mut self, id: EntityId) -> Self {
        self.controlled.push(id);
        self
    }

    #[must_use]
    pub fn with_undetected(mut self, blocker: EntityId, observer: EntityId) -> Self {
        self.undetected.push((blocker, observer));
        self
    }

    /// Looks up a token by id.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }
}

impl Default for SceneSnapshot {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GRID_SIZE)
    }
}

impl SceneOracle for SceneSnapshot {
    fn entities(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    fn grid_size(&self) -> f64 {
        self.grid_size
    }

    fn is_controlled(&self, id: EntityId) -> bool {
        self.controlled.contains(&id)
    }

    fn is_undetected(&self, blocker: EntityId, observer: EntityId) -> bool {
        self.undetected.contains(&(blocker, observer))
    }
}

impl WallOracle for SceneSnapshot {
    fn walls(&self) -> Vec<WallSegment> {
        self.walls.clone()
    }
}

/// A feat granting a one-step cover upgrade to its holder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatGrant {
    pub entity: EntityId,
    pub name: String,
    /// Lets the holder hide even with less than standard cover.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignores_hide_gate: bool,
}

/// Table-driven feat provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeatSnapshot {
    /// Holders of a cover-upgrading feat.
    pub upgrades: Vec<FeatGrant>,
    /// Holders of the large-creature cover feat.
    pub large_creature_cover: Vec<EntityId>,
}

impl FeatSnapshot {
    fn grant(&self, id: EntityId) -> Option<&FeatGrant> {
        self.upgrades.iter().find(|grant| grant.entity == id)
    }
}

impl FeatOracle for FeatSnapshot {
    fn upgrade_cover_for_entity(&self, entity: &Entity, category: CoverCategory) -> FeatUpgrade {
        match self.grant(entity.id) {
            Some(grant) if category > CoverCategory::None => FeatUpgrade {
                category: category.step_up(),
                can_override_hide_gate: grant.ignores_hide_gate,
            },
            _ => FeatUpgrade::unchanged(category),
        }
    }

    fn has_large_creature_cover_feat(&self, entity: &Entity) -> bool {
        self.large_creature_cover.contains(&entity.id)
    }

    fn upgrade_reason(&self, entity: &Entity) -> String {
        self.grant(entity.id)
            .map(|grant| grant.name.clone())
            .unwrap_or_else(|| String::from("feat"))
    }
}
