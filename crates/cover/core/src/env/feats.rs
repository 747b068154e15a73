//! Feat-capability oracle.

use crate::state::{CoverCategory, Entity};

/// Answer from a feat provider about a possible cover upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatUpgrade {
    pub category: CoverCategory,
    /// The feat lets the entity hide even when the category normally forbids it.
    pub can_override_hide_gate: bool,
}

impl FeatUpgrade {
    /// No feat applies: the category passes through unchanged.
    pub const fn unchanged(category: CoverCategory) -> Self {
        Self {
            category,
            can_override_hide_gate: false,
        }
    }
}

/// Optional provider of feat-driven cover rules.
pub trait FeatOracle: Send + Sync {
    /// Returns the category `entity` actually enjoys given its feats.
    fn upgrade_cover_for_entity(&self, _entity: &Entity, category: CoverCategory) -> FeatUpgrade {
        FeatUpgrade::unchanged(category)
    }

    /// True when `entity` gains standard cover from creatures two sizes larger
    /// than itself, regardless of the attacker's size.
    fn has_large_creature_cover_feat(&self, _entity: &Entity) -> bool {
        false
    }

    /// Human-readable name of the feat behind an upgrade, for attribution.
    fn upgrade_reason(&self, _entity: &Entity) -> String {
        String::from("feat")
    }
}
