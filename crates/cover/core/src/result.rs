//! Outcome of a cover query.

use core::fmt;

use crate::state::{CoverBonuses, CoverCategory, EntityId, WallId};

/// Where a replaced or upgraded category came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverrideSource {
    /// Manual override authored on a wall.
    Wall(WallId),
    /// Manual override authored on a contributing token.
    Token(EntityId),
    /// Feat-driven upgrade for the target.
    Feat,
}

impl fmt::Display for OverrideSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wall(id) => write!(f, "{id}"),
            Self::Token(id) => write!(f, "token {id}"),
            Self::Feat => f.write_str("feat"),
        }
    }
}

/// Attribution attached to a result whose category was not computed directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverrideProvenance {
    /// Category computed before replacement. `None` when the override
    /// short-circuited the computation entirely (wall overrides).
    pub original: Option<CoverCategory>,
    pub source: OverrideSource,
}

/// Cover granted to a target against an attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverResult {
    pub category: CoverCategory,
    pub bonuses: CoverBonuses,
    pub can_hide: bool,
    /// A feat lets the target hide regardless of category.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hide_gate_lifted: bool,
    /// True when a manual wall or token override decided the category.
    pub is_override: bool,
    pub override_provenance: Option<OverrideProvenance>,
}

impl CoverResult {
    /// Plain computed result with no provenance.
    pub const fn computed(category: CoverCategory) -> Self {
        Self {
            category,
            bonuses: category.bonuses(),
            can_hide: category.can_hide(),
            hide_gate_lifted: false,
            is_override: false,
            override_provenance: None,
        }
    }

    pub const fn none() -> Self {
        Self::computed(CoverCategory::None)
    }

    /// Result decided by a manual override.
    pub const fn overridden(
        category: CoverCategory,
        original: Option<CoverCategory>,
        source: OverrideSource,
    ) -> Self {
        Self {
            category,
            bonuses: category.bonuses(),
            can_hide: category.can_hide(),
            hide_gate_lifted: false,
            is_override: true,
            override_provenance: Some(OverrideProvenance { original, source }),
        }
    }

    /// Result raised by a feat. `can_hide` also honors the feat's hide gate.
    pub const fn upgraded(
        category: CoverCategory,
        original: CoverCategory,
        ignores_hide_gate: bool,
    ) -> Self {
        Self {
            category,
            bonuses: category.bonuses(),
            can_hide: category.can_hide() || ignores_hide_gate,
            hide_gate_lifted: ignores_hide_gate,
            is_override: false,
            override_provenance: Some(OverrideProvenance {
                original: Some(original),
                source: OverrideSource::Feat,
            }),
        }
    }

    /// Replaces the category, keeping provenance and recomputing derived fields.
    #[must_use]
    pub fn with_category(mut self, category: CoverCategory) -> Self {
        self.category = category;
        self.bonuses = category.bonuses();
        self.can_hide = category.can_hide() || self.hide_gate_lifted;
        self
    }

    /// Marks the hide gate as lifted (or not) by a feat.
    #[must_use]
    pub fn with_hide_gate_lifted(mut self, lifted: bool) -> Self {
        self.hide_gate_lifted = lifted;
        self.can_hide = self.category.can_hide() || lifted;
        self
    }
}

impl Default for CoverResult {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for CoverResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ac +{}, reflex +{}, stealth +{})",
            self.category, self.bonuses.ac, self.bonuses.reflex, self.bonuses.stealth
        )?;
        if let Some(provenance) = self.override_provenance {
            write!(f, " via {}", provenance.source)?;
        }
        Ok(())
    }
}
