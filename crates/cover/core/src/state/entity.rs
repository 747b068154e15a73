//! Tokens as the cover core sees them: footprint, vertical span and the
//! few attributes the exclusion rules need.

use core::str::FromStr;

use bitflags::bitflags;

use super::category::CoverOverride;
use super::common::EntityId;
use crate::geometry::{Point, Position, Rect, VerticalSpan};

/// Creature size, ordered `Tiny < Small < Medium < Large < Huge < Gargantuan`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SizeRank {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
}

impl SizeRank {
    /// Parses a size label, falling back to `Medium` for anything unknown.
    pub fn parse_or_medium(label: &str) -> Self {
        Self::from_str(label.trim()).unwrap_or_default()
    }

    /// Ordinal position on the size scale (`Tiny` = 0).
    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    /// How many ranks `self` is above `other` (negative when smaller).
    pub const fn ranks_above(self, other: SizeRank) -> i32 {
        self.ordinal() - other.ordinal()
    }

    pub const fn is_tiny(self) -> bool {
        matches!(self, Self::Tiny)
    }
}

/// Side a token fights for.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Alliance {
    Party,
    Opposition,
    #[default]
    Neutral,
}

/// What a token represents on the map.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityKind {
    #[default]
    Creature,
    /// Item piles and containers; never block.
    Loot,
    /// Traps and hazards; never block.
    Hazard,
}

bitflags! {
    /// Per-token state bits relevant to blocker selection.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntityFlags: u8 {
        /// Hidden from the canvas by the GM.
        const HIDDEN = 1 << 0;
        const PRONE = 1 << 1;
    }
}

/// A combatant or potential blocker.
///
/// Derived from scene data at query time and never persisted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub rect: Rect,
    /// Absent when the host has no elevation data for the token.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vertical_span: Option<VerticalSpan>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub size: SizeRank,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alliance: Alliance,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: EntityKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hit_points: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: EntityFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cover_override: CoverOverride,
}

impl Entity {
    /// Creature with the given footprint and medium size.
    pub fn new(id: EntityId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            vertical_span: None,
            size: SizeRank::Medium,
            alliance: Alliance::Neutral,
            kind: EntityKind::Creature,
            hit_points: None,
            flags: EntityFlags::empty(),
            cover_override: CoverOverride::Auto,
        }
    }

    /// Zero-size entity standing on a single point.
    ///
    /// Used as the attacker for area-effect origins.
    pub fn at_point(id: EntityId, position: Position) -> Self {
        let mut entity = Self::new(id, Rect::point(position.point()));
        entity.vertical_span = position
            .elevation_ft
            .map(|elevation| VerticalSpan::new(elevation, elevation));
        entity
    }

    #[must_use]
    pub fn with_size(mut self, size: SizeRank) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: VerticalSpan) -> Self {
        self.vertical_span = Some(span);
        self
    }

    #[must_use]
    pub fn with_alliance(mut self, alliance: Alliance) -> Self {
        self.alliance = alliance;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_hit_points(mut self, hit_points: u32) -> Self {
        self.hit_points = Some(hit_points);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: EntityFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_override(mut self, cover_override: CoverOverride) -> Self {
        self.cover_override = cover_override;
        self
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Elevation of the token's vertical midpoint, if known.
    pub fn center_elevation(&self) -> Option<f64> {
        self.vertical_span.map(|span| span.center())
    }

    /// A token with no hit points left. Unknown hit points never count as dead.
    pub fn is_dead(&self) -> bool {
        self.hit_points == Some(0)
    }

    pub fn is_prone(&self) -> bool {
        self.flags.contains(EntityFlags::PRONE)
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(EntityFlags::HIDDEN)
    }

    /// True for tokens that physically occupy space as creatures.
    pub fn is_creature(&self) -> bool {
        matches!(self.kind, EntityKind::Creature)
    }
}
