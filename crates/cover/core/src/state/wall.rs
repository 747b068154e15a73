//! Wall segments and their sight-related attributes.

use super::category::CoverOverride;
use super::common::WallId;
use crate::geometry::{Point, VerticalSpan};

/// Door state of a wall segment.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DoorState {
    /// Plain wall, not a door.
    #[default]
    None,
    Closed,
    Open,
}

/// One-way directionality of a wall.
///
/// The side is defined by the sign of `(b - a) × (origin - a)`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WallDirection {
    /// Blocks from both sides (dir = 0).
    #[default]
    Both,
    /// Blocks only origins with a negative cross product (dir = 1).
    Left,
    /// Blocks only origins with a positive cross product (dir = 2).
    Right,
}

impl WallDirection {
    /// Maps the host's numeric direction code; unknown codes block both sides.
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Left,
            2 => Self::Right,
            _ => Self::Both,
        }
    }
}

/// A wall segment between endpoints `a` and `b`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallSegment {
    pub id: WallId,
    pub a: Point,
    pub b: Point,
    #[cfg_attr(feature = "serde", serde(default = "default_blocks_sight"))]
    pub blocks_sight: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub door: DoorState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: WallDirection,
    /// Vertical bounds; `None` means the wall is effectively infinitely tall.
    #[cfg_attr(feature = "serde", serde(default))]
    pub elevation: Option<VerticalSpan>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cover_override: CoverOverride,
}

#[cfg(feature = "serde")]
fn default_blocks_sight() -> bool {
    true
}

impl WallSegment {
    /// Sight-blocking, two-sided, full-height wall.
    pub fn new(id: WallId, a: Point, b: Point) -> Self {
        Self {
            id,
            a,
            b,
            blocks_sight: true,
            door: DoorState::None,
            direction: WallDirection::Both,
            elevation: None,
            cover_override: CoverOverride::Auto,
        }
    }

    #[must_use]
    pub fn with_door(mut self, door: DoorState) -> Self {
        self.door = door;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: WallDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_elevation(mut self, span: VerticalSpan) -> Self {
        self.elevation = Some(span);
        self
    }

    #[must_use]
    pub fn with_override(mut self, cover_override: CoverOverride) -> Self {
        self.cover_override = cover_override;
        self
    }

    #[must_use]
    pub fn non_blocking(mut self) -> Self {
        self.blocks_sight = false;
        self
    }

    /// Finite, non-degenerate endpoints.
    pub fn is_well_formed(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.a != self.b
    }
}
