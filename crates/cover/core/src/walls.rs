//! Wall blocking policy.
//!
//! Decides whether a wall stops sight from a given origin (door state,
//! one-way directionality) and how manual override flags interact with that
//! natural answer. An override can change the *category* a wall grants but
//! never lets a wall block from a side it physically cannot reach.

use crate::error::GeometryError;
use crate::geometry::{Point, SightLine, cross, segment_intersection};
use crate::state::{CoverCategory, DoorState, WallDirection, WallSegment};

/// True when the wall would stop sight from `origin` with no override applied.
pub fn would_naturally_block(wall: &WallSegment, origin: Point) -> bool {
    if !wall.blocks_sight {
        return false;
    }
    if wall.door == DoorState::Open {
        return false;
    }

    match wall.direction {
        WallDirection::Both => true,
        WallDirection::Left => cross(wall.a, wall.b, origin) < 0.0,
        WallDirection::Right => cross(wall.a, wall.b, origin) > 0.0,
    }
}

/// Override category in force for sight from `origin`.
///
/// Returns `None` when the wall carries no override or when it would not
/// naturally block from `origin` (overrides are ignored in that case).
pub fn active_override(wall: &WallSegment, origin: Point) -> Option<CoverCategory> {
    let category = wall.cover_override.category()?;
    would_naturally_block(wall, origin).then_some(category)
}

/// True when the wall obstructs sight from `origin` for cover purposes.
///
/// A wall that would not naturally block never blocks. A naturally blocking
/// wall whose override forces `none` is transparent to cover.
pub fn effective_blocks(wall: &WallSegment, origin: Point) -> bool {
    if !would_naturally_block(wall, origin) {
        return false;
    }
    active_override(wall, origin) != Some(CoverCategory::None)
}

/// Point where `line` crosses `wall`, honoring the wall's vertical bounds.
///
/// Elevation is only checked when the wall has bounds and both ends of the
/// sight line have a known elevation; otherwise the wall is treated as full
/// height.
///
/// # Errors
///
/// Returns `GeometryError::MalformedWall` for non-finite or zero-length walls.
pub fn wall_crossing(wall: &WallSegment, line: &SightLine) -> Result<Option<Point>, GeometryError> {
    if !wall.is_well_formed() {
        return Err(GeometryError::MalformedWall(wall.id));
    }

    let Some(hit) = segment_intersection(line.from, line.to, wall.a, wall.b) else {
        return Ok(None);
    };

    if let (Some(bounds), Some(elevation)) = (wall.elevation, line.elevation_at(hit)) {
        if !bounds.contains(elevation) {
            return Ok(None);
        }
    }

    Ok(Some(hit))
}
