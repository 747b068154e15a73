//! Scene-derived value types: identifiers, tokens, walls and categories.

mod category;
mod common;
mod entity;
mod wall;

pub use category::{CoverBonuses, CoverCategory, CoverOverride};
pub use common::{EntityId, PairKey, WallId};
pub use entity::{Alliance, Entity, EntityFlags, EntityKind, SizeRank};
pub use wall::{DoorState, WallDirection, WallSegment};
