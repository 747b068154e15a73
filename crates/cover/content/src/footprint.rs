//! Default token dimensions by creature size.

use cover_core::SizeRank;

/// Feet covered by one grid square.
pub const FEET_PER_SQUARE: f64 = 5.0;

/// Grid squares a token of `size` spans along each side.
pub const fn footprint_squares(size: SizeRank) -> f64 {
    match size {
        SizeRank::Tiny => 0.5,
        SizeRank::Small | SizeRank::Medium => 1.0,
        SizeRank::Large => 2.0,
        SizeRank::Huge => 3.0,
        SizeRank::Gargantuan => 4.0,
    }
}

/// Vertical height assumed for a token of `size` when the scene omits it.
pub fn default_height_ft(size: SizeRank) -> f64 {
    footprint_squares(size) * FEET_PER_SQUARE
}
