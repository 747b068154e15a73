//! Geometry kernel.
//!
//! Pure planar predicates used by the wall policy, the elevation gate and
//! every cover evaluator. No external state is read here.

mod kernel;
mod types;

pub use kernel::{
    cross, point_in_rect, same_grid_cell, segment_intersection, segment_rect_penetration_length,
    segment_touches_rect,
};
pub use types::{Point, Position, Rect, SightLine, VerticalSpan};
