//! Segment, rectangle and grid predicates.
//!
//! Everything here is a pure function over [`Point`] and [`Rect`]; none of
//! it knows about walls, entities or cover rules.

use super::types::{Point, Rect};

/// Determinants smaller than this are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Shaves the exclusive upper edge of a footprint before flooring.
const CELL_EDGE_EPSILON: f64 = 1e-6;

/// Intersection point of segments `p1–p2` and `p3–p4`.
///
/// Returns `Some` only when both interpolation parameters lie in `[0, 1]`.
/// Parallel and collinear segments yield `None`.
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let d1x = p2.x - p1.x;
    let d1y = p2.y - p1.y;
    let d2x = p4.x - p3.x;
    let d2y = p4.y - p3.y;

    let denom = d1x * d2y - d1y * d2x;
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let ox = p3.x - p1.x;
    let oy = p3.y - p1.y;
    let t = (ox * d2y - oy * d2x) / denom;
    let u = (ox * d1y - oy * d1x) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p1.lerp(p2, t))
    } else {
        None
    }
}

/// Inclusive point-in-rectangle test.
pub fn point_in_rect(p: Point, rect: &Rect) -> bool {
    p.x >= rect.x1 && p.x <= rect.x2 && p.y >= rect.y1 && p.y <= rect.y2
}

/// Parameter range `[t0, t1]` of `p1–p2` lying inside `rect` (Liang–Barsky).
fn clip_segment(p1: Point, p2: Point, rect: &Rect) -> Option<(f64, f64)> {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let checks = [
        (-dx, p1.x - rect.x1),
        (dx, rect.x2 - p1.x),
        (-dy, p1.y - rect.y1),
        (dy, rect.y2 - p1.y),
    ];

    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    (t0 <= t1).then_some((t0, t1))
}

/// Length of the part of `p1–p2` that lies inside `rect`; `0.0` when disjoint.
pub fn segment_rect_penetration_length(p1: Point, p2: Point, rect: &Rect) -> f64 {
    match clip_segment(p1, p2, rect) {
        Some((t0, t1)) => p1.distance(p2) * (t1 - t0),
        None => 0.0,
    }
}

/// True when the segment touches the rectangle at all, boundary included.
pub fn segment_touches_rect(p1: Point, p2: Point, rect: &Rect) -> bool {
    clip_segment(p1, p2, rect).is_some()
}

/// Inclusive range of grid cells covered by `[lo, hi]` along one axis.
fn cell_range(lo: f64, hi: f64, grid_size: f64) -> (i64, i64) {
    let first = (lo / grid_size).floor() as i64;
    let last = if hi > lo {
        ((hi - CELL_EDGE_EPSILON) / grid_size).floor() as i64
    } else {
        first
    };
    (first, last.max(first))
}

/// True when the grid-cell footprints of `a` and `b` share at least one cell.
///
/// Footprints are computed per axis as `floor(coord / grid_size)`, so a
/// multi-cell token overlaps every cell it covers rather than only the cell
/// of its center. A non-positive grid size never matches.
pub fn same_grid_cell(a: &Rect, b: &Rect, grid_size: f64) -> bool {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return false;
    }

    let (ax0, ax1) = cell_range(a.x1, a.x2, grid_size);
    let (ay0, ay1) = cell_range(a.y1, a.y2, grid_size);
    let (bx0, bx1) = cell_range(b.x1, b.x2, grid_size);
    let (by0, by1) = cell_range(b.y1, b.y2, grid_size);

    ax0 <= bx1 && bx0 <= ax1 && ay0 <= by1 && by0 <= ay1
}

/// Sign of the cross product `(b - a) × (p - a)`.
pub fn cross(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
