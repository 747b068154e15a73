//! Planar and vertical primitives shared by every component.

use core::fmt;

/// Planar point in map pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point at parameter `t` along `self -> other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Snapshot of a location: planar coordinates plus an optional elevation in feet.
///
/// Elevation is always carried separately from the planar coordinates because
/// the two live in different units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elevation_ft: Option<f64>,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            elevation_ft: None,
        }
    }

    #[must_use]
    pub const fn with_elevation(mut self, elevation_ft: f64) -> Self {
        self.elevation_ft = Some(elevation_ft);
        self
    }

    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Axis-aligned rectangle, always stored with `x1 <= x2` and `y1 <= y2`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawRect"))]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRect {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

#[cfg(feature = "serde")]
impl From<RawRect> for Rect {
    fn from(raw: RawRect) -> Self {
        Rect::new(raw.x1, raw.y1, raw.x2, raw.y2)
    }
}

impl Rect {
    /// Creates a rectangle from two opposite corners in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(center.x - hw, center.y - hh, center.x + hw, center.y + hh)
    }

    /// Degenerate rectangle covering a single point.
    pub fn point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Longer of the two sides.
    pub fn longer_side(&self) -> f64 {
        self.width().max(self.height())
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x1, self.y1),
            Point::new(self.x2, self.y1),
            Point::new(self.x2, self.y2),
            Point::new(self.x1, self.y2),
        ]
    }

    /// Shrinks every side by `amount`, collapsing to the center when too small.
    #[must_use]
    pub fn inset(&self, amount: f64) -> Self {
        let c = self.center();
        let hw = (self.width() / 2.0 - amount).max(0.0);
        let hh = (self.height() / 2.0 - amount).max(0.0);
        Self::new(c.x - hw, c.y - hh, c.x + hw, c.y + hh)
    }

    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }
}

/// Vertical extent of an entity or wall, in feet.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerticalSpan {
    pub bottom: f64,
    pub top: f64,
}

impl VerticalSpan {
    pub fn new(bottom: f64, top: f64) -> Self {
        Self {
            bottom: bottom.min(top),
            top: bottom.max(top),
        }
    }

    /// Span starting at `elevation` with the given height.
    pub fn from_height(elevation: f64, height: f64) -> Self {
        Self::new(elevation, elevation + height.max(0.0))
    }

    pub fn center(&self) -> f64 {
        (self.bottom + self.top) / 2.0
    }

    pub fn contains(&self, elevation: f64) -> bool {
        elevation >= self.bottom && elevation <= self.top
    }

    /// True when `[lo, hi]` overlaps this span (inclusive).
    pub fn overlaps(&self, lo: f64, hi: f64) -> bool {
        lo <= self.top && hi >= self.bottom
    }
}

/// Planar segment between two combatants, with optional endpoint elevations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SightLine {
    pub from: Point,
    pub to: Point,
    pub from_elevation: Option<f64>,
    pub to_elevation: Option<f64>,
}

impl SightLine {
    pub const fn new(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            from_elevation: None,
            to_elevation: None,
        }
    }

    #[must_use]
    pub const fn with_elevations(mut self, from: Option<f64>, to: Option<f64>) -> Self {
        self.from_elevation = from;
        self.to_elevation = to;
        self
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    /// Fraction of the way from `from` to `to` that `p` lies, by planar
    /// distance from `from`, clamped to `[0, 1]`. Zero for a degenerate line.
    pub fn progress(&self, p: Point) -> f64 {
        let total = self.length();
        if total <= f64::EPSILON {
            return 0.0;
        }
        (self.from.distance(p) / total).clamp(0.0, 1.0)
    }

    /// Interpolated elevation at `p`, when both endpoint elevations are known.
    pub fn elevation_at(&self, p: Point) -> Option<f64> {
        let from = self.from_elevation?;
        let to = self.to_elevation?;
        Some(from + (to - from) * self.progress(p))
    }
}
