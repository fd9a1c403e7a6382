//! Planar layout coordinates.
//!
//! Hub and spokes live on a flat 2-D plane measured in abstract layout units;
//! aircraft cruise speeds are expressed in the same units per hour.

/// A point on the layout plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in layout units.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Heading from `self` towards `other` in radians, `atan2` convention
    /// (0 = +x, counter-clockwise positive).  Zero for coincident points.
    #[inline]
    pub fn heading_to(self, other: Point) -> f64 {
        let (dx, dy) = (other.x - self.x, other.y - self.y);
        if dx == 0.0 && dy == 0.0 {
            return 0.0;
        }
        dy.atan2(dx)
    }

    /// Linear interpolation; `t` is clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Evenly spaced positions on a circle of `radius` around `center`, spoke 0
/// at angle zero and proceeding counter-clockwise.
pub fn ring_positions(center: Point, radius: f64, count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / count as f64;
            Point::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
        })
        .collect()
}
