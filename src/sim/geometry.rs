//! Planar geometry helpers
//!
//! Points are `glam::Vec2` in world units with y pointing up. Angles handed
//! to these helpers are in degrees, matching how the lander stores rotation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A directed line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// True when this segment properly crosses `other`
    #[inline]
    pub fn intersects(&self, other: &Segment) -> bool {
        segments_intersect(self.start, self.end, other.start, other.end)
    }

    /// Horizontal length of the segment
    #[inline]
    pub fn width(&self) -> f32 {
        (self.end.x - self.start.x).abs()
    }

    /// Both endpoints share the same height
    #[inline]
    pub fn is_flat(&self) -> bool {
        self.start.y == self.end.y
    }
}

/// Rotate `point` about `origin` by `degrees` (counter-clockwise for positive angles)
#[inline]
pub fn rotate_around(point: Vec2, origin: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let diff = point - origin;
    origin + Vec2::new(diff.x * cos - diff.y * sin, diff.x * sin + diff.y * cos)
}

/// Unit vector for a heading measured clockwise from straight up
///
/// A heading of 0 points along +y; positive headings lean toward +x.
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(sin, cos)
}

/// True if `a`, `b`, `c` wind counter-clockwise
///
/// Collinear triples return false.
#[inline]
pub fn ccw(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Segment AB crosses segment CD
///
/// C and D must lie on opposite sides of AB, and A and B on opposite sides
/// of CD. Fully collinear overlaps are not reported.
#[inline]
pub fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_rotate_around_quarter_turn() {
        let origin = Vec2::new(10.0, 10.0);
        let p = rotate_around(Vec2::new(11.0, 10.0), origin, 90.0);
        assert!(approx_eq(p, Vec2::new(10.0, 11.0)));

        let p = rotate_around(Vec2::new(11.0, 10.0), origin, -90.0);
        assert!(approx_eq(p, Vec2::new(10.0, 9.0)));
    }

    #[test]
    fn test_rotate_around_zero_is_identity() {
        let origin = Vec2::new(3.5, -2.0);
        let point = Vec2::new(13.5, 10.5);
        assert_eq!(rotate_around(point, origin, 0.0), point);
    }

    #[test]
    fn test_heading_vector() {
        assert!(approx_eq(heading_vector(0.0), Vec2::Y));
        assert!(approx_eq(heading_vector(90.0), Vec2::X));
        assert!(approx_eq(heading_vector(-90.0), -Vec2::X));
    }

    #[test]
    fn test_crossing_segments_intersect() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 10.0);
        let c = Vec2::new(0.0, 10.0);
        let d = Vec2::new(10.0, 0.0);
        assert!(segments_intersect(a, b, c, d));
        assert!(segments_intersect(c, d, a, b));
    }

    #[test]
    fn test_disjoint_segments_do_not_intersect() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(0.0, 5.0);
        let d = Vec2::new(10.0, 5.0);
        assert!(!segments_intersect(a, b, c, d));

        // Would cross if extended, but stops short
        let e = Vec2::new(5.0, 1.0);
        let f = Vec2::new(5.0, 4.0);
        assert!(!segments_intersect(a, b, e, f));
    }

    #[test]
    fn test_collinear_overlap_is_not_reported() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(5.0, 0.0);
        let d = Vec2::new(15.0, 0.0);
        assert!(!segments_intersect(a, b, c, d));
    }

    #[test]
    fn test_edge_ending_on_segment_counts() {
        // Vertical edge whose lower end rests exactly on a flat segment
        let ground = Segment::new(Vec2::new(0.0, 100.0), Vec2::new(40.0, 100.0));
        let edge = Segment::new(Vec2::new(20.0, 125.0), Vec2::new(20.0, 100.0));
        assert!(ground.intersects(&edge));
        assert!(ground.is_flat());
        assert_eq!(ground.width(), 40.0);
    }
}
