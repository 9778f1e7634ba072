// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::bounds::Bounds;
use crate::collide::{dist_sq_to_segment, point_on_segment};

/// Line segment collider with an optional hit tolerance.
///
/// A positive tolerance turns point containment into a capsule test of that radius
/// around the segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    start: Point,
    end: Point,
    tolerance: f64,
    bounds: Bounds,
}

impl Line {
    /// Create a segment with zero tolerance.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::from_points(Point::new(x1, y1), Point::new(x2, y2), 0.0)
    }

    /// Create a segment between two points with the given tolerance.
    pub fn from_points(start: Point, end: Point, tolerance: f64) -> Self {
        let mut l = Self {
            start,
            end,
            tolerance: 0.0,
            bounds: Bounds::new(0.0, 0.0, 0.0, 0.0),
        };
        l.set(start, end, tolerance);
        l
    }

    /// Builder-style tolerance override.
    #[must_use]
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self::from_points(self.start, self.end, tolerance)
    }

    /// Replace the defining fields.
    pub fn set(&mut self, start: Point, end: Point, tolerance: f64) {
        self.start = start;
        self.end = end;
        self.tolerance = tolerance.max(0.0);
        let t = self.tolerance;
        self.bounds = Bounds::new(
            start.x.min(end.x) - t,
            start.y.min(end.y) - t,
            start.x.max(end.x) + t,
            start.y.max(end.y) + t,
        );
    }

    /// Start point.
    pub fn start(&self) -> Point {
        self.start
    }

    /// End point.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Capsule radius used for containment.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// `[start, end]`.
    pub fn points(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    /// Bounding box, inflated by the tolerance.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// A zero-length segment never collides.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Whether `p` lies on the segment, or within `tolerance` of it.
    pub fn contains_point(&self, p: Point) -> bool {
        if self.is_degenerate() {
            return false;
        }
        if self.tolerance > 0.0 {
            // Probe circle of radius `tolerance` against the bare segment.
            dist_sq_to_segment(p, self.start, self.end) <= self.tolerance * self.tolerance
        } else {
            point_on_segment(p, self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_on_the_line() {
        let l = Line::new(0.0, 0.0, 10.0, 10.0);
        assert!(l.contains_point(Point::new(0.0, 0.0)));
        assert!(l.contains_point(Point::new(10.0, 10.0)));
        assert!(l.contains_point(Point::new(5.0, 5.0)));
        assert!(!l.contains_point(Point::new(5.0, 5.5)));
        assert!(!l.contains_point(Point::new(11.0, 11.0)));
    }

    #[test]
    fn tolerance_is_a_capsule() {
        let l = Line::new(0.0, 0.0, 10.0, 0.0).with_tolerance(2.0);
        assert!(l.contains_point(Point::new(5.0, 2.0)));
        assert!(l.contains_point(Point::new(-1.0, 1.0)));
        assert!(!l.contains_point(Point::new(5.0, 2.1)));
        assert!(!l.contains_point(Point::new(-2.0, 1.0)));
    }

    #[test]
    fn zero_length_is_degenerate() {
        let l = Line::new(3.0, 3.0, 3.0, 3.0).with_tolerance(5.0);
        assert!(l.is_degenerate());
        assert!(!l.contains_point(Point::new(3.0, 3.0)));
    }
}
