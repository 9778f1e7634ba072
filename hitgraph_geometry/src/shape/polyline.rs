// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::bounds::Bounds;
use crate::shape::Line;

/// Open chain of line segments sharing one tolerance.
///
/// Every predicate is the OR of the same predicate over its segments.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
    segments: Vec<Line>,
    tolerance: f64,
    bounds: Option<Bounds>,
}

impl Polyline {
    /// Build from points with zero tolerance.
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        Self::with_tolerance(points, 0.0)
    }

    /// Build from points; each segment gets `tolerance` as its capsule radius.
    pub fn with_tolerance<I>(points: I, tolerance: f64) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut pts: Vec<Point> = Vec::new();
        for p in points {
            if pts.last() != Some(&p) {
                pts.push(p);
            }
        }
        let segments: Vec<Line> = pts
            .windows(2)
            .map(|w| Line::from_points(w[0], w[1], tolerance))
            .collect();
        let bounds = segments
            .iter()
            .map(Line::bounds)
            .reduce(Bounds::union);
        Self {
            points: pts,
            segments,
            tolerance: tolerance.max(0.0),
            bounds,
        }
    }

    /// Points with consecutive duplicates removed.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consecutive segments.
    pub fn segments(&self) -> &[Line] {
        &self.segments
    }

    /// Capsule radius of every segment.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Union of the segment bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Fewer than two distinct points.
    pub fn is_degenerate(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether any segment contains the point.
    pub fn contains_point(&self, p: Point) -> bool {
        self.segments.iter().any(|s| s.contains_point(p))
    }
}
