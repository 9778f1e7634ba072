// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::bounds::Bounds;

/// Circle collider.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    center: Point,
    r: f64,
    bounds: Bounds,
}

impl Circle {
    /// Create a circle from center coordinates and radius.
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        let mut c = Self {
            center: Point::ZERO,
            r: 0.0,
            bounds: Bounds::new(0.0, 0.0, 0.0, 0.0),
        };
        c.set(cx, cy, r);
        c
    }

    /// Replace the defining fields.
    pub fn set(&mut self, cx: f64, cy: f64, r: f64) {
        self.center = Point::new(cx, cy);
        self.r = r;
        let ar = r.abs();
        self.bounds = Bounds::new(cx - ar, cy - ar, cx + ar, cy + ar);
    }

    /// Center point.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius as given.
    pub fn radius(&self) -> f64 {
        self.r
    }

    /// Bounding box.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// `r <= 0` (or NaN) circles never collide.
    pub fn is_degenerate(&self) -> bool {
        !(self.r > 0.0)
    }

    /// Boundary-inclusive point containment.
    pub fn contains_point(&self, p: Point) -> bool {
        !self.is_degenerate() && (p - self.center).hypot2() <= self.r * self.r
    }
}
