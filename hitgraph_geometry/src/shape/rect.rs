// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::bounds::Bounds;

/// Axis-aligned rectangle collider.
///
/// Negative sizes are normalized on construction by shifting the origin, so
/// [`Rect::width`] and [`Rect::height`] are never negative. Optional minimum sizes
/// grow the rectangle away from its (normalized) origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    min_width: f64,
    min_height: f64,
    ring: [Point; 5],
    bounds: Bounds,
}

impl Rect {
    /// Create a rectangle from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_min_size(x, y, width, height, 0.0, 0.0)
    }

    /// Create a rectangle whose normalized size is clamped to at least the given minimums.
    pub fn with_min_size(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        min_width: f64,
        min_height: f64,
    ) -> Self {
        let mut r = Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            min_width,
            min_height,
            ring: [Point::ZERO; 5],
            bounds: Bounds::new(0.0, 0.0, 0.0, 0.0),
        };
        r.set(x, y, width, height);
        r
    }

    /// Replace the defining fields and re-derive corners and bounds.
    pub fn set(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x, width) = normalize(x, width, self.min_width);
        let (y, height) = normalize(y, height, self.min_height);
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self.bounds = Bounds::from_xywh(x, y, width, height);
        let [a, b, c, d] = self.bounds.corners();
        self.ring = [a, b, c, d, a];
    }

    /// Left edge after normalization.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Top edge after normalization.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Width, never negative.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height, never negative.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The four corners, clockwise from the origin.
    pub fn points(&self) -> &[Point] {
        &self.ring[..4]
    }

    /// The corners as a closed ring (first corner repeated at the end).
    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    /// Bounding box (the rectangle itself).
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// A rectangle without area never collides.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Edge-inclusive point containment.
    pub fn contains_point(&self, p: Point) -> bool {
        !self.is_degenerate() && self.bounds.contains_point(p)
    }
}

fn normalize(origin: f64, size: f64, min: f64) -> (f64, f64) {
    let (origin, size) = if size < 0.0 {
        (origin + size, -size)
    } else {
        (origin, size)
    };
    (origin, size.max(min))
}
