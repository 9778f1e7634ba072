// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes used for cheap rejection before exact tests.

use core::cmp::Ordering;

use kurbo::Point;

/// Axis-aligned bounding box in 2D.
///
/// Edges are inclusive: a box whose `max_x` equals another box's `min_x` overlaps it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Minimum x (left)
    pub min_x: f64,
    /// Minimum y (top)
    pub min_y: f64,
    /// Maximum x (right)
    pub max_x: f64,
    /// Maximum y (bottom)
    pub max_y: f64,
}

impl Bounds {
    /// Create a new box from min/max corners.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a box from origin and size.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(it.fold(init, |acc, p| acc.include(p)))
    }

    /// Width of the box (never negative for a well-formed box).
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box (never negative for a well-formed box).
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The four corners, clockwise starting at `(min_x, min_y)`.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Whether this box contains the point (edges inclusive).
    pub fn contains_point(&self, p: Point) -> bool {
        le(self.min_x, p.x) && le(self.min_y, p.y) && le(p.x, self.max_x) && le(p.y, self.max_y)
    }

    /// Whether two boxes share at least one point (edges inclusive).
    pub fn overlaps(&self, other: &Self) -> bool {
        le(self.min_x, other.max_x)
            && le(other.min_x, self.max_x)
            && le(self.min_y, other.max_y)
            && le(other.min_y, self.max_y)
    }

    /// Grow the box to include `p`.
    #[must_use]
    pub fn include(self, p: Point) -> Self {
        Self {
            min_x: min_t(self.min_x, p.x),
            min_y: min_t(self.min_y, p.y),
            max_x: max_t(self.max_x, p.x),
            max_y: max_t(self.max_y, p.y),
        }
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: min_t(self.min_x, other.min_x),
            min_y: min_t(self.min_y, other.min_y),
            max_x: max_t(self.max_x, other.max_x),
            max_y: max_t(self.max_y, other.max_y),
        }
    }

    /// Return true if the box is inverted (no extent at all). Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }
}

impl From<kurbo::Rect> for Bounds {
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

impl From<Bounds> for kurbo::Rect {
    fn from(b: Bounds) -> Self {
        Self::new(b.min_x, b.min_y, b.max_x, b.max_y)
    }
}

fn min_t(a: f64, b: f64) -> f64 {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

fn max_t(a: f64, b: f64) -> f64 {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

fn le(a: f64, b: f64) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

fn lt(a: f64, b: f64) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
