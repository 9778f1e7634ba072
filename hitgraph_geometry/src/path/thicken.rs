// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a stroked centerline into a fillable polygon.

use kurbo::{Point, Vec2};

use crate::shape::Polygon;

/// Longest allowed miter, as a multiple of the stroke radius.
pub const MITER_LIMIT: f64 = 4.0;

fn unit_normal(a: Point, b: Point) -> Option<Vec2> {
    let d = b - a;
    let len = d.hypot();
    (len > 0.0).then(|| Vec2::new(-d.y / len, d.x / len))
}

/// Offset polygon around the polyline `points` at distance `radius`.
///
/// Interior vertices are offset along the bisector of the adjoining segment normals,
/// with the miter length capped at [`MITER_LIMIT`] radii. With `force_orientation`
/// the first and last segments are extended by `radius` so the polygon covers the
/// stroke's open ends.
///
/// Non-finite points are dropped. Fewer than two distinct points left, or a zero or
/// non-finite radius, give a degenerate polygon.
pub fn thicken(points: &[Point], radius: f64, force_orientation: bool) -> Polygon {
    let mut line: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points.iter().filter(|p| p.is_finite()) {
        if line.last() != Some(&p) {
            line.push(p);
        }
    }
    let r = radius.abs();
    if line.len() < 2 || r == 0.0 || !r.is_finite() {
        return Polygon::new(core::iter::empty());
    }

    let normals: Vec<Vec2> = line
        .windows(2)
        .filter_map(|w| unit_normal(w[0], w[1]))
        .collect();
    // One normal per segment, or the offsets below index past the end.
    if normals.len() != line.len() - 1 {
        return Polygon::new(core::iter::empty());
    }

    if force_orientation {
        let last = line.len() - 1;
        let head = (line[0] - line[1]).normalize() * r;
        let tail = (line[last] - line[last - 1]).normalize() * r;
        line[0] += head;
        line[last] += tail;
    }

    let mut left = Vec::with_capacity(line.len());
    let mut right = Vec::with_capacity(line.len());
    for (i, &p) in line.iter().enumerate() {
        let offset = if i == 0 {
            normals[0] * r
        } else if i == normals.len() {
            normals[i - 1] * r
        } else {
            miter(normals[i - 1], normals[i], r)
        };
        left.push(p + offset);
        right.push(p - offset);
    }
    left.extend(right.into_iter().rev());
    Polygon::new(left)
}

fn miter(n0: Vec2, n1: Vec2, r: f64) -> Vec2 {
    let sum = n0 + n1;
    let len = sum.hypot();
    if len < 1e-12 {
        return n0 * r;
    }
    let bisector = sum / len;
    let cos = bisector.dot(n0);
    bisector * (r / cos).min(r * MITER_LIMIT)
}
