// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier flattening by recursive de Casteljau subdivision.

use kurbo::{CubicBez, ParamCurve, Point, QuadBez};

/// Tunables for curve flattening.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlattenOptions {
    /// Stop subdividing once the summed control-point distance from the chord drops
    /// below this value.
    pub flatness: f64,
    /// Maximum recursion depth; output is capped at `2^max_depth` segments per curve.
    pub max_depth: u32,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            flatness: 10.0,
            max_depth: 8,
        }
    }
}

/// Sum of the perpendicular distances of both control points from the chord.
pub fn flatness(c: &CubicBez) -> f64 {
    let chord = c.p3 - c.p0;
    let len = chord.hypot();
    if len == 0.0 {
        return (c.p1 - c.p0).hypot() + (c.p2 - c.p0).hypot();
    }
    (chord.cross(c.p1 - c.p0).abs() + chord.cross(c.p2 - c.p0).abs()) / len
}

/// Flatten a cubic into a polyline running from `p0` to `p3`.
///
/// A straight curve yields exactly its two endpoints. Every returned point lies on
/// the curve.
pub fn flatten_cubic(c: CubicBez, opts: &FlattenOptions) -> Vec<Point> {
    let mut out = vec![c.p0];
    subdivide(c, 0, opts, &mut out);
    out
}

/// Flatten a quadratic by raising it to a cubic first.
pub fn flatten_quad(q: QuadBez, opts: &FlattenOptions) -> Vec<Point> {
    flatten_cubic(q.raise(), opts)
}

fn subdivide(c: CubicBez, depth: u32, opts: &FlattenOptions, out: &mut Vec<Point>) {
    let f = flatness(&c);
    if depth >= opts.max_depth || f < opts.flatness || f.is_nan() {
        out.push(c.p3);
        return;
    }
    let (a, b) = c.subdivide();
    subdivide(a, depth + 1, opts, out);
    subdivide(b, depth + 1, opts, out);
}
