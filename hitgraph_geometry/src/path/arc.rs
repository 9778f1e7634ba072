// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Endpoint-to-center conversion and sampling for elliptical arcs.

use core::f64::consts::{PI, TAU};

use kurbo::{Arc, Point, Vec2};

use super::flatten::FlattenOptions;
use super::parse::ArcTo;

/// Estimated arc length covered by each sampled point.
pub const ARC_RESOLUTION: f64 = 10.0;

/// Convert an endpoint-parameterized arc into center form.
///
/// Radii that cannot span the chord are scaled up uniformly until they can. Returns
/// `None` when the arc is a straight line: either radius is zero or both endpoints
/// coincide.
pub fn center_parameterize(arc: &ArcTo) -> Option<Arc> {
    let mut rx = arc.radii.x.abs();
    let mut ry = arc.radii.y.abs();
    if rx == 0.0 || ry == 0.0 || arc.from == arc.to {
        return None;
    }

    let (sin_phi, cos_phi) = arc.x_rotation.sin_cos();
    let half = (arc.from - arc.to) * 0.5;
    let x1p = cos_phi * half.x + sin_phi * half.y;
    let y1p = -sin_phi * half.x + cos_phi * half.y;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = (rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p).max(0.0);
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let sign = if arc.large_arc == arc.sweep { -1.0 } else { 1.0 };
    let coef = sign * (num / den).sqrt();
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    let mid = arc.from.midpoint(arc.to);
    let center = Point::new(
        cos_phi * cxp - sin_phi * cyp + mid.x,
        sin_phi * cxp + cos_phi * cyp + mid.y,
    );

    let u = Vec2::new((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = Vec2::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let start_angle = u.atan2();
    let mut sweep_angle = u.cross(v).atan2(u.dot(v));
    if arc.sweep && sweep_angle < 0.0 {
        sweep_angle += TAU;
    } else if !arc.sweep && sweep_angle > 0.0 {
        sweep_angle -= TAU;
    }

    Some(Arc {
        center,
        radii: Vec2::new(rx, ry),
        start_angle,
        sweep_angle,
        x_rotation: arc.x_rotation,
    })
}

/// Ramanujan's approximation of a full ellipse perimeter.
fn ellipse_perimeter(radii: Vec2) -> f64 {
    let (a, b) = (radii.x, radii.y);
    PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt())
}

/// Point on `arc` at `angle` around its center.
fn point_at(arc: &Arc, angle: f64) -> Point {
    let (s, c) = angle.sin_cos();
    let (sr, cr) = arc.x_rotation.sin_cos();
    let x = arc.radii.x * c;
    let y = arc.radii.y * s;
    Point::new(
        arc.center.x + cr * x - sr * y,
        arc.center.y + sr * x + cr * y,
    )
}

/// Sample an arc roughly every [`ARC_RESOLUTION`] units of its estimated length.
///
/// The result starts at `from` and ends exactly at `to`. Straight arcs yield
/// both endpoints only. Like Bézier flattening, the output is capped at
/// `2^max_depth` segments.
pub fn arc_points(arc: &ArcTo, opts: &FlattenOptions) -> Vec<Point> {
    let Some(center) = center_parameterize(arc) else {
        return vec![arc.from, arc.to];
    };
    let length = ellipse_perimeter(center.radii) * center.sweep_angle.abs() / TAU;
    let cap = 1_usize.checked_shl(opts.max_depth).unwrap_or(usize::MAX);
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float-to-int casts saturate; the step count is clamped below"
    )]
    let steps = ((length / ARC_RESOLUTION).ceil() as usize).clamp(1, cap);
    let mut out = Vec::with_capacity(steps + 1);
    out.push(arc.from);
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        out.push(point_at(&center, center.start_angle + center.sweep_angle * t));
    }
    out.push(arc.to);
    out
}
