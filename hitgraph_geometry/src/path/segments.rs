// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! From commands to subpath point lists, and from point lists to colliders.

use kurbo::{CubicBez, Point, QuadBez};

use super::arc::arc_points;
use super::flatten::{FlattenOptions, flatten_cubic, flatten_quad};
use super::parse::{PathCommand, parse};
use crate::shape::{GeoPolygon, Polygon, Polyline, Shape};

/// Maximum endpoint distance for a subpath to count as closed.
pub const CLOSE_EPSILON: f64 = 1e-6;

/// Flatten commands into one point list per subpath.
///
/// Every move-to starts a new subpath. A close appends the subpath's start point, and
/// drawing after a close continues from that start in a fresh subpath.
pub fn flatten_commands(commands: &[PathCommand], opts: &FlattenOptions) -> Vec<Vec<Point>> {
    let mut out = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut pen = Point::ZERO;
    let mut start = Point::ZERO;

    for cmd in commands {
        if current.is_empty() && !matches!(cmd, PathCommand::MoveTo(_) | PathCommand::Close) {
            current.push(pen);
        }
        match *cmd {
            PathCommand::MoveTo(p) => {
                flush(&mut out, &mut current);
                current.push(p);
                start = p;
                pen = p;
            }
            PathCommand::LineTo(p) => {
                current.push(p);
                pen = p;
            }
            PathCommand::QuadTo(c, p) => {
                let pts = flatten_quad(QuadBez::new(pen, c, p), opts);
                current.extend_from_slice(&pts[1..]);
                pen = p;
            }
            PathCommand::CubicTo(c1, c2, p) => {
                let pts = flatten_cubic(CubicBez::new(pen, c1, c2, p), opts);
                current.extend_from_slice(&pts[1..]);
                pen = p;
            }
            PathCommand::ArcTo(arc) => {
                let pts = arc_points(&arc, opts);
                current.extend_from_slice(&pts[1..]);
                pen = arc.to;
            }
            PathCommand::Close => {
                if !current.is_empty() {
                    if current.last() != Some(&start) {
                        current.push(start);
                    }
                    flush(&mut out, &mut current);
                }
                pen = start;
            }
        }
    }
    flush(&mut out, &mut current);
    out
}

fn flush(out: &mut Vec<Vec<Point>>, current: &mut Vec<Point>) {
    if !current.is_empty() {
        out.push(core::mem::take(current));
    }
}

/// Parse and flatten SVG path data in one step.
pub fn flatten_path(d: &str, opts: &FlattenOptions) -> Vec<Vec<Point>> {
    flatten_commands(&parse(d), opts)
}

/// Whether the subpath ends where it starts, within [`CLOSE_EPSILON`].
pub fn is_closed(segment: &[Point]) -> bool {
    match (segment.first(), segment.last()) {
        (Some(first), Some(last)) if segment.len() > 1 => first.distance(*last) <= CLOSE_EPSILON,
        _ => false,
    }
}

/// Colliders for a set of flattened subpaths.
///
/// When every subpath is closed they form one region: a [`Polygon`] for a single
/// subpath, a [`GeoPolygon`] (outer ring plus holes) for several. Otherwise each
/// subpath becomes its own shape, closed ones as polygons and open ones as polylines
/// with the given `tolerance`. Single-point subpaths are dropped.
pub fn segment_shapes(segments: &[Vec<Point>], tolerance: f64) -> Vec<Shape> {
    let usable: Vec<&Vec<Point>> = segments.iter().filter(|s| s.len() > 1).collect();
    let all_closed = usable.iter().all(|s| is_closed(s));
    if all_closed && usable.len() > 1 {
        let rings = usable.iter().map(|s| s.iter().copied());
        return vec![Shape::GeoPolygon(GeoPolygon::new(rings))];
    }
    usable
        .into_iter()
        .map(|s| {
            if is_closed(s) {
                Shape::Polygon(Polygon::new(s.iter().copied()))
            } else {
                Shape::Polyline(Polyline::with_tolerance(s.iter().copied(), tolerance))
            }
        })
        .collect()
}
