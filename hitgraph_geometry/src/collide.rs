// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Narrow-phase intersection tests.
//!
//! ## Tie-breaks
//!
//! - Boundaries are inclusive: touching counts as intersecting, and a point on an edge
//!   or vertex is contained.
//! - Degenerate (size-less) operands never intersect anything, themselves included.
//! - Two bare points never intersect.
//!
//! ## Dispatch
//!
//! [`intersects`] looks up the predicate for the unordered pair of [`ShapeKind`]s.
//! Rectangles, polygons and polygons-with-holes share one region implementation
//! through the crate-private [`Area`] trait; polylines fan out to their segments.
//!
//! [`ShapeKind`]: crate::shape::ShapeKind

use kurbo::Point;

use crate::bounds::Bounds;
use crate::shape::{Circle, GeoPolygon, Line, Polygon, Polyline, Rect, Shape};

/// Relative tolerance for "lies exactly on a segment" tests.
const ON_SEGMENT_EPSILON: f64 = 1e-9;

/// Cross product of `(b - a)` and `(c - a)`.
#[inline]
fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

/// Whether `p` lies on the closed segment `a`–`b`.
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    let d = b - a;
    let len_sq = d.hypot2();
    if len_sq == 0.0 {
        return p == a;
    }
    if cross(a, b, p).abs() > ON_SEGMENT_EPSILON * len_sq.max(1.0) {
        return false;
    }
    let t = (p - a).dot(d);
    (0.0..=len_sq).contains(&t)
}

/// The point on segment `a`–`b` closest to `p`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let d = b - a;
    let len_sq = d.hypot2();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(d) / len_sq).clamp(0.0, 1.0);
    a + d * t
}

/// Squared distance from `p` to the closed segment `a`–`b`.
pub fn dist_sq_to_segment(p: Point, a: Point, b: Point) -> f64 {
    (p - closest_point_on_segment(p, a, b)).hypot2()
}

/// Whether the closed segments `a1`–`a2` and `b1`–`b2` share a point.
///
/// Solves the parametric line-line system. Parallel segments only meet when they are
/// collinear, in which case both are projected onto the dominant axis and compared as
/// closed 1-D intervals.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let da = a2 - a1;
    let db = b2 - b1;
    let denom = db.y * da.x - db.x * da.y;
    let na = db.x * (a1.y - b1.y) - db.y * (a1.x - b1.x);
    let nb = da.x * (a1.y - b1.y) - da.y * (a1.x - b1.x);

    if denom == 0.0 {
        if na != 0.0 || nb != 0.0 {
            return false;
        }
        let use_x = da.x.abs() + db.x.abs() >= da.y.abs() + db.y.abs();
        let (a_lo, a_hi, b_lo, b_hi) = if use_x {
            (a1.x.min(a2.x), a1.x.max(a2.x), b1.x.min(b2.x), b1.x.max(b2.x))
        } else {
            (a1.y.min(a2.y), a1.y.max(a2.y), b1.y.min(b2.y), b1.y.max(b2.y))
        };
        return a_lo <= b_hi && b_lo <= a_hi;
    }

    let ua = na / denom;
    let ub = nb / denom;
    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}

/// Squared minimum distance between two closed segments.
pub fn segment_distance_sq(a1: Point, a2: Point, b1: Point, b2: Point) -> f64 {
    if segments_intersect(a1, a2, b1, b2) {
        return 0.0;
    }
    dist_sq_to_segment(a1, b1, b2)
        .min(dist_sq_to_segment(a2, b1, b2))
        .min(dist_sq_to_segment(b1, a1, a2))
        .min(dist_sq_to_segment(b2, a1, a2))
}

fn edges(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    ring.windows(2).map(|w| (w[0], w[1]))
}

/// Crossings of the horizontal ray `origin`–`p` with the ring's edges.
///
/// Only edges whose endpoints lie on opposite sides of the ray's line are counted,
/// so a ray through a vertex counts once where the boundary crosses and not at all
/// where it merely touches.
fn ray_crossings(ring: &[Point], origin: Point, p: Point) -> usize {
    edges(ring)
        .filter(|&(e0, e1)| (e0.y > p.y) != (e1.y > p.y) && segments_intersect(origin, p, e0, e1))
        .count()
}

/// Closed, possibly holed region made of rings.
pub(crate) trait Area {
    /// Closed rings; the first is the outer boundary.
    fn rings(&self) -> impl Iterator<Item = &[Point]>;

    /// Bounds enclosing every ring, or `None` when degenerate.
    fn area_bounds(&self) -> Option<Bounds>;
}

impl Area for Rect {
    fn rings(&self) -> impl Iterator<Item = &[Point]> {
        core::iter::once(self.ring())
    }

    fn area_bounds(&self) -> Option<Bounds> {
        (!self.is_degenerate()).then(|| self.bounds())
    }
}

impl Area for Polygon {
    fn rings(&self) -> impl Iterator<Item = &[Point]> {
        core::iter::once(self.ring())
    }

    fn area_bounds(&self) -> Option<Bounds> {
        self.bounds()
    }
}

impl Area for GeoPolygon {
    fn rings(&self) -> impl Iterator<Item = &[Point]> {
        self.rings().iter().map(Polygon::ring)
    }

    fn area_bounds(&self) -> Option<Bounds> {
        if self.is_degenerate() {
            None
        } else {
            self.bounds()
        }
    }
}

fn ring_starts(a: &impl Area) -> impl Iterator<Item = Point> + '_ {
    a.rings().filter_map(|r| r.first().copied())
}

fn area_edges(a: &impl Area) -> impl Iterator<Item = (Point, Point)> + '_ {
    a.rings().flat_map(edges)
}

/// Even-odd containment over every ring of `a`, boundary inclusive.
pub(crate) fn area_contains_point(a: &impl Area, p: Point) -> bool {
    let Some(bounds) = a.area_bounds() else {
        return false;
    };
    if !bounds.contains_point(p) {
        return false;
    }
    if a.rings().any(|r| edges(r).any(|(e0, e1)| point_on_segment(p, e0, e1))) {
        return true;
    }
    let origin = Point::new(bounds.min_x - 1.0, p.y);
    let crossings: usize = a.rings().map(|r| ray_crossings(r, origin, p)).sum();
    crossings % 2 == 1
}

fn area_intersects_segment(a: &impl Area, s0: Point, s1: Point, tolerance: f64) -> bool {
    let Some(bounds) = a.area_bounds() else {
        return false;
    };
    let t = tolerance.max(0.0);
    let seg = Bounds::new(
        s0.x.min(s1.x) - t,
        s0.y.min(s1.y) - t,
        s0.x.max(s1.x) + t,
        s0.y.max(s1.y) + t,
    );
    if !bounds.overlaps(&seg) {
        return false;
    }
    if area_edges(a).any(|(e0, e1)| segments_intersect(e0, e1, s0, s1)) {
        return true;
    }
    // No boundary crossing: the segment is either wholly inside or wholly outside.
    if area_contains_point(a, s0) {
        return true;
    }
    t > 0.0 && area_edges(a).any(|(e0, e1)| segment_distance_sq(e0, e1, s0, s1) <= t * t)
}

fn area_intersects_circle(a: &impl Area, c: &Circle) -> bool {
    let Some(bounds) = a.area_bounds() else {
        return false;
    };
    if !bounds.overlaps(&c.bounds()) {
        return false;
    }
    let center = c.center();
    let r_sq = c.radius() * c.radius();
    area_contains_point(a, center)
        || area_edges(a).any(|(e0, e1)| dist_sq_to_segment(center, e0, e1) <= r_sq)
}

fn area_intersects_area(a: &impl Area, b: &impl Area) -> bool {
    let (Some(ab), Some(bb)) = (a.area_bounds(), b.area_bounds()) else {
        return false;
    };
    if !ab.overlaps(&bb) {
        return false;
    }
    for (a0, a1) in area_edges(a) {
        if area_edges(b).any(|(b0, b1)| segments_intersect(a0, a1, b0, b1)) {
            return true;
        }
    }
    // No edges cross: one region lies wholly inside the other or they are disjoint.
    ring_starts(b).any(|p| area_contains_point(a, p))
        || ring_starts(a).any(|p| area_contains_point(b, p))
}

fn line_line(a: &Line, b: &Line) -> bool {
    if segments_intersect(a.start(), a.end(), b.start(), b.end()) {
        return true;
    }
    let t = a.tolerance() + b.tolerance();
    t > 0.0 && segment_distance_sq(a.start(), a.end(), b.start(), b.end()) <= t * t
}

fn line_circle(l: &Line, c: &Circle) -> bool {
    let reach = c.radius() + l.tolerance();
    dist_sq_to_segment(c.center(), l.start(), l.end()) <= reach * reach
}

fn line_area(l: &Line, a: &impl Area) -> bool {
    area_intersects_segment(a, l.start(), l.end(), l.tolerance())
}

fn rect_rect(a: &Rect, b: &Rect) -> bool {
    a.bounds().overlaps(&b.bounds())
}

fn rect_circle(r: &Rect, c: &Circle) -> bool {
    let b = r.bounds();
    let center = c.center();
    let nearest = Point::new(
        center.x.clamp(b.min_x, b.max_x),
        center.y.clamp(b.min_y, b.max_y),
    );
    (center - nearest).hypot2() <= c.radius() * c.radius()
}

fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius() + b.radius();
    (a.center() - b.center()).hypot2() <= reach * reach
}

fn polyline_any(p: &Polyline, f: impl Fn(&Line) -> bool) -> bool {
    p.segments().iter().any(f)
}

/// Whether two shapes share at least one point.
///
/// The relation is symmetric. Degenerate shapes never intersect.
pub fn intersects(a: &Shape, b: &Shape) -> bool {
    use Shape::{Circle as C, GeoPolygon as G, Line as L, Point as P, Polygon as Pg, Polyline as Pl, Rect as R};

    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }
    match (a, b) {
        (P(_), P(_)) => false,
        (P(p), other) | (other, P(p)) => other.contains_point(*p),

        (L(x), L(y)) => line_line(x, y),
        (L(l), R(r)) | (R(r), L(l)) => line_area(l, r),
        (L(l), C(c)) | (C(c), L(l)) => line_circle(l, c),
        (L(l), Pg(g)) | (Pg(g), L(l)) => line_area(l, g),
        (L(l), G(g)) | (G(g), L(l)) => line_area(l, g),
        (L(l), Pl(p)) | (Pl(p), L(l)) => polyline_any(p, |s| line_line(s, l)),

        (R(x), R(y)) => rect_rect(x, y),
        (R(r), C(c)) | (C(c), R(r)) => rect_circle(r, c),
        (R(r), Pg(g)) | (Pg(g), R(r)) => area_intersects_area(r, g),
        (R(r), G(g)) | (G(g), R(r)) => area_intersects_area(r, g),
        (R(r), Pl(p)) | (Pl(p), R(r)) => polyline_any(p, |s| line_area(s, r)),

        (C(x), C(y)) => circle_circle(x, y),
        (C(c), Pg(g)) | (Pg(g), C(c)) => area_intersects_circle(g, c),
        (C(c), G(g)) | (G(g), C(c)) => area_intersects_circle(g, c),
        (C(c), Pl(p)) | (Pl(p), C(c)) => polyline_any(p, |s| line_circle(s, c)),

        (Pg(x), Pg(y)) => area_intersects_area(x, y),
        (Pg(x), G(y)) | (G(y), Pg(x)) => area_intersects_area(x, y),
        (Pg(g), Pl(p)) | (Pl(p), Pg(g)) => polyline_any(p, |s| line_area(s, g)),

        (G(x), G(y)) => area_intersects_area(x, y),
        (G(g), Pl(p)) | (Pl(p), G(g)) => polyline_any(p, |s| line_area(s, g)),

        (Pl(x), Pl(y)) => polyline_any(x, |s| polyline_any(y, |t| line_line(s, t))),
    }
}
