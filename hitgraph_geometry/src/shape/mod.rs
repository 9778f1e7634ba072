// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collider primitives and the [`Shape`] union that carries any of them.
//!
//! Each primitive owns its defining fields and derives its point list and bounds on
//! construction, so predicates never recompute them. Pairwise tests live in
//! [`crate::collide`].

mod circle;
mod desc;
mod geo_polygon;
mod line;
mod polygon;
mod polyline;
mod rect;

pub use circle::Circle;
pub use desc::ShapeDesc;
pub use geo_polygon::GeoPolygon;
pub use line::Line;
pub use polygon::Polygon;
pub use polyline::Polyline;
pub use rect::Rect;

use kurbo::Point;

use crate::bounds::Bounds;
use crate::collide;
use crate::matrix::Matrix;

/// Discriminant of a [`Shape`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    /// A bare point.
    Point,
    /// A line segment.
    Line,
    /// An axis-aligned rectangle.
    Rect,
    /// A circle.
    Circle,
    /// A closed polygon.
    Polygon,
    /// A polygon with holes.
    GeoPolygon,
    /// An open polyline.
    Polyline,
}

/// Any collider primitive, or a bare point used as a query.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A bare point. It has no size, but it may lie inside other shapes.
    Point(Point),
    /// See [`Line`].
    Line(Line),
    /// See [`Rect`].
    Rect(Rect),
    /// See [`Circle`].
    Circle(Circle),
    /// See [`Polygon`].
    Polygon(Polygon),
    /// See [`GeoPolygon`].
    GeoPolygon(GeoPolygon),
    /// See [`Polyline`].
    Polyline(Polyline),
}

impl Shape {
    /// Infer a shape from a loosely-typed descriptor.
    ///
    /// Fields are probed in a fixed order: circle (`cx`, `cy`, `r`), line
    /// (`x1`, `y1`, `x2`, `y2`), polygon (`vertices`), rect (`x`, `y`, `width`,
    /// `height`), then point (`x`, `y`). Returns `None` when nothing matches.
    pub fn infer(desc: &ShapeDesc) -> Option<Self> {
        if let (Some(cx), Some(cy), Some(r)) = (desc.cx, desc.cy, desc.r) {
            return Some(Self::Circle(Circle::new(cx, cy, r)));
        }
        if let (Some(x1), Some(y1), Some(x2), Some(y2)) = (desc.x1, desc.y1, desc.x2, desc.y2) {
            return Some(Self::Line(Line::new(x1, y1, x2, y2)));
        }
        if let Some(vertices) = &desc.vertices {
            return Some(Self::Polygon(Polygon::from_coords(vertices.iter().copied())));
        }
        match (desc.x, desc.y, desc.width, desc.height) {
            (Some(x), Some(y), Some(w), Some(h)) => Some(Self::Rect(Rect::new(x, y, w, h))),
            (Some(x), Some(y), _, _) => Some(Self::Point(Point::new(x, y))),
            _ => None,
        }
    }

    /// The variant of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::Line(_) => ShapeKind::Line,
            Self::Rect(_) => ShapeKind::Rect,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::GeoPolygon(_) => ShapeKind::GeoPolygon,
            Self::Polyline(_) => ShapeKind::Polyline,
        }
    }

    /// Whether the shape has no size and therefore never collides.
    ///
    /// Bare points are not degenerate: they are valid probes.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Point(p) => !(p.x.is_finite() && p.y.is_finite()),
            Self::Line(l) => l.is_degenerate(),
            Self::Rect(r) => r.is_degenerate(),
            Self::Circle(c) => c.is_degenerate(),
            Self::Polygon(p) => p.is_degenerate(),
            Self::GeoPolygon(g) => g.is_degenerate(),
            Self::Polyline(p) => p.is_degenerate(),
        }
    }

    /// Bounding box. `None` for degenerate shapes without a defined extent.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Point(p) => Some(Bounds::new(p.x, p.y, p.x, p.y)),
            Self::Line(l) => Some(l.bounds()),
            Self::Rect(r) => Some(r.bounds()),
            Self::Circle(c) => Some(c.bounds()),
            Self::Polygon(p) => p.bounds(),
            Self::GeoPolygon(g) => g.bounds(),
            Self::Polyline(p) => p.bounds(),
        }
    }

    /// Whether the shape contains `p`. A bare point contains nothing.
    pub fn contains_point(&self, p: Point) -> bool {
        match self {
            Self::Point(_) => false,
            Self::Line(l) => l.contains_point(p),
            Self::Rect(r) => r.contains_point(p),
            Self::Circle(c) => c.contains_point(p),
            Self::Polygon(g) => g.contains_point(p),
            Self::GeoPolygon(g) => g.contains_point(p),
            Self::Polyline(l) => l.contains_point(p),
        }
    }

    /// Whether the two shapes share a point. See [`collide::intersects`].
    pub fn intersects(&self, other: &Self) -> bool {
        collide::intersects(self, other)
    }

    /// Map the shape through `m`.
    ///
    /// Vertex-based shapes map exactly. A rectangle stays a rectangle under an
    /// axis-aligned matrix and becomes a four-vertex polygon otherwise. Circle radii
    /// and line tolerances scale by the matrix's length scale (`sqrt(|det|)`).
    #[must_use]
    pub fn transformed(&self, m: &Matrix) -> Self {
        let k = m.length_scale();
        match self {
            Self::Point(p) => Self::Point(m.transform_point(*p)),
            Self::Line(l) => Self::Line(Line::from_points(
                m.transform_point(l.start()),
                m.transform_point(l.end()),
                l.tolerance() * k,
            )),
            Self::Rect(r) => {
                let corners = m.transform_points(r.points());
                if m.is_axis_aligned() {
                    match Bounds::from_points(corners) {
                        Some(b) => Self::Rect(Rect::new(b.min_x, b.min_y, b.width(), b.height())),
                        None => Self::Rect(r.clone()),
                    }
                } else {
                    Self::Polygon(Polygon::new(corners))
                }
            }
            Self::Circle(c) => {
                let center = m.transform_point(c.center());
                Self::Circle(Circle::new(center.x, center.y, c.radius() * k))
            }
            Self::Polygon(p) => Self::Polygon(Polygon::new(m.transform_points(p.ring()))),
            Self::GeoPolygon(g) => Self::GeoPolygon(GeoPolygon::new(
                g.rings().iter().map(|r| m.transform_points(r.ring())),
            )),
            Self::Polyline(p) => Self::Polyline(Polyline::with_tolerance(
                m.transform_points(p.points()),
                p.tolerance() * k,
            )),
        }
    }

    /// Uniformly scale the shape about the origin.
    #[must_use]
    pub fn scaled(&self, s: f64) -> Self {
        if s == 1.0 {
            return self.clone();
        }
        let mut m = Matrix::identity();
        m.scale_uniform(s);
        self.transformed(&m)
    }
}

impl From<Point> for Shape {
    fn from(p: Point) -> Self {
        Self::Point(p)
    }
}

impl From<Line> for Shape {
    fn from(l: Line) -> Self {
        Self::Line(l)
    }
}

impl From<Rect> for Shape {
    fn from(r: Rect) -> Self {
        Self::Rect(r)
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}

impl From<GeoPolygon> for Shape {
    fn from(g: GeoPolygon) -> Self {
        Self::GeoPolygon(g)
    }
}

impl From<Polyline> for Shape {
    fn from(p: Polyline) -> Self {
        Self::Polyline(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_4;

    #[test]
    fn infer_precedence() {
        let circle = ShapeDesc {
            cx: Some(1.0),
            cy: Some(1.0),
            r: Some(2.0),
            x: Some(0.0),
            y: Some(0.0),
            ..Default::default()
        };
        assert_eq!(Shape::infer(&circle).map(|s| s.kind()), Some(ShapeKind::Circle));

        let rect = ShapeDesc {
            x: Some(0.0),
            y: Some(0.0),
            width: Some(3.0),
            height: Some(4.0),
            ..Default::default()
        };
        assert_eq!(Shape::infer(&rect).map(|s| s.kind()), Some(ShapeKind::Rect));

        let point = ShapeDesc {
            x: Some(0.0),
            y: Some(0.0),
            width: Some(3.0),
            ..Default::default()
        };
        assert_eq!(Shape::infer(&point).map(|s| s.kind()), Some(ShapeKind::Point));

        let poly = ShapeDesc {
            vertices: Some(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
            ..Default::default()
        };
        assert_eq!(Shape::infer(&poly).map(|s| s.kind()), Some(ShapeKind::Polygon));
    }

    #[test]
    fn infer_unknown_is_none() {
        let partial = ShapeDesc {
            x1: Some(0.0),
            cx: Some(1.0),
            ..Default::default()
        };
        assert!(Shape::infer(&partial).is_none());
        assert!(Shape::infer(&ShapeDesc::default()).is_none());
    }

    #[test]
    fn rotated_rect_becomes_polygon() {
        let mut m = Matrix::identity();
        m.rotate(FRAC_PI_4);
        let r = Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let t = r.transformed(&m);
        assert_eq!(t.kind(), ShapeKind::Polygon);

        let mut s = Matrix::identity();
        s.translate(5.0, 5.0).scale(-2.0, 1.0);
        let t = r.transformed(&s);
        let Shape::Rect(t) = t else {
            panic!("axis-aligned transforms keep rectangles");
        };
        assert_eq!((t.x(), t.y(), t.width(), t.height()), (-15.0, 5.0, 20.0, 10.0));
    }

    #[test]
    fn circle_radius_scales() {
        let c = Shape::Circle(Circle::new(1.0, 1.0, 2.0)).scaled(3.0);
        let Shape::Circle(c) = c else {
            panic!("circles stay circles");
        };
        assert_eq!(c.center(), Point::new(3.0, 3.0));
        assert_eq!(c.radius(), 6.0);
    }
}
