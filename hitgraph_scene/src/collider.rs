// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node colliders and their derivation from geometry.

use hitgraph_geometry::path::{FlattenOptions, flatten_path, segment_shapes, thicken};
use hitgraph_geometry::{Bounds, Polyline, Shape};

use crate::types::{ColliderSpec, Geometry};

/// How a node answers hit-test queries.
///
/// | Variant | Query dispatch |
/// |---|---|
/// | `None` | skipped; children are still visited |
/// | `Shape` | exact test against this node only |
/// | `Collection` | any sub-shape hit makes the node one hit |
/// | `Bounds` | test the bounding box of the subtree, then visit children too |
/// | `FrontChild` | report only the front-most descendant that is hit |
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Collider {
    /// Not hit-testable.
    #[default]
    None,
    /// One shape in local coordinates.
    Shape(Shape),
    /// Several independent shapes sharing the node.
    Collection(Vec<Shape>),
    /// The node's local bounding box, including its descendants.
    ///
    /// Holds the box of the node's own geometry, if it has any extent.
    Bounds(Option<Bounds>),
    /// Opaque group where the topmost hit descendant wins.
    FrontChild,
}

impl Collider {
    /// Resolve a declared collider against the node's geometry.
    pub fn resolve(spec: ColliderSpec, geometry: &Geometry, opts: &FlattenOptions) -> Self {
        match spec {
            ColliderSpec::Auto => Self::from_geometry(geometry, opts),
            ColliderSpec::None => Self::None,
            ColliderSpec::Bounds => {
                Self::Bounds(Self::from_geometry(geometry, opts).shape_bounds())
            }
            ColliderSpec::FrontChild => Self::FrontChild,
            ColliderSpec::Shape(s) => Self::Shape(s),
            ColliderSpec::Collection(v) => Self::from_shapes(v),
        }
    }

    /// The collider a node gets when none is declared.
    ///
    /// Stroked polylines become polygons covering the stroke. Paths become a polygon or
    /// polygon-with-holes when every subpath is closed, otherwise a collection of
    /// per-subpath shapes with open ones hit within half the stroke width.
    pub fn from_geometry(geometry: &Geometry, opts: &FlattenOptions) -> Self {
        match geometry {
            Geometry::Group => Self::None,
            Geometry::Rect(r) => Self::Shape(Shape::Rect(r.clone())),
            Geometry::Circle(c) => Self::Shape(Shape::Circle(c.clone())),
            Geometry::Line(l) => Self::Shape(Shape::Line(l.clone())),
            Geometry::Polygon(p) => Self::Shape(Shape::Polygon(p.clone())),
            Geometry::Polyline {
                points,
                stroke_width,
            } => {
                if *stroke_width > 0.0 {
                    Self::Shape(Shape::Polygon(thicken(points, stroke_width / 2.0, true)))
                } else {
                    Self::Shape(Shape::Polyline(Polyline::new(points.iter().copied())))
                }
            }
            Geometry::Path { d, stroke_width } => {
                let segments = flatten_path(d, opts);
                Self::from_shapes(segment_shapes(&segments, stroke_width / 2.0))
            }
        }
    }

    fn from_shapes(mut shapes: Vec<Shape>) -> Self {
        match shapes.len() {
            0 => Self::None,
            1 => shapes.pop().map_or(Self::None, Self::Shape),
            _ => Self::Collection(shapes),
        }
    }

    /// Bounds of the collider's own shapes, ignoring descendants.
    ///
    /// For `Bounds` this is the box of the node's own geometry.
    pub fn shape_bounds(&self) -> Option<Bounds> {
        match self {
            Self::Shape(s) => s.bounds(),
            Self::Collection(v) => v.iter().filter_map(Shape::bounds).reduce(Bounds::union),
            Self::Bounds(own) => *own,
            Self::None | Self::FrontChild => None,
        }
    }

    /// Whether `query` hits one of the collider's own shapes.
    ///
    /// Always `false` for `None`, `Bounds` and `FrontChild`, which need the tree.
    pub fn hits_shape(&self, query: &Shape) -> bool {
        match self {
            Self::Shape(s) => s.intersects(query),
            Self::Collection(v) => v.iter().any(|s| s.intersects(query)),
            Self::None | Self::Bounds(_) | Self::FrontChild => false,
        }
    }
}
