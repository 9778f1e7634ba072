// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hitgraph Geometry: the geometric core of a 2D hit-testing scene graph.
//!
//! - [`Matrix`]: a 3×3 homogeneous affine matrix with a save/restore stack.
//! - Collider primitives ([`Rect`], [`Circle`], [`Line`], [`Polygon`], [`GeoPolygon`],
//!   [`Polyline`]) and the [`Shape`] union over them.
//! - [`collide`]: exact pairwise intersection tests for every pair of shape kinds.
//! - [`path`]: SVG path data to point lists, Bézier and arc flattening, and stroke
//!   thickening.
//!
//! ## Tie-breaks
//!
//! Boundaries are inclusive: a point on an edge is inside and touching shapes
//! intersect. Shapes without size (zero-length lines, zero-area rects and circles,
//! polygons with fewer than three distinct vertices) are degenerate and never
//! intersect or contain anything, not even themselves. Two bare points never
//! intersect.
//!
//! None of these operations fail. Degenerate input yields `false`, a singular matrix
//! inverts to non-finite elements, and unknown path commands are skipped.
//!
//! ## Example
//!
//! ```
//! use hitgraph_geometry::{Matrix, Shape, ShapeDesc};
//! use hitgraph_geometry::path::{FlattenOptions, flatten_path, segment_shapes};
//! use kurbo::Point;
//!
//! // A square with a square hole, drawn as two closed subpaths.
//! let segments = flatten_path(
//!     "M0 0 H100 V100 H0 Z M40 40 H60 V60 H40 Z",
//!     &FlattenOptions::default(),
//! );
//! let shapes = segment_shapes(&segments, 0.0);
//! let region = &shapes[0];
//!
//! let probe = Shape::infer(&ShapeDesc::point(10.0, 10.0)).unwrap();
//! assert!(region.intersects(&probe));
//! assert!(!region.contains_point(Point::new(50.0, 50.0)));
//!
//! // Move the region and probe it in its own frame.
//! let mut m = Matrix::identity();
//! m.translate(200.0, 0.0);
//! let local = Shape::Point(Point::new(210.0, 10.0)).transformed(&m.inverse());
//! assert!(region.intersects(&local));
//! ```
//!
//! This crate depends on `std` for floating-point math.

mod bounds;
pub mod collide;
mod matrix;
pub mod path;
mod shape;

pub use bounds::Bounds;
pub use matrix::{Elements, Matrix, Multiplier};
pub use shape::{Circle, GeoPolygon, Line, Polygon, Polyline, Rect, Shape, ShapeDesc, ShapeKind};
