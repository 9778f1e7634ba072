// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path pipeline: SVG path data to point lists, and point lists to colliders.
//!
//! - [`parse`] turns path data into absolute [`PathCommand`]s.
//! - [`flatten_commands`] walks them into one point list per subpath, flattening
//!   Béziers ([`flatten_cubic`]) and arcs ([`arc_points`]).
//! - [`segment_shapes`] picks polygon, polygon-with-holes or polyline colliders
//!   depending on which subpaths are closed.
//! - [`thicken`] turns a stroked centerline into a fillable polygon.

mod arc;
mod flatten;
mod parse;
mod segments;
mod thicken;

pub use arc::{ARC_RESOLUTION, arc_points, center_parameterize};
pub use flatten::{FlattenOptions, flatness, flatten_cubic, flatten_quad};
pub use parse::{ArcTo, PathCommand, parse};
pub use segments::{CLOSE_EPSILON, flatten_commands, flatten_path, is_closed, segment_shapes};
pub use thicken::{MITER_LIMIT, thicken};
