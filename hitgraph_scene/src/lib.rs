// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hitgraph Scene: a retained 2D scene graph answering "what is under this shape?".
//!
//! Nodes carry renderable [`Geometry`], an SVG-style transform list, optional user data
//! and a [`Collider`] derived from the geometry or chosen explicitly. Queries take a
//! [`Shape`](hitgraph_geometry::Shape) in logical coordinates and return the nodes it
//! hits, in paint order.
//!
//! ## API overview
//!
//! - [`Scene`]: arena of nodes rooted at a stage, with cached ancestors, descendants,
//!   model-view matrices and subtree bounds.
//! - [`NodeDesc`]: everything needed to create a node. See [`ColliderSpec`] for the
//!   collider choices.
//! - [`NodeId`]: generational handle of a node.
//! - [`QueryFilter`]: restricts queries by [`NodeFlags::VISIBLE`] and
//!   [`NodeFlags::PICKABLE`].
//! - [`Collision`]: a hit, chained to results for its ancestors.
//!
//! Key operations:
//! - [`Scene::add`] / [`Scene::insert`] / [`Scene::add_child`] / [`Scene::remove`]
//! - [`Scene::set_transform`] and [`Scene::set_dpi`]
//! - [`Scene::find_all`] and [`Scene::find_any`]
//!
//! ## Traversal rules
//!
//! The walk is depth-first from the stage, children in insertion order. A node whose
//! collider is hit is reported and its subtree is skipped. `Bounds` colliders are the
//! exception: a hit reports the node and keeps descending, a miss prunes the subtree.
//! `FrontChild` colliders report only the front-most descendant that is hit.
//!
//! ### Minimal usage
//!
//! ```
//! use hitgraph_geometry::{Rect, Shape};
//! use hitgraph_scene::{Geometry, NodeDesc, QueryFilter, Scene};
//! use kurbo::Point;
//!
//! let mut scene: Scene<&str> = Scene::new();
//! let a = scene.add(NodeDesc::new(Geometry::Rect(Rect::new(0.0, 0.0, 100.0, 100.0))).with_data("a"));
//! let b = scene.add(NodeDesc::new(Geometry::Rect(Rect::new(50.0, 50.0, 100.0, 100.0))).with_data("b"));
//! let _c = scene.add(NodeDesc::new(Geometry::Rect(Rect::new(500.0, 500.0, 100.0, 100.0))));
//!
//! let hits = scene.find_all(&Shape::Point(Point::new(60.0, 60.0)), QueryFilter::default());
//! let ids: Vec<_> = hits.iter().map(|h| h.node).collect();
//! assert_eq!(ids, vec![a, b]);
//! assert_eq!(scene.data(b), Some(&"b"));
//! ```

mod collider;
mod error;
mod resolve;
mod transform;
mod tree;
mod types;

pub use collider::Collider;
pub use error::TreeError;
pub use resolve::{Collision, QueryFilter};
pub use transform::{TransformOp, apply_transform, parse_transform};
pub use tree::{Scene, SceneOptions};
pub use types::{ColliderSpec, Geometry, NodeDesc, NodeFlags, NodeId};
