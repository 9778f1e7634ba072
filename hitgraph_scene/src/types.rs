// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, and node descriptions.

use hitgraph_geometry::{Circle, Line, Polygon, Rect, Shape};
use kurbo::Point;

/// Identifier for a node in the scene.
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// - On insert, a fresh slot gets generation `1`.
/// - On remove, the slot is freed and every id pointing at it becomes stale.
/// - On reuse of a freed slot, its generation is incremented, so the new id is distinct.
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check liveness. Stale ids never
/// alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible. Invisible nodes hide their whole subtree from queries.
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable. Non-pickable nodes are skipped, but their children are not.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// What a node draws, in its local coordinate system.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Geometry {
    /// A container with nothing of its own to draw.
    #[default]
    Group,
    /// A rectangle.
    Rect(Rect),
    /// A circle.
    Circle(Circle),
    /// A line segment; its tolerance widens the hit area.
    Line(Line),
    /// An open stroked polyline.
    Polyline {
        /// Centerline points.
        points: Vec<Point>,
        /// Full stroke width.
        stroke_width: f64,
    },
    /// A filled polygon.
    Polygon(Polygon),
    /// SVG path data.
    Path {
        /// Path data string.
        d: String,
        /// Full stroke width, used for open subpaths.
        stroke_width: f64,
    },
}

/// Collider choice in a [`NodeDesc`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ColliderSpec {
    /// Derive the collider from the node's geometry.
    #[default]
    Auto,
    /// Not hit-testable; children are still visited.
    None,
    /// Test the node's bounding box, then also visit its children.
    Bounds,
    /// Report only the front-most descendant that is hit.
    FrontChild,
    /// Test one explicit shape.
    Shape(Shape),
    /// Test several shapes as one node.
    Collection(Vec<Shape>),
}

/// Declarative description of a node, consumed by [`Scene::insert`](crate::Scene::insert).
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDesc<D> {
    /// Local geometry.
    pub geometry: Geometry,
    /// SVG transform list relative to the parent, such as `"translate(10,0) rotate(45)"`.
    pub transform: Option<String>,
    /// Collider override.
    pub collider: ColliderSpec,
    /// Payload returned with hits.
    pub data: Option<D>,
    /// Free-form type tag.
    pub tag: Option<String>,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
}

impl<D> Default for NodeDesc<D> {
    fn default() -> Self {
        Self {
            geometry: Geometry::Group,
            transform: None,
            collider: ColliderSpec::Auto,
            data: None,
            tag: None,
            flags: NodeFlags::default(),
        }
    }
}

impl<D> NodeDesc<D> {
    /// A node drawing `geometry` with every other field at its default.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }

    /// An empty group.
    pub fn group() -> Self {
        Self::default()
    }

    /// Set the transform list.
    #[must_use]
    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    /// Override the collider.
    #[must_use]
    pub fn with_collider(mut self, collider: ColliderSpec) -> Self {
        self.collider = collider;
        self
    }

    /// Attach a payload.
    #[must_use]
    pub fn with_data(mut self, data: D) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach a type tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Replace the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }
}
