// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision resolver: ordered hit-testing over the scene.

use core::ops::ControlFlow;
use std::sync::Arc;

use hitgraph_geometry::{Rect, Shape, ShapeDesc};

use crate::collider::Collider;
use crate::tree::Scene;
use crate::types::{NodeFlags, NodeId};

/// Filters applied during queries.
///
/// Used by [`Scene::find_all`] and [`Scene::find_any`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryFilter {
    /// If true, nodes not marked [`NodeFlags::VISIBLE`] hide their whole subtree.
    pub visible_only: bool,
    /// If true, nodes not marked [`NodeFlags::PICKABLE`] are skipped (hit-test);
    /// their children are still visited.
    pub pickable_only: bool,
}

impl QueryFilter {
    /// Ignore flags entirely.
    pub const ALL: Self = Self {
        visible_only: false,
        pickable_only: false,
    };

    /// Only visible, pickable nodes: what pointer interaction wants.
    pub const INTERACTIVE: Self = Self {
        visible_only: true,
        pickable_only: true,
    };

    fn visits(self, flags: NodeFlags) -> bool {
        !self.visible_only || flags.contains(NodeFlags::VISIBLE)
    }

    fn picks(self, flags: NodeFlags) -> bool {
        !self.pickable_only || flags.contains(NodeFlags::PICKABLE)
    }
}

/// One hit.
///
/// `parent` links to a result for the hit node's parent, and so on up to (but
/// excluding) the node the query started from, usually the stage. `input` is the query
/// as given, before device scaling and inverse transforms.
#[derive(Clone, Debug)]
pub struct Collision {
    /// The node that was hit.
    pub node: NodeId,
    /// Result for the parent node, if it is below the query root.
    pub parent: Option<Box<Collision>>,
    /// The original query shape, shared by every result of one query.
    pub input: Arc<Shape>,
}

impl Collision {
    /// Parent results, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Self> {
        core::iter::successors(self.parent.as_deref(), |c| c.parent.as_deref())
    }

    /// Length of the parent chain.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Node ids from the outermost chained ancestor down to the hit node.
    pub fn path(&self) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self.ancestors().map(|c| c.node).collect();
        out.reverse();
        out.push(self.node);
        out
    }
}

struct Walk<'a, D> {
    scene: &'a Scene<D>,
    root: NodeId,
    query: Shape,
    input: Arc<Shape>,
    filter: QueryFilter,
    first_only: bool,
    hits: Vec<Collision>,
}

impl<D> Walk<'_, D> {
    fn visit(&mut self, id: NodeId) -> ControlFlow<()> {
        let Some(flags) = self.scene.flags(id) else {
            return ControlFlow::Continue(());
        };
        if !self.filter.visits(flags) {
            return ControlFlow::Continue(());
        }
        let collider = match self.scene.collider(id) {
            Some(c) if self.filter.picks(flags) => c,
            _ => &Collider::None,
        };
        match collider {
            Collider::None => self.visit_children(id),
            Collider::Shape(_) | Collider::Collection(_) => {
                if self.hits_own(id, collider) {
                    self.report(id)
                } else {
                    self.visit_children(id)
                }
            }
            Collider::Bounds(_) => {
                if self.hits_bounds(id) {
                    self.report(id)?;
                    self.visit_children(id)
                } else {
                    ControlFlow::Continue(())
                }
            }
            Collider::FrontChild => match self.front_child(id) {
                Some(hit) => self.report(hit),
                None => ControlFlow::Continue(()),
            },
        }
    }

    fn visit_children(&mut self, id: NodeId) -> ControlFlow<()> {
        for &child in self.scene.children(id) {
            self.visit(child)?;
        }
        ControlFlow::Continue(())
    }

    /// The query in `id`'s local coordinates, or `None` when the node's transform is
    /// not invertible.
    fn local_query(&self, id: NodeId) -> Option<Shape> {
        let inverse = self.scene.inverse_model_view_matrix(id)?;
        inverse.is_finite().then(|| self.query.transformed(inverse))
    }

    fn hits_own(&self, id: NodeId, collider: &Collider) -> bool {
        self.local_query(id).is_some_and(|q| collider.hits_shape(&q))
    }

    fn hits_bounds(&self, id: NodeId) -> bool {
        let Some(b) = self.scene.bounds(id) else {
            return false;
        };
        let rect = Shape::Rect(Rect::new(b.min_x, b.min_y, b.width(), b.height()));
        self.local_query(id).is_some_and(|q| rect.intersects(&q))
    }

    /// Front-most descendant of `id`, in reverse paint order, whose own collider is hit.
    fn front_child(&self, id: NodeId) -> Option<NodeId> {
        self.scene
            .descendants(id)
            .iter()
            .rev()
            .copied()
            .find(|&d| self.reachable(d, id) && self.hits_any(d))
    }

    fn hits_any(&self, id: NodeId) -> bool {
        match self.scene.collider(id) {
            Some(c @ (Collider::Shape(_) | Collider::Collection(_))) => self.hits_own(id, c),
            Some(Collider::Bounds(_)) => self.hits_bounds(id),
            _ => false,
        }
    }

    /// Whether the filter lets the query reach `id` from its ancestor `top`.
    fn reachable(&self, id: NodeId, top: NodeId) -> bool {
        let passes = self
            .scene
            .flags(id)
            .is_some_and(|f| self.filter.visits(f) && self.filter.picks(f));
        passes
            && self
                .scene
                .ancestors(id)
                .iter()
                .take_while(|&&a| a != top)
                .all(|&a| self.scene.flags(a).is_some_and(|f| self.filter.visits(f)))
    }

    fn report(&mut self, id: NodeId) -> ControlFlow<()> {
        let hit = self.collision(id);
        self.hits.push(hit);
        if self.first_only {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn collision(&self, id: NodeId) -> Collision {
        let chain: Vec<NodeId> = if id == self.root {
            Vec::new()
        } else {
            self.scene
                .ancestors(id)
                .iter()
                .copied()
                .take_while(|&a| a != self.root)
                .collect()
        };
        let parent = chain.into_iter().rev().fold(None, |parent, node| {
            Some(Box::new(Collision {
                node,
                parent,
                input: Arc::clone(&self.input),
            }))
        });
        Collision {
            node: id,
            parent,
            input: Arc::clone(&self.input),
        }
    }
}

impl<D> Scene<D> {
    /// Every node hit by `query`, depth-first in paint order.
    ///
    /// `query` is in logical coordinates; it is scaled by the stage's dpi and then
    /// mapped into each candidate node's local space. A node whose collider is hit is
    /// reported and its children are skipped, except for `Bounds` colliders, whose
    /// children are still visited. A `Bounds` miss prunes the whole subtree.
    pub fn find_all(&self, query: &Shape, filter: QueryFilter) -> Vec<Collision> {
        self.find_all_from(self.stage(), query, filter)
    }

    /// The first node [`Scene::find_all`] would report, without visiting the rest.
    pub fn find_any(&self, query: &Shape, filter: QueryFilter) -> Option<Collision> {
        self.find_any_from(self.stage(), query, filter)
    }

    /// Like [`Scene::find_all`], starting at `root` instead of the stage.
    pub fn find_all_from(&self, root: NodeId, query: &Shape, filter: QueryFilter) -> Vec<Collision> {
        let hits = self.walk(root, query, filter, false);
        tracing::trace!(?root, hits = hits.len(), "find_all");
        hits
    }

    /// Like [`Scene::find_any`], starting at `root` instead of the stage.
    pub fn find_any_from(&self, root: NodeId, query: &Shape, filter: QueryFilter) -> Option<Collision> {
        let hit = self.walk(root, query, filter, true).pop();
        tracing::trace!(?root, hit = hit.is_some(), "find_any");
        hit
    }

    /// [`Scene::find_all`] for a loosely-typed query. Unrecognized queries hit nothing.
    pub fn find_all_desc(&self, query: &ShapeDesc, filter: QueryFilter) -> Vec<Collision> {
        match Shape::infer(query) {
            Some(shape) => self.find_all(&shape, filter),
            None => {
                tracing::debug!("unrecognized query shape");
                Vec::new()
            }
        }
    }

    /// [`Scene::find_any`] for a loosely-typed query. Unrecognized queries hit nothing.
    pub fn find_any_desc(&self, query: &ShapeDesc, filter: QueryFilter) -> Option<Collision> {
        self.find_any(&Shape::infer(query)?, filter)
    }

    fn walk(&self, root: NodeId, query: &Shape, filter: QueryFilter, first_only: bool) -> Vec<Collision> {
        if !self.is_alive(root) {
            return Vec::new();
        }
        let top = self.ancestors(root).last().copied().unwrap_or(root);
        let scale = if top == self.stage() { self.dpi() } else { 1.0 };
        let mut walk = Walk {
            scene: self,
            root,
            query: query.scaled(scale),
            input: Arc::new(query.clone()),
            filter,
            first_only,
            hits: Vec::new(),
        };
        let _ = walk.visit(root);
        walk.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColliderSpec, Geometry, NodeDesc};
    use kurbo::Point;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> NodeDesc<&'static str> {
        NodeDesc::new(Geometry::Rect(Rect::new(x, y, w, h)))
    }

    fn point(x: f64, y: f64) -> Shape {
        Shape::Point(Point::new(x, y))
    }

    fn nodes(hits: &[Collision]) -> Vec<NodeId> {
        hits.iter().map(|h| h.node).collect()
    }

    #[test]
    fn hit_stops_descent() {
        let mut scene = Scene::new();
        let outer = scene.add(rect(0.0, 0.0, 100.0, 100.0));
        let _inner = scene.insert(Some(outer), rect(10.0, 10.0, 10.0, 10.0)).unwrap();
        let hits = scene.find_all(&point(15.0, 15.0), QueryFilter::ALL);
        assert_eq!(nodes(&hits), vec![outer]);
    }

    #[test]
    fn miss_continues_into_children() {
        let mut scene = Scene::new();
        let outer = scene.add(rect(0.0, 0.0, 5.0, 5.0));
        let inner = scene
            .insert(Some(outer), rect(10.0, 10.0, 10.0, 10.0))
            .unwrap();
        let hits = scene.find_all(&point(15.0, 15.0), QueryFilter::ALL);
        assert_eq!(nodes(&hits), vec![inner]);
        assert_eq!(hits[0].path(), vec![outer, inner]);
    }

    #[test]
    fn bounds_reports_and_recurses() {
        let mut scene = Scene::new();
        let g = scene.add(NodeDesc::group().with_collider(ColliderSpec::Bounds));
        let a = scene.insert(Some(g), rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let _b = scene.insert(Some(g), rect(20.0, 0.0, 10.0, 10.0)).unwrap();

        let hits = scene.find_all(&point(5.0, 5.0), QueryFilter::ALL);
        assert_eq!(nodes(&hits), vec![g, a]);
        assert_eq!(hits[1].parent.as_ref().map(|p| p.node), Some(g));

        // Inside the box, between the children.
        let hits = scene.find_all(&point(15.0, 5.0), QueryFilter::ALL);
        assert_eq!(nodes(&hits), vec![g]);

        // Outside the box: the subtree is pruned.
        assert!(scene.find_all(&point(50.0, 5.0), QueryFilter::ALL).is_empty());
    }

    #[test]
    fn front_child_picks_topmost() {
        let mut scene = Scene::new();
        let g = scene.add(NodeDesc::group().with_collider(ColliderSpec::FrontChild));
        let back = scene.insert(Some(g), rect(0.0, 0.0, 50.0, 50.0)).unwrap();
        let front = scene.insert(Some(g), rect(25.0, 25.0, 50.0, 50.0)).unwrap();

        let hits = scene.find_all(&point(30.0, 30.0), QueryFilter::ALL);
        assert_eq!(nodes(&hits), vec![front]);
        assert_eq!(hits[0].depth(), 1);

        scene.set_flags(front, NodeFlags::VISIBLE).unwrap();
        let hits = scene.find_all(&point(30.0, 30.0), QueryFilter::INTERACTIVE);
        assert_eq!(nodes(&hits), vec![back]);
    }

    #[test]
    fn collection_is_one_hit() {
        let mut scene: Scene = Scene::new();
        let c = scene.add(NodeDesc::group().with_collider(ColliderSpec::Collection(vec![
            Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)),
            Shape::Rect(Rect::new(5.0, 5.0, 10.0, 10.0)),
        ])));
        let hits = scene.find_all(&point(7.0, 7.0), QueryFilter::ALL);
        assert_eq!(nodes(&hits), vec![c]);
    }

    #[test]
    fn flags_filter() {
        let mut scene = Scene::new();
        let g = scene.add(NodeDesc::group().with_flags(NodeFlags::empty()));
        let a = scene.insert(Some(g), rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let q = point(5.0, 5.0);

        assert_eq!(nodes(&scene.find_all(&q, QueryFilter::ALL)), vec![a]);
        assert!(scene.find_all(&q, QueryFilter::INTERACTIVE).is_empty());

        scene.set_flags(g, NodeFlags::VISIBLE).unwrap();
        assert_eq!(nodes(&scene.find_all(&q, QueryFilter::INTERACTIVE)), vec![a]);
        scene.set_flags(a, NodeFlags::VISIBLE).unwrap();
        assert!(scene.find_all(&q, QueryFilter::INTERACTIVE).is_empty());
    }

    #[test]
    fn find_any_short_circuits() {
        let mut scene = Scene::new();
        let a = scene.add(rect(0.0, 0.0, 10.0, 10.0).with_data("a"));
        let _b = scene.add(rect(0.0, 0.0, 10.0, 10.0).with_data("b"));
        let hit = scene.find_any(&point(5.0, 5.0), QueryFilter::ALL).unwrap();
        assert_eq!(hit.node, a);
        assert_eq!(scene.data(hit.node), Some(&"a"));
        assert!(scene.find_any(&point(50.0, 5.0), QueryFilter::ALL).is_none());
    }

    #[test]
    fn singular_transform_never_hits() {
        let mut scene: Scene = Scene::new();
        let _ = scene.add(
            NodeDesc::new(Geometry::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)))
                .with_transform("scale(0)"),
        );
        assert!(scene.find_all(&point(0.0, 0.0), QueryFilter::ALL).is_empty());
    }

    #[test]
    fn unrecognized_query_hits_nothing() {
        let mut scene: Scene = Scene::new();
        let _ = scene.add(NodeDesc::new(Geometry::Rect(Rect::new(0.0, 0.0, 10.0, 10.0))));
        assert!(scene.find_all_desc(&ShapeDesc::default(), QueryFilter::ALL).is_empty());
        assert!(scene.find_any_desc(&ShapeDesc::default(), QueryFilter::ALL).is_none());
        assert_eq!(
            scene
                .find_all_desc(&ShapeDesc::point(1.0, 1.0), QueryFilter::ALL)
                .len(),
            1
        );
    }
}
