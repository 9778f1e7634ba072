// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, transforms, and cached derivations.

use std::sync::OnceLock;

use hitgraph_geometry::path::FlattenOptions;
use hitgraph_geometry::{Bounds, Matrix};

use crate::collider::Collider;
use crate::error::TreeError;
use crate::transform::{TransformOp, apply_transform, parse_transform};
use crate::types::{ColliderSpec, Geometry, NodeDesc, NodeFlags, NodeId};

/// Scene-wide settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneOptions {
    /// Device pixels per logical unit. The stage renders through `scale(dpi)` and
    /// queries are scaled by it before being mapped into node space.
    pub dpi: f64,
    /// Flattening tolerances for path geometry.
    pub flatten: FlattenOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            dpi: 1.0,
            flatten: FlattenOptions::default(),
        }
    }
}

/// Lazily derived per-node data. Cleared by structural and transform mutations.
#[derive(Clone, Debug, Default)]
struct Cache {
    ancestors: OnceLock<Vec<NodeId>>,
    descendants: OnceLock<Vec<NodeId>>,
    model_view: OnceLock<Matrix>,
    inverse: OnceLock<Matrix>,
    bounds: OnceLock<Option<Bounds>>,
}

#[derive(Clone, Debug)]
struct Node<D> {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    geometry: Geometry,
    transform: Vec<TransformOp>,
    collider: Collider,
    data: Option<D>,
    tag: Option<String>,
    flags: NodeFlags,
    cache: Cache,
}

impl<D> Node<D> {
    fn new(generation: u32, desc: NodeDesc<D>, opts: &FlattenOptions) -> Self {
        let transform = desc
            .transform
            .as_deref()
            .map(parse_transform)
            .unwrap_or_default();
        let collider = Collider::resolve(desc.collider, &desc.geometry, opts);
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            geometry: desc.geometry,
            transform,
            collider,
            data: desc.data,
            tag: desc.tag,
            flags: desc.flags,
            cache: Cache::default(),
        }
    }
}

/// A scene graph rooted at a stage node.
///
/// Nodes live in an arena addressed by generational [`NodeId`]s. Every node has at
/// most one parent and the parent links never form a cycle. Nodes inserted without a
/// parent are detached until added somewhere with [`Scene::add_child`].
///
/// Ancestors, descendants, model-view matrices, their inverses and subtree bounds are
/// computed on first use and cached per node. Mutations clear exactly the caches they
/// affect, so queries always see the current tree.
pub struct Scene<D = ()> {
    nodes: Vec<Option<Node<D>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    stage: NodeId,
    options: SceneOptions,
}

impl<D> core::fmt::Debug for Scene<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("stage", &self.stage)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<D> Default for Scene<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Scene<D> {
    /// Create a scene holding only the stage, with default options.
    pub fn new() -> Self {
        Self::with_options(SceneOptions::default())
    }

    /// Create a scene holding only the stage.
    pub fn with_options(options: SceneOptions) -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            stage: NodeId::new(0, 1),
            options,
        };
        scene.stage = scene.alloc(NodeDesc::group());
        scene
    }

    /// The stage root.
    pub fn stage(&self) -> NodeId {
        self.stage
    }

    /// Current options.
    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    /// Device pixel ratio of the stage.
    pub fn dpi(&self) -> f64 {
        self.options.dpi
    }

    /// Change the device pixel ratio. Every cached matrix under the stage is dropped.
    pub fn set_dpi(&mut self, dpi: f64) {
        self.options.dpi = dpi;
        self.invalidate_subtree(self.stage);
    }

    fn alloc(&mut self, desc: NodeDesc<D>) -> NodeId {
        let opts = self.options.flatten;
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, desc, &opts));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            NodeId::new(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, desc, &opts)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            NodeId::new((self.nodes.len() - 1) as u32, generation)
        }
    }

    /// Build a node from `desc` and append it to `parent`, or leave it detached.
    pub fn insert(&mut self, parent: Option<NodeId>, desc: NodeDesc<D>) -> Result<NodeId, TreeError> {
        if let Some(p) = parent {
            self.check(p)?;
        }
        let id = self.alloc(desc);
        if let Some(p) = parent {
            self.link_parent(id, p);
            self.invalidate_upward(p);
        }
        tracing::trace!(?id, ?parent, "inserted node");
        Ok(id)
    }

    /// Build a node from `desc` and append it to the stage.
    pub fn add(&mut self, desc: NodeDesc<D>) -> NodeId {
        let id = self.alloc(desc);
        self.link_parent(id, self.stage);
        self.invalidate_upward(self.stage);
        id
    }

    /// Append `child` to `parent`, detaching it from its previous parent first.
    ///
    /// Fails when either id is stale, when `child` is `parent` or one of its
    /// ancestors, or when `child` is the stage.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check(parent)?;
        self.check(child)?;
        if child == self.stage {
            return Err(TreeError::Stage);
        }
        if child == parent {
            return Err(TreeError::SelfParent(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }
        if let Some(old) = self.node(child).parent {
            self.unlink_parent(child, old);
            self.invalidate_upward(old);
        }
        self.link_parent(child, parent);
        self.invalidate_subtree(child);
        self.invalidate_upward(parent);
        tracing::trace!(?parent, ?child, "attached node");
        Ok(())
    }

    /// Detach `child` from `parent`. The child and its subtree stay alive.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check(parent)?;
        self.check(child)?;
        if self.node(child).parent != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.unlink_parent(child, parent);
        self.invalidate_subtree(child);
        self.invalidate_upward(parent);
        tracing::trace!(?parent, ?child, "detached node");
        Ok(())
    }

    /// Remove a node and its whole subtree, freeing their slots.
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.check(id)?;
        if id == self.stage {
            return Err(TreeError::Stage);
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
            self.invalidate_upward(parent);
        }
        self.free_subtree(id);
        tracing::trace!(?id, "removed subtree");
        Ok(())
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Replace the node's transform list.
    pub fn set_transform(&mut self, id: NodeId, transform: &str) -> Result<(), TreeError> {
        self.check(id)?;
        self.node_mut(id).transform = parse_transform(transform);
        self.invalidate_subtree(id);
        if let Some(parent) = self.node(id).parent {
            self.invalidate_upward(parent);
        }
        Ok(())
    }

    /// Replace the node's collider. `Auto` derives it from the node's geometry.
    pub fn set_collider(&mut self, id: NodeId, spec: ColliderSpec) -> Result<(), TreeError> {
        self.check(id)?;
        let opts = self.options.flatten;
        let node = self.node_mut(id);
        node.collider = Collider::resolve(spec, &node.geometry, &opts);
        self.invalidate_upward(id);
        Ok(())
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) -> Result<(), TreeError> {
        self.check(id)?;
        self.node_mut(id).flags = flags;
        Ok(())
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// See [`NodeId`] for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Parent of a live node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children in insertion (paint) order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Node geometry.
    pub fn geometry(&self, id: NodeId) -> Option<&Geometry> {
        self.node_opt(id).map(|n| &n.geometry)
    }

    /// Parsed transform list. Empty for stale ids.
    pub fn transform_ops(&self, id: NodeId) -> &[TransformOp] {
        match self.node_opt(id) {
            Some(n) => &n.transform,
            None => &[],
        }
    }

    /// Resolved collider.
    pub fn collider(&self, id: NodeId) -> Option<&Collider> {
        self.node_opt(id).map(|n| &n.collider)
    }

    /// Node payload.
    pub fn data(&self, id: NodeId) -> Option<&D> {
        self.node_opt(id)?.data.as_ref()
    }

    /// Node type tag.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id)?.tag.as_deref()
    }

    /// Node flags.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Ancestors from the nearest (parent) to the root. Empty for roots and stale ids.
    pub fn ancestors(&self, id: NodeId) -> &[NodeId] {
        let Some(node) = self.node_opt(id) else {
            return &[];
        };
        node.cache.ancestors.get_or_init(|| {
            let mut out = Vec::new();
            let mut cur = node.parent;
            while let Some(p) = cur {
                out.push(p);
                cur = self.node(p).parent;
            }
            out
        })
    }

    /// All descendants in pre-order (paint order), excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> &[NodeId] {
        let Some(node) = self.node_opt(id) else {
            return &[];
        };
        node.cache.descendants.get_or_init(|| {
            let mut out = Vec::new();
            let mut stack: Vec<NodeId> = node.children.iter().rev().copied().collect();
            while let Some(n) = stack.pop() {
                out.push(n);
                stack.extend(self.node(n).children.iter().rev().copied());
            }
            out
        })
    }

    /// Fold the node's transform list onto `base`.
    pub fn resolve_local_transform(&self, id: NodeId, base: &Matrix) -> Option<Matrix> {
        self.node_opt(id).map(|n| apply_transform(&n.transform, base))
    }

    /// Compose transforms from the root down to `id`, without using caches.
    ///
    /// The stage contributes `scale(dpi)`; a detached root starts from the identity.
    pub fn resolve_global_transform(&self, id: NodeId) -> Option<Matrix> {
        self.node_opt(id)?;
        let chain = self.ancestors(id);
        let root = chain.last().copied().unwrap_or(id);
        let mut m = self.root_base(root);
        for &n in chain.iter().rev().chain(core::iter::once(&id)) {
            m = apply_transform(self.transform_ops(n), &m);
        }
        Some(m)
    }

    fn root_base(&self, root: NodeId) -> Matrix {
        let mut m = Matrix::identity();
        if root == self.stage {
            m.scale_uniform(self.options.dpi);
        }
        m
    }

    /// Cached model-view matrix: local coordinates to device coordinates.
    pub fn model_view_matrix(&self, id: NodeId) -> Option<&Matrix> {
        let node = self.node_opt(id)?;
        Some(node.cache.model_view.get_or_init(|| {
            let base = match node.parent {
                Some(p) => self.model_view_matrix(p).cloned().unwrap_or_default(),
                None => self.root_base(id),
            };
            apply_transform(&node.transform, &base)
        }))
    }

    /// Cached inverse of [`Scene::model_view_matrix`]. Non-finite when singular.
    pub fn inverse_model_view_matrix(&self, id: NodeId) -> Option<&Matrix> {
        let node = self.node_opt(id)?;
        let mv = self.model_view_matrix(id)?;
        Some(node.cache.inverse.get_or_init(|| mv.inverse()))
    }

    /// Bounds of the node's own collider shapes and its whole subtree, in the node's
    /// local coordinates. `None` when nothing in the subtree has extent.
    pub fn bounds(&self, id: NodeId) -> Option<Bounds> {
        let node = self.node_opt(id)?;
        *node.cache.bounds.get_or_init(|| {
            node.children
                .iter()
                .filter_map(|&c| self.bounds_in_parent(c))
                .fold(node.collider.shape_bounds(), |acc, b| {
                    Some(acc.map_or(b, |a| a.union(b)))
                })
        })
    }

    fn bounds_in_parent(&self, id: NodeId) -> Option<Bounds> {
        let b = self.bounds(id)?;
        let m = self.resolve_local_transform(id, &Matrix::identity())?;
        Bounds::from_points(m.transform_points(&b.corners()))
    }

    // --- internals ---

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        if self.is_alive(id) {
            Ok(())
        } else {
            Err(TreeError::StaleNode(id))
        }
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cur = self.node(of).parent;
        while let Some(p) = cur {
            if p == candidate {
                return true;
            }
            cur = self.node(p).parent;
        }
        false
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node<D>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node<D> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node<D> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Clear caches that depend on the path from the root: ancestors and matrices.
    fn invalidate_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            let node = self.node_mut(n);
            node.cache.ancestors.take();
            node.cache.model_view.take();
            node.cache.inverse.take();
            stack.extend_from_slice(&node.children);
        }
    }

    /// Clear caches that depend on the subtree: descendants and bounds.
    fn invalidate_upward(&mut self, id: NodeId) {
        let mut cur = Some(id);
        while let Some(n) = cur {
            let node = self.node_mut(n);
            node.cache.descendants.take();
            node.cache.bounds.take();
            cur = node.parent;
        }
    }
}
