// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::types::NodeId;

/// Structural errors from scene mutations.
///
/// These indicate a bug in the code building the scene; geometry problems never
/// surface here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id refers to a removed node.
    #[error("stale node id: {0:?}")]
    StaleNode(NodeId),
    /// A node was added as its own child.
    #[error("node {0:?} cannot be its own child")]
    SelfParent(NodeId),
    /// The child is an ancestor of the parent.
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child, an ancestor of `parent`.
        child: NodeId,
    },
    /// `remove_child` was called with a node that is not a child of `parent`.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Supposed parent.
        parent: NodeId,
        /// Node that is not among its children.
        child: NodeId,
    },
    /// The stage root cannot be reparented, detached or removed.
    #[error("the stage root cannot be moved or removed")]
    Stage,
}
