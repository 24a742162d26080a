// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by graph edits and layout commits.

use core::fmt;

use understory_extent::ExtentError;

use crate::direction::Direction;
use crate::types::NodeId;

/// Which intrusive ring a corruption was detected in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ring {
    /// The per-paint-group layout order ring.
    Siblings,
    /// The per-world ring of paint-group roots.
    PaintGroups,
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Siblings => "siblings",
            Self::PaintGroups => "paint group",
        })
    }
}

/// Errors reported by [`Graph`](crate::Graph) edits and [`CommitLayout`](crate::CommitLayout).
///
/// Edits that return an error leave the graph unchanged, except for
/// [`LayoutError::RingCorrupted`], which signals a broken internal invariant.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A value did not name one of the six directions.
    #[error("not a direction")]
    InvalidDirection,
    /// A value did not name an alignment mode.
    #[error("not an alignment mode")]
    InvalidAlignment,
    /// A value did not name an axis-overlap policy.
    #[error("not an axis overlap policy")]
    InvalidAxisOverlap,
    /// A value did not name a layout preference.
    #[error("not a layout preference")]
    InvalidPreference,
    /// A value did not name a fit mode.
    #[error("not a fit mode")]
    InvalidFit,
    /// The id is stale or was never allocated by this graph.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// The slot is already taken by a child or by the parent link.
    #[error("node {node:?} already has a neighbor {direction}")]
    Occupied {
        /// The node whose slot was requested.
        node: NodeId,
        /// The requested slot.
        direction: Direction,
    },
    /// Only roots can be connected under a new parent.
    #[error("node {0:?} already has a parent")]
    NotRoot(NodeId),
    /// The connection would make a node its own ancestor.
    #[error("connecting {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// The would-be parent.
        parent: NodeId,
        /// The would-be child.
        child: NodeId,
    },
    /// Nodes never own their outward neighbor.
    #[error("the outward slot always refers to the enclosing node")]
    OutwardChild,
    /// The two nodes live in different connected components.
    #[error("nodes {0:?} and {1:?} are not connected")]
    Disconnected(NodeId, NodeId),
    /// Root-like nodes only accept absolute preferences.
    #[error("node {0:?} is root-like and only accepts horizontal or vertical preference")]
    RootPreference(NodeId),
    /// A node was committed while its own commit was in progress.
    #[error("node {0:?} is already being committed")]
    NestedCommit(NodeId),
    /// A painter reported a negative separation.
    #[error("separation must not be negative, got {0}")]
    NegativeSeparation(f64),
    /// A node scale was not finite and positive.
    #[error("scale must be finite and positive, got {0}")]
    InvalidScale(f64),
    /// An intrusive ring failed its bounded consistency walk.
    #[error("{ring} ring is corrupted at node {node:?}")]
    RingCorrupted {
        /// The ring that failed.
        ring: Ring,
        /// Where the walk detected the problem.
        node: NodeId,
    },
    /// A full geometry pass made no progress.
    #[error("layout made no progress; a node keeps waiting on an uncommitted child")]
    LayoutStuck,
    /// A saved graph referred to a node id it does not define first.
    #[error("saved graph has no node {0} at the point it is referenced")]
    MissingSavedNode(u32),
    /// An extent operation rejected its inputs.
    #[error(transparent)]
    Extent(#[from] ExtentError),
}

/// Result alias for graph and layout operations.
pub type Result<T> = core::result::Result<T, LayoutError>;
