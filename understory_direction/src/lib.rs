// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_direction --heading-base-level=0

//! Understory Direction: a six-way direction graph with incremental box-and-connector layout.
//!
//! Nodes are boxes. Each node has six neighbor slots: [`Direction::Upward`], [`Direction::Downward`],
//! [`Direction::Backward`], [`Direction::Forward`], and the nesting pair [`Direction::Inward`] and
//! [`Direction::Outward`]. Every connected component is a tree, and children are laid out around
//! their parent along the direction they were attached in, with nested content placed inside.
//!
//! - [`Graph`] owns the nodes, validates structural edits, and keeps layout order current.
//! - [`CommitLayout`] recomputes only what changed, in bounded slices you can spread across frames.
//! - [`LayoutPainter`] is the seam to the application: it sizes boxes and paints committed groups.
//!
//! ## Layout model
//!
//! Each committed node carries four [`Extent`](understory_extent::Extent)s, one per planar
//! direction, describing how far the node and everything below it reach. Placing a child asks the
//! parent's extent and the child's facing extent for the smallest separation that avoids overlap,
//! then folds the child's extents into the parent's. Alignment, axis overlap, scale and fit modes
//! tune how this happens per edge and per node.
//!
//! ## Paint groups
//!
//! World roots and [creased](Graph::crease) nodes are paint groups. Members of a group are
//! positioned relative to its root, so moving a group only moves its root's absolute position;
//! members pick up the change lazily through a per-group version counter.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_direction::{CommitLayout, CommitOutcome, Direction, Graph, LayoutPainter, NodeId};
//!
//! struct Blocks;
//!
//! impl LayoutPainter<&'static str> for Blocks {
//!     fn size(&mut self, _: &Graph<&'static str>, _: NodeId) -> Size {
//!         Size::new(20.0, 10.0)
//!     }
//! }
//!
//! let mut graph = Graph::new();
//! let root = graph.insert("root");
//! let below = graph.insert("below");
//! graph.connect(root, Direction::Downward, below).unwrap();
//!
//! let mut commit = CommitLayout::new(root);
//! assert_eq!(commit.commit(&mut graph, &mut Blocks, 16).unwrap(), CommitOutcome::Done);
//! assert_eq!(graph.absolute_position(below).unwrap().origin, Point::new(0.0, 10.0));
//! ```
//!
//! ## Logging
//!
//! Structural edits and commit progress are reported through [`tracing`] at `debug` and `trace`
//! levels. Install a subscriber in your application to see them.
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std` feature.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` builds.
//! - `serde`: [`SavedGraph`] for persisting a world, plus serde derives on the public enums.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod commit;
mod direction;
mod error;
mod graph;
mod layout;
mod neighbors;
mod paint_group;
mod painter;
#[cfg(feature = "serde")]
mod persist;
mod position;
mod ring;
mod siblings;
mod types;

pub use commit::{CommitLayout, CommitOutcome, CommitStage};
pub use direction::{Axis, Direction, HORIZONTAL_ORDER, VERTICAL_ORDER};
pub use error::{LayoutError, Result, Ring};
pub use graph::Graph;
pub use layout::{Layout, LayoutDirty, LayoutPhase, ScaledPosition};
pub use neighbors::{NeighborEdge, Neighbors};
pub use painter::{LayoutPainter, PaintResult};
#[cfg(feature = "serde")]
pub use persist::{SavedGraph, SavedNode};
pub use types::{Alignment, AxisOverlap, Fit, NodeId, PreferredAxis};
