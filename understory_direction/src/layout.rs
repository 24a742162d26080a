// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node layout state: commit phase, size, extents, and cached positions.

use kurbo::{Point, Size};
use understory_extent::Extent;

use crate::direction::Direction;

/// Where a node is in the commit cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LayoutPhase {
    /// Its geometry must be recomputed.
    #[default]
    NeedsCommit,
    /// Its geometry is being recomputed right now.
    InCommit,
    /// Its extents and child placements are current.
    Committed,
}

/// A position together with the accumulated scale at that position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaledPosition {
    /// Center of the node.
    pub origin: Point,
    /// Product of the scales between the reference frame and the node.
    pub scale: f64,
}

impl ScaledPosition {
    /// The reference frame's own origin.
    pub const IDENTITY: Self = Self {
        origin: Point::ORIGIN,
        scale: 1.0,
    };

    /// Map a position expressed relative to `self` into `self`'s frame.
    pub fn then(self, local: Self) -> Self {
        Self {
            origin: Point::new(
                self.origin.x + self.scale * local.origin.x,
                self.origin.y + self.scale * local.origin.y,
            ),
            scale: self.scale * local.scale,
        }
    }
}

bitflags::bitflags! {
    /// Pending work markers.
    ///
    /// Node-level markers live on every node; group-level markers are only
    /// meaningful on paint-group roots.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LayoutDirty: u8 {
        /// The node's placement inside its parent changed since its group position was computed.
        const GROUP_POSITION    = 0b0000_0001;
        /// The node's group position changed since its absolute position was computed.
        const ABSOLUTE_POSITION = 0b0000_0010;
        /// Group: a member was recommitted, group positions need a sweep.
        const GROUP_GEOMETRY    = 0b0001_0000;
        /// Group: a member's group position changed, absolute positions need a sweep.
        const GROUP_MEMBERS     = 0b0010_0000;
        /// Group: the painter must be called for this group.
        const PAINT             = 0b0100_0000;
    }
}

/// Layout state of one node.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub(crate) phase: LayoutPhase,
    pub(crate) size: Option<Size>,
    pub(crate) extents: [Extent; 4],
    pub(crate) group_position: Option<ScaledPosition>,
    pub(crate) absolute: Option<ScaledPosition>,
    // Version of the frame `absolute` was derived from.
    pub(crate) absolute_seen: u64,
    // Paint-group roots only: bumped whenever the root's absolute position moves.
    pub(crate) group_version: u64,
    pub(crate) dirty: LayoutDirty,
    pub(crate) explicit: Option<Point>,
}

impl Layout {
    pub(crate) fn new() -> Self {
        Self {
            dirty: LayoutDirty::ABSOLUTE_POSITION
                | LayoutDirty::GROUP_GEOMETRY
                | LayoutDirty::PAINT,
            ..Self::default()
        }
    }

    /// Current commit phase.
    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    /// Whether extents and child placements are current.
    pub fn is_committed(&self) -> bool {
        self.phase == LayoutPhase::Committed
    }

    /// The node's own size from the last commit.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Silhouette of the node and its subtree as seen from `direction`.
    ///
    /// Only the four cardinal directions carry extents.
    pub fn extent(&self, direction: Direction) -> Option<&Extent> {
        direction.cardinal_index().map(|i| &self.extents[i])
    }

    /// Position relative to the node's paint-group root, from the last commit.
    pub fn group_position(&self) -> Option<ScaledPosition> {
        self.group_position
    }

    /// Cached absolute position. May be stale; prefer
    /// [`Graph::absolute_position`](crate::Graph::absolute_position).
    pub fn cached_absolute_position(&self) -> Option<ScaledPosition> {
        self.absolute
    }

    /// Paint-group roots: how many times the group's absolute position moved.
    pub fn group_version(&self) -> u64 {
        self.group_version
    }

    /// Position set with [`Graph::set_explicit_position`](crate::Graph::set_explicit_position).
    pub fn explicit_position(&self) -> Option<Point> {
        self.explicit
    }

    /// Pending work markers.
    pub fn dirty(&self) -> LayoutDirty {
        self.dirty
    }
}
