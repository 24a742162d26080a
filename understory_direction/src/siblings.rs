// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout order within a paint group.
//!
//! Each paint group threads its members onto one ring in commit order: every
//! child's segment comes before its parent, children in the parent's visiting
//! order, and the group root last. The root's `next` is therefore the first node
//! to commit.

use crate::direction::{Axis, Direction};
use crate::error::{LayoutError, Result, Ring};
use crate::graph::Graph;
use crate::types::{NodeId, PreferredAxis};

impl<V> Graph<V> {
    /// Set the node's layout preference.
    ///
    /// Root-like nodes reject [`PreferredAxis::Parent`] and [`PreferredAxis::Perpendicular`].
    /// When the effective primary axis changes, the node's children are reordered
    /// and the node is scheduled for relayout.
    pub fn set_layout_preference(&mut self, id: NodeId, preference: PreferredAxis) -> Result<()> {
        self.try_node(id)?;
        if preference.is_relative() && self.is_rootlike(id) {
            return Err(LayoutError::RootPreference(id));
        }
        let before = self.primary_axis(id);
        self.node_mut(id).preference = preference;
        if self.primary_axis(id) != before {
            self.reorder_children(id)?;
            self.mark_dirty(id);
            let group = self.node(id).paint_group_root;
            self.verify_group(group)?;
        }
        self.revision_bump();
        Ok(())
    }

    /// The node's preference resolved against its parent link.
    ///
    /// Root-like nodes resolve to [`PreferredAxis::Horizontal`] or
    /// [`PreferredAxis::Vertical`]; other nodes resolve to
    /// [`PreferredAxis::Parent`] or [`PreferredAxis::Perpendicular`].
    pub fn canonical_preference(&self, id: NodeId) -> Option<PreferredAxis> {
        self.is_alive(id).then(|| self.canonical_live(id))
    }

    /// The fixed visiting order used for the node's children.
    pub fn layout_order(&self, id: NodeId) -> Option<&'static [Direction; 6]> {
        self.is_alive(id).then(|| self.order_of(id))
    }

    /// Members of the paint group containing `id`, in commit order, ending with the group root.
    pub fn siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let group = self.get(id).map(|n| n.paint_group_root);
        group
            .into_iter()
            .flat_map(|g| self.ring_after(Ring::Siblings, g))
    }

    pub(crate) fn canonical_live(&self, id: NodeId) -> PreferredAxis {
        let node = self.node(id);
        let raw = node.preference;
        match node.neighbors.parent_direction() {
            Some(to_parent) if to_parent.is_cardinal() => {
                let parent_axis = to_parent.axis();
                match raw {
                    PreferredAxis::Horizontal if parent_axis == Axis::Horizontal => {
                        PreferredAxis::Parent
                    }
                    PreferredAxis::Vertical if parent_axis == Axis::Vertical => {
                        PreferredAxis::Parent
                    }
                    PreferredAxis::Horizontal | PreferredAxis::Vertical => {
                        PreferredAxis::Perpendicular
                    }
                    relative => relative,
                }
            }
            _ => match raw {
                PreferredAxis::Vertical => PreferredAxis::Vertical,
                _ => PreferredAxis::Horizontal,
            },
        }
    }

    /// Axis whose pair of children is laid out first.
    pub(crate) fn primary_axis(&self, id: NodeId) -> Axis {
        match self.node(id).neighbors.parent_direction() {
            Some(to_parent) if to_parent.is_cardinal() => {
                let parent_axis = to_parent.axis();
                match self.canonical_live(id) {
                    PreferredAxis::Parent => parent_axis,
                    _ => parent_axis.perpendicular().unwrap_or(Axis::Horizontal),
                }
            }
            _ => match self.canonical_live(id) {
                PreferredAxis::Vertical => Axis::Vertical,
                _ => Axis::Horizontal,
            },
        }
    }

    pub(crate) fn order_of(&self, id: NodeId) -> &'static [Direction; 6] {
        self.primary_axis(id).order()
    }

    /// A child that shares this node's paint group.
    pub(crate) fn grouped_child(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        self.node(id)
            .neighbors
            .child_at(direction)
            .filter(|&c| self.node(c).paint_group.is_none())
    }

    /// First node of `id`'s segment: follow the first grouped child in visiting order until there is none.
    pub(crate) fn head(&self, id: NodeId) -> NodeId {
        let mut cursor = id;
        while let Some(child) = self
            .order_of(cursor)
            .iter()
            .find_map(|&d| self.grouped_child(cursor, d))
        {
            cursor = child;
        }
        cursor
    }

    /// Splice the closed segment of the child in `direction` into `parent`'s ring.
    ///
    /// The segment goes before the segment of the next grouped sibling in visiting
    /// order, or before `parent` itself.
    pub(crate) fn insert_into_layout(&mut self, parent: NodeId, direction: Direction) {
        let child = self
            .node(parent)
            .neighbors
            .child_at(direction)
            .expect("child attached before insertion");
        let first = self.head(child);
        let order = self.order_of(parent);
        let position = order.iter().position(|&d| d == direction).unwrap_or(0);
        let anchor = order[position + 1..]
            .iter()
            .find_map(|&d| self.grouped_child(parent, d))
            .map_or(parent, |sibling| self.head(sibling));
        self.splice_before(Ring::Siblings, anchor, first, child);
    }

    /// Cut the child's segment in `direction` out of `parent`'s ring and close it.
    pub(crate) fn remove_from_layout(&mut self, parent: NodeId, direction: Direction) {
        let child = self
            .node(parent)
            .neighbors
            .child_at(direction)
            .expect("child attached before removal");
        let first = self.head(child);
        self.cut(Ring::Siblings, first, child);
    }

    /// Put the segments of `id`'s grouped children back in its current visiting order.
    ///
    /// This is the horizontal-to-vertical (and back) flip: every child segment is
    /// cut out, then reinserted before `id`. Paint groups below `id` are re-sorted too.
    pub(crate) fn reorder_children(&mut self, id: NodeId) -> Result<()> {
        let mut segments = [None; 6];
        for d in Direction::ALL {
            if let Some(child) = self.grouped_child(id, d) {
                let first = self.head(child);
                self.cut(Ring::Siblings, first, child);
                segments[d.index()] = Some((first, child));
            }
        }
        for &d in self.order_of(id) {
            if let Some((first, last)) = segments[d.index()] {
                self.splice_before(Ring::Siblings, id, first, last);
            }
        }
        self.resort_subgroups(id)
    }
}
