// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node adjacency: six edge records plus the link to the parent.

use kurbo::Point;

use crate::direction::{Axis, Direction};
use crate::types::{Alignment, AxisOverlap, NodeId};

/// Configuration and computed geometry for one direction of a node.
///
/// An edge record can exist without a node attached: alignment and axis overlap
/// may be configured before a child is connected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeighborEdge {
    pub(crate) node: Option<NodeId>,
    pub(crate) alignment: Alignment,
    pub(crate) axis_overlap: AxisOverlap,
    pub(crate) alignment_offset: f64,
    pub(crate) separation: f64,
    pub(crate) line_length: f64,
    pub(crate) position: Point,
}

impl NeighborEdge {
    /// The attached child, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Alignment mode for the attached child.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Axis overlap policy for the attached child.
    pub fn axis_overlap(&self) -> AxisOverlap {
        self.axis_overlap
    }

    /// Computed shift of the child across the link axis, in the parent's space.
    pub fn alignment_offset(&self) -> f64 {
        self.alignment_offset
    }

    /// Computed center-to-center distance along the link axis, in the parent's space.
    pub fn separation(&self) -> f64 {
        self.separation
    }

    /// Computed length of the connector between the parent's edge and the child.
    pub fn line_length(&self) -> f64 {
        self.line_length
    }

    /// Computed child center relative to the parent center, in the parent's unscaled space.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// The six neighbor slots of a node.
///
/// Exactly one of `parent` and the edge in the parent's direction can refer to a
/// node: the slot toward the parent is never owned.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    edges: [Option<NeighborEdge>; 6],
    parent: Option<(NodeId, Direction)>,
}

impl Neighbors {
    /// Create-or-return the edge record for `direction`.
    pub(crate) fn ensure(&mut self, direction: Direction) -> &mut NeighborEdge {
        self.edges[direction.index()].get_or_insert_with(NeighborEdge::default)
    }

    /// The edge record for `direction`, if one was created.
    pub fn edge(&self, direction: Direction) -> Option<&NeighborEdge> {
        self.edges[direction.index()].as_ref()
    }

    pub(crate) fn clear_edge(&mut self, direction: Direction) {
        self.edges[direction.index()] = None;
    }

    /// The parent and the direction that leads to it.
    pub fn parent(&self) -> Option<(NodeId, Direction)> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<(NodeId, Direction)>) {
        self.parent = parent;
    }

    /// Direction toward the parent, if any.
    pub fn parent_direction(&self) -> Option<Direction> {
        self.parent.map(|(_, d)| d)
    }

    /// True when any node, child or parent, is found in `direction`.
    pub fn has_node(&self, direction: Direction) -> bool {
        self.node_at(direction).is_some()
    }

    /// True when a child owned by this node is found in `direction`.
    pub fn has_child_at(&self, direction: Direction) -> bool {
        self.child_at(direction).is_some()
    }

    /// The node in `direction`, child or parent.
    pub fn node_at(&self, direction: Direction) -> Option<NodeId> {
        match self.parent {
            Some((parent, d)) if d == direction => Some(parent),
            _ => self.child_at(direction),
        }
    }

    /// The child owned in `direction`.
    pub fn child_at(&self, direction: Direction) -> Option<NodeId> {
        self.edges[direction.index()].as_ref().and_then(|e| e.node)
    }

    /// Which of the two directions along `axis` hold a node, negative side first.
    pub fn has_nodes(&self, axis: Axis) -> (Option<Direction>, Option<Direction>) {
        let negative = axis.negative();
        let positive = axis.positive();
        (
            self.has_node(negative).then_some(negative),
            self.has_node(positive).then_some(positive),
        )
    }

    /// Owned children with their directions, in index order.
    pub fn children(&self) -> impl Iterator<Item = (Direction, NodeId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.child_at(d).map(|c| (d, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_slot_counts_as_a_node_but_not_a_child() {
        let mut n = Neighbors::default();
        let parent = NodeId::new(0, 1);
        n.set_parent(Some((parent, Direction::Upward)));
        assert!(n.has_node(Direction::Upward));
        assert!(!n.has_child_at(Direction::Upward));
        assert_eq!(n.node_at(Direction::Upward), Some(parent));
        assert_eq!(
            n.has_nodes(Axis::Vertical),
            (Some(Direction::Upward), None)
        );
    }

    #[test]
    fn ensure_keeps_configuration() {
        let mut n = Neighbors::default();
        n.ensure(Direction::Forward).alignment = Alignment::Center;
        assert!(!n.has_child_at(Direction::Forward));
        let child = NodeId::new(3, 1);
        n.ensure(Direction::Forward).node = Some(child);
        let edge = n.edge(Direction::Forward).unwrap();
        assert_eq!(edge.alignment(), Alignment::Center);
        assert_eq!(edge.node(), Some(child));
        assert_eq!(
            n.children().collect::<alloc::vec::Vec<_>>(),
            [(Direction::Forward, child)]
        );
        n.clear_edge(Direction::Forward);
        assert!(n.edge(Direction::Forward).is_none());
    }
}
