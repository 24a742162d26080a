// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core graph implementation: arena, structural edits, and invalidation.

use alloc::vec::Vec;
use kurbo::Point;

use crate::direction::Direction;
use crate::error::{LayoutError, Result, Ring};
use crate::layout::{Layout, LayoutDirty, LayoutPhase};
use crate::neighbors::{NeighborEdge, Neighbors};
use crate::ring::Link;
use crate::types::{Alignment, AxisOverlap, Fit, NodeId, PreferredAxis};

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena of nodes connected by six-way direction links.
///
/// Each connected component ("world") is a tree: every node except the root has
/// exactly one parent, reachable through one of its six slots. Nodes are
/// addressed with generational [`NodeId`]s.
///
/// Edits keep two intrusive rings current: the per-paint-group layout order
/// (children before parents, in visiting order) and the per-world ring of
/// paint-group roots in the same order. Layout itself is deferred to
/// [`CommitLayout`](crate::CommitLayout).
pub struct Graph<V> {
    nodes: Vec<Option<Node<V>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    revision: u64,
}

impl<V> core::fmt::Debug for Graph<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Graph")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

/// Membership of a paint-group root in its world's paint-group ring.
#[derive(Copy, Clone, Debug)]
pub(crate) struct GroupLink {
    pub(crate) link: Link,
    /// Creased on purpose, as opposed to being a root.
    pub(crate) explicit: bool,
}

impl GroupLink {
    pub(crate) const fn solo(id: NodeId, explicit: bool) -> Self {
        Self {
            link: Link::solo(id),
            explicit,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<V> {
    generation: u32,
    pub(crate) value: V,
    pub(crate) scale: f64,
    pub(crate) fit: Fit,
    pub(crate) rtl: bool,
    pub(crate) preference: PreferredAxis,
    pub(crate) neighbors: Neighbors,
    pub(crate) siblings: Link,
    pub(crate) paint_group: Option<GroupLink>,
    pub(crate) paint_group_root: NodeId,
    pub(crate) layout: Layout,
}

impl<V> Node<V> {
    fn new(id: NodeId, value: V) -> Self {
        Self {
            generation: id.1,
            value,
            scale: 1.0,
            fit: Fit::default(),
            rtl: false,
            preference: PreferredAxis::default(),
            neighbors: Neighbors::default(),
            siblings: Link::solo(id),
            paint_group: Some(GroupLink::solo(id, false)),
            paint_group_root: id,
            layout: Layout::new(),
        }
    }
}

impl<V> Graph<V> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            revision: 0,
        }
    }

    /// Insert a new, unconnected node. It starts as the root of its own world.
    pub fn insert(&mut self, value: V) -> NodeId {
        let id = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let id = NodeId::new(idx as u32, generation);
            self.nodes[idx] = Some(Node::new(id, value));
            id
        } else {
            let generation = 1_u32;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let id = NodeId::new(self.nodes.len() as u32, generation);
            self.nodes.push(Some(Node::new(id, value)));
            self.generations.push(generation);
            id
        };
        self.revision += 1;
        id
    }

    /// Remove a node and everything it owns.
    ///
    /// The node is first disconnected from its parent, so the rest of its world
    /// stays consistent. Removing a stale id is a no-op.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if !self.is_alive(id) {
            return Ok(());
        }
        if let Some((parent, to_parent)) = self.node(id).neighbors.parent() {
            self.disconnect(parent, to_parent.reverse())?;
        }
        for n in self.subtree(id) {
            self.nodes[n.idx()] = None;
            self.free_list.push(n.idx());
        }
        tracing::debug!(?id, "removed subtree");
        self.revision += 1;
        Ok(())
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// True when no node is alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter bumped by every edit that can affect layout or paint.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The node's value.
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.get(id).map(|n| &n.value)
    }

    /// Replace the node's value and schedule it for relayout.
    pub fn set_value(&mut self, id: NodeId, value: V) -> Result<V> {
        let old = core::mem::replace(&mut self.try_node_mut(id)?.value, value);
        self.mark_dirty(id);
        self.revision += 1;
        Ok(old)
    }

    /// The node's scale relative to its parent.
    pub fn scale(&self, id: NodeId) -> Option<f64> {
        self.get(id).map(|n| n.scale)
    }

    /// Set the node's scale relative to its parent. Must be finite and positive.
    pub fn set_scale(&mut self, id: NodeId, scale: f64) -> Result<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LayoutError::InvalidScale(scale));
        }
        let node = self.try_node_mut(id)?;
        if node.scale == scale {
            return Ok(());
        }
        node.scale = scale;
        self.mark_dirty(id);
        self.revision += 1;
        Ok(())
    }

    /// The node's fit mode.
    pub fn fit(&self, id: NodeId) -> Option<Fit> {
        self.get(id).map(|n| n.fit)
    }

    /// Set how precisely children are merged into this node's extents.
    pub fn set_fit(&mut self, id: NodeId, fit: Fit) -> Result<()> {
        let node = self.try_node_mut(id)?;
        if node.fit == fit {
            return Ok(());
        }
        node.fit = fit;
        self.mark_dirty(id);
        self.revision += 1;
        Ok(())
    }

    /// Whether the node's content reads right to left.
    pub fn is_rtl(&self, id: NodeId) -> Option<bool> {
        self.get(id).map(|n| n.rtl)
    }

    /// Mark the node's content as right to left. Only repaints; geometry is unaffected.
    pub fn set_rtl(&mut self, id: NodeId, rtl: bool) -> Result<()> {
        let node = self.try_node_mut(id)?;
        if node.rtl == rtl {
            return Ok(());
        }
        node.rtl = rtl;
        let group = node.paint_group_root;
        self.node_mut(group).layout.dirty |= LayoutDirty::PAINT;
        self.revision += 1;
        Ok(())
    }

    /// The node's raw layout preference, as last set.
    pub fn layout_preference(&self, id: NodeId) -> Option<PreferredAxis> {
        self.get(id).map(|n| n.preference)
    }

    /// The node's six slots.
    pub fn neighbors(&self, id: NodeId) -> Option<&Neighbors> {
        self.get(id).map(|n| &n.neighbors)
    }

    /// The edge record in `direction`, if configured or connected.
    pub fn edge(&self, id: NodeId, direction: Direction) -> Option<&NeighborEdge> {
        self.get(id).and_then(|n| n.neighbors.edge(direction))
    }

    /// The node's parent.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.neighbors.parent()).map(|(p, _)| p)
    }

    /// Direction from the node toward its parent.
    pub fn parent_direction(&self, id: NodeId) -> Option<Direction> {
        self.get(id).and_then(|n| n.neighbors.parent_direction())
    }

    /// The child owned in `direction`.
    pub fn child_at(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        self.get(id).and_then(|n| n.neighbors.child_at(direction))
    }

    /// The node in `direction`, child or parent.
    pub fn node_at(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        self.get(id).and_then(|n| n.neighbors.node_at(direction))
    }

    /// True when a child or the parent is found in `direction`.
    pub fn has_node(&self, id: NodeId, direction: Direction) -> bool {
        self.get(id).is_some_and(|n| n.neighbors.has_node(direction))
    }

    /// True when the node owns a child in `direction`.
    pub fn has_child_at(&self, id: NodeId, direction: Direction) -> bool {
        self.get(id).is_some_and(|n| n.neighbors.has_child_at(direction))
    }

    /// Layout state of the node.
    pub fn layout(&self, id: NodeId) -> Option<&Layout> {
        self.get(id).map(|n| &n.layout)
    }

    /// True when the node has no parent.
    pub fn is_root(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.neighbors.parent().is_none())
    }

    /// True for roots and for nodes nested through [`Direction::Inward`].
    ///
    /// Root-like nodes lay out both planar axes from their own preference.
    pub fn is_rootlike(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| n.neighbors.parent_direction().is_none_or(|d| !d.is_cardinal()))
    }

    /// The root of the world containing `id`.
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        self.is_alive(id).then(|| self.root_of_live(id))
    }

    /// Create-or-return the edge record for `direction`, to configure it before connecting.
    pub fn ensure_edge(&mut self, id: NodeId, direction: Direction) -> Result<&NeighborEdge> {
        let node = self.try_node_mut(id)?;
        if direction == Direction::Outward {
            return Err(LayoutError::OutwardChild);
        }
        if node.neighbors.parent_direction() == Some(direction) {
            return Err(LayoutError::Occupied {
                node: id,
                direction,
            });
        }
        Ok(node.neighbors.ensure(direction))
    }

    /// Set how the child in `direction` is aligned across the link axis.
    pub fn set_alignment(
        &mut self,
        id: NodeId,
        direction: Direction,
        alignment: Alignment,
    ) -> Result<()> {
        if self.ensure_edge(id, direction)?.alignment == alignment {
            return Ok(());
        }
        self.node_mut(id).neighbors.ensure(direction).alignment = alignment;
        self.mark_dirty(id);
        self.revision += 1;
        Ok(())
    }

    /// Set whether the child in `direction` may cross this node's axis line.
    pub fn set_axis_overlap(
        &mut self,
        id: NodeId,
        direction: Direction,
        axis_overlap: AxisOverlap,
    ) -> Result<()> {
        if self.ensure_edge(id, direction)?.axis_overlap == axis_overlap {
            return Ok(());
        }
        self.node_mut(id).neighbors.ensure(direction).axis_overlap = axis_overlap;
        self.mark_dirty(id);
        self.revision += 1;
        Ok(())
    }

    /// Pin the absolute position of a [`Fit::Naive`] paint-group root.
    ///
    /// Once such a node has been committed, later commits keep its geometry
    /// and place it at `position` verbatim. `None` clears the pin.
    pub fn set_explicit_position(&mut self, id: NodeId, position: Option<Point>) -> Result<()> {
        let node = self.try_node_mut(id)?;
        node.layout.explicit = position;
        node.layout.dirty |= LayoutDirty::ABSOLUTE_POSITION;
        let group = node.paint_group_root;
        self.node_mut(group).layout.dirty |= LayoutDirty::GROUP_MEMBERS | LayoutDirty::PAINT;
        self.revision += 1;
        Ok(())
    }

    /// Attach the root `child` in `parent`'s `direction` slot.
    ///
    /// The child keeps its own paint group only if it was creased; otherwise its
    /// nodes join the parent's group. Any paint groups inside the child's subtree
    /// move into the parent's world.
    pub fn connect(&mut self, parent: NodeId, direction: Direction, child: NodeId) -> Result<()> {
        self.try_node(parent)?;
        let child_node = self.try_node(child)?;
        if direction == Direction::Outward {
            return Err(LayoutError::OutwardChild);
        }
        if child_node.neighbors.parent().is_some() {
            return Err(LayoutError::NotRoot(child));
        }
        if self.node(parent).neighbors.has_node(direction) {
            return Err(LayoutError::Occupied {
                node: parent,
                direction,
            });
        }
        if self.is_ancestor(child, parent) {
            return Err(LayoutError::WouldCycle { parent, child });
        }

        let explicit = child_node.paint_group.is_some_and(|g| g.explicit);
        let axis_before = self.primary_axis(child);
        let world = self.root_of_live(parent);

        self.node_mut(parent).neighbors.ensure(direction).node = Some(child);
        self.node_mut(child)
            .neighbors
            .set_parent(Some((parent, direction.reverse())));

        if explicit {
            // The child's whole paint-group ring moves as one segment.
            let first = self.ring_next(Ring::PaintGroups, child);
            self.insert_group_segment(world, first, child, child)?;
        } else {
            let first_sub = self.ring_next(Ring::PaintGroups, child);
            let last_sub = self.ring_prev(Ring::PaintGroups, child);
            self.cut(Ring::PaintGroups, child, child);
            self.node_mut(child).paint_group = None;
            self.insert_into_layout(parent, direction);
            let group = self.node(parent).paint_group_root;
            self.stamp_group(group);
            if first_sub != child {
                self.insert_group_segment(world, first_sub, last_sub, child)?;
            }
        }
        if self.primary_axis(child) != axis_before {
            self.reorder_children(child)?;
        }

        self.mark_dirty(child);
        self.revision += 1;
        tracing::debug!(?parent, %direction, ?child, explicit, "connected");
        let group = self.node(child).paint_group_root;
        self.verify_group(group)?;
        self.verify_ring(Ring::PaintGroups, world)
    }

    /// Detach and return the child in `parent`'s `direction` slot.
    ///
    /// The child becomes the root of its own world, taking every paint group in
    /// its subtree along. Parent-relative preferences are rewritten to the
    /// absolute axis they resolved to. Returns `Ok(None)` when the slot is empty.
    pub fn disconnect(&mut self, parent: NodeId, direction: Direction) -> Result<Option<NodeId>> {
        let Some(child) = self.try_node(parent)?.neighbors.child_at(direction) else {
            return Ok(None);
        };
        let world = self.root_of_live(parent);
        let old_group = self.node(parent).paint_group_root;

        if self.node(child).paint_group.is_some() {
            let first = self.first_group_in_subtree(child);
            self.cut(Ring::PaintGroups, first, child);
        } else {
            self.remove_from_layout(parent, direction);
            let sub = self.subgroup_span(child);
            self.node_mut(child).paint_group = Some(GroupLink::solo(child, false));
            if let Some((first, last)) = sub {
                self.cut(Ring::PaintGroups, first, last);
                self.splice_before(Ring::PaintGroups, first, child, child);
            }
            self.stamp_group(child);
            self.node_mut(old_group).layout.dirty |=
                LayoutDirty::GROUP_GEOMETRY | LayoutDirty::GROUP_MEMBERS | LayoutDirty::PAINT;
        }

        let axis_before = self.primary_axis(child);
        self.node_mut(parent).neighbors.clear_edge(direction);
        let node = self.node_mut(child);
        node.neighbors.set_parent(None);
        node.preference = match node.preference {
            PreferredAxis::Parent => direction.axis().into(),
            PreferredAxis::Perpendicular => direction
                .axis()
                .perpendicular()
                .map_or(PreferredAxis::Horizontal, Into::into),
            absolute => absolute,
        };
        node.layout.dirty |= LayoutDirty::ABSOLUTE_POSITION;
        if self.primary_axis(child) != axis_before {
            self.reorder_children(child)?;
        }

        self.mark_dirty(parent);
        self.mark_dirty(child);
        self.revision += 1;
        tracing::debug!(?parent, %direction, ?child, "disconnected");
        self.verify_group(old_group)?;
        self.verify_ring(Ring::PaintGroups, world)?;
        self.verify_group(child)?;
        self.verify_ring(Ring::PaintGroups, child)?;
        Ok(Some(child))
    }

    /// Schedule `id` for relayout, for example after its painted content changed size.
    pub fn invalidate(&mut self, id: NodeId) -> Result<()> {
        self.try_node(id)?;
        self.mark_dirty(id);
        self.revision += 1;
        Ok(())
    }

    /// Mark `id` as needing commit, and its ancestors up to the first one that already does.
    ///
    /// Paint-group roots crossed on the way are marked for a group-position sweep and a repaint.
    pub(crate) fn mark_dirty(&mut self, id: NodeId) {
        let mut cursor = id;
        loop {
            let node = self.node_mut(cursor);
            if cursor != id && node.layout.phase == LayoutPhase::NeedsCommit {
                break;
            }
            node.layout.phase = LayoutPhase::NeedsCommit;
            if node.paint_group.is_some() {
                node.layout.dirty |= LayoutDirty::GROUP_GEOMETRY | LayoutDirty::PAINT;
            }
            match node.neighbors.parent() {
                Some((parent, _)) => cursor = parent,
                None => break,
            }
        }
        tracing::trace!(?id, "invalidated");
    }

    /// True when `ancestor` is `id` or one of its ancestors.
    pub(crate) fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(n) = cursor {
            if n == ancestor {
                return true;
            }
            cursor = self.node(n).neighbors.parent().map(|(p, _)| p);
        }
        false
    }

    /// Number of links between `id` and its root.
    pub(crate) fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cursor = id;
        while let Some((parent, _)) = self.node(cursor).neighbors.parent() {
            depth += 1;
            cursor = parent;
        }
        depth
    }

    pub(crate) fn root_of_live(&self, id: NodeId) -> NodeId {
        let mut cursor = id;
        while let Some((parent, _)) = self.node(cursor).neighbors.parent() {
            cursor = parent;
        }
        cursor
    }

    /// `id` and every node it owns, parents before children.
    pub(crate) fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = alloc::vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.node(n).neighbors.children().map(|(_, c)| c));
        }
        out
    }

    pub(crate) fn revision_bump(&mut self) {
        self.revision += 1;
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|n| n.generation == id.1)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<V>> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|slot| slot.as_mut())
            .filter(|n| n.generation == id.1)
    }

    pub(crate) fn try_node(&self, id: NodeId) -> Result<&Node<V>> {
        self.get(id).ok_or(LayoutError::StaleNode(id))
    }

    pub(crate) fn try_node_mut(&mut self, id: NodeId) -> Result<&mut Node<V>> {
        self.get_mut(id).ok_or(LayoutError::StaleNode(id))
    }

    /// Access a live node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node<V> {
        self.get(id).expect("dangling NodeId")
    }

    /// Mutable access to a live node; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
        self.get_mut(id).expect("dangling NodeId")
    }
}

impl From<crate::direction::Axis> for PreferredAxis {
    fn from(axis: crate::direction::Axis) -> Self {
        match axis {
            crate::direction::Axis::Vertical => Self::Vertical,
            crate::direction::Axis::Horizontal | crate::direction::Axis::Z => Self::Horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove_reuse_slots_with_new_generation() {
        let mut g = Graph::new();
        let a = g.insert("a");
        assert!(g.is_alive(a));
        g.remove(a).unwrap();
        assert!(!g.is_alive(a));
        let b = g.insert("b");
        assert_eq!(a.idx(), b.idx());
        assert_ne!(a, b);
        assert_eq!(g.value(b), Some(&"b"));
        assert_eq!(g.value(a), None);
        assert_eq!(g.set_value(a, "x"), Err(LayoutError::StaleNode(a)));
    }

    #[test]
    fn connect_validates_slots() {
        let mut g = Graph::new();
        let root = g.insert(());
        let a = g.insert(());
        let b = g.insert(());
        assert_eq!(
            g.connect(root, Direction::Outward, a),
            Err(LayoutError::OutwardChild)
        );
        g.connect(root, Direction::Forward, a).unwrap();
        assert_eq!(
            g.connect(root, Direction::Forward, b),
            Err(LayoutError::Occupied {
                node: root,
                direction: Direction::Forward
            })
        );
        // The slot toward the parent is taken too.
        assert_eq!(
            g.connect(a, Direction::Backward, b),
            Err(LayoutError::Occupied {
                node: a,
                direction: Direction::Backward
            })
        );
        assert_eq!(
            g.connect(b, Direction::Downward, a),
            Err(LayoutError::NotRoot(a))
        );
        assert_eq!(
            g.connect(a, Direction::Downward, root),
            Err(LayoutError::WouldCycle {
                parent: a,
                child: root
            })
        );
        assert_eq!(
            g.connect(root, Direction::Downward, root),
            Err(LayoutError::WouldCycle {
                parent: root,
                child: root
            })
        );
    }

    #[test]
    fn connect_links_both_sides() {
        let mut g = Graph::new();
        let root = g.insert(());
        let child = g.insert(());
        g.connect(root, Direction::Downward, child).unwrap();
        assert_eq!(g.child_at(root, Direction::Downward), Some(child));
        assert_eq!(g.parent(child), Some(root));
        assert_eq!(g.parent_direction(child), Some(Direction::Upward));
        assert_eq!(g.node_at(child, Direction::Upward), Some(root));
        assert_eq!(g.root_of(child), Some(root));
        assert!(!g.is_root(child));
        assert!(!g.is_rootlike(child));
    }

    #[test]
    fn disconnect_returns_child_and_rewrites_relative_preference() {
        let mut g = Graph::new();
        let root = g.insert(());
        let child = g.insert(());
        g.connect(root, Direction::Forward, child).unwrap();
        g.set_layout_preference(child, PreferredAxis::Perpendicular)
            .unwrap();
        assert_eq!(g.disconnect(root, Direction::Forward), Ok(Some(child)));
        assert!(g.is_root(child));
        assert_eq!(g.layout_preference(child), Some(PreferredAxis::Vertical));
        assert_eq!(g.disconnect(root, Direction::Forward), Ok(None));
        assert!(g.edge(root, Direction::Forward).is_none());
    }

    #[test]
    fn remove_takes_subtree_and_detaches() {
        let mut g = Graph::new();
        let root = g.insert(0);
        let a = g.insert(1);
        let b = g.insert(2);
        g.connect(root, Direction::Downward, a).unwrap();
        g.connect(a, Direction::Forward, b).unwrap();
        g.remove(a).unwrap();
        assert!(!g.is_alive(a));
        assert!(!g.is_alive(b));
        assert_eq!(g.child_at(root, Direction::Downward), None);
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn edits_mark_ancestors_dirty() {
        let mut g = Graph::new();
        let root = g.insert(());
        let a = g.insert(());
        g.connect(root, Direction::Downward, a).unwrap();
        for id in [root, a] {
            g.node_mut(id).layout.phase = LayoutPhase::Committed;
        }
        g.set_scale(a, 0.5).unwrap();
        assert_eq!(g.layout(a).unwrap().phase(), LayoutPhase::NeedsCommit);
        assert_eq!(g.layout(root).unwrap().phase(), LayoutPhase::NeedsCommit);
        assert_eq!(g.set_scale(a, 0.0), Err(LayoutError::InvalidScale(0.0)));
    }

    #[test]
    fn rtl_only_repaints() {
        let mut g = Graph::new();
        let root = g.insert(());
        g.node_mut(root).layout.phase = LayoutPhase::Committed;
        g.node_mut(root).layout.dirty = LayoutDirty::empty();
        g.set_rtl(root, true).unwrap();
        assert_eq!(g.is_rtl(root), Some(true));
        assert!(g.layout(root).unwrap().is_committed());
        assert!(g.layout(root).unwrap().dirty().contains(LayoutDirty::PAINT));
    }

    #[test]
    fn edge_configuration_rejects_parent_and_outward_slots() {
        let mut g = Graph::new();
        let root = g.insert(());
        let child = g.insert(());
        g.set_alignment(root, Direction::Downward, Alignment::Center)
            .unwrap();
        g.connect(root, Direction::Downward, child).unwrap();
        assert_eq!(
            g.edge(root, Direction::Downward).unwrap().alignment(),
            Alignment::Center
        );
        assert_eq!(
            g.set_axis_overlap(child, Direction::Upward, AxisOverlap::Allowed),
            Err(LayoutError::Occupied {
                node: child,
                direction: Direction::Upward
            })
        );
        assert_eq!(
            g.set_alignment(child, Direction::Outward, Alignment::None),
            Err(LayoutError::OutwardChild)
        );
    }
}
