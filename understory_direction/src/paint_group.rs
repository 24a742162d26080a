// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint groups: creasing, the per-world paint-group ring, and tree-order queries.
//!
//! Every world root is implicitly a paint group. Other nodes become paint groups
//! when creased; their subtree (minus nested creased subtrees) is then laid out,
//! positioned, and painted as a unit. The roots of a world's paint groups form a
//! ring in the same children-before-parent order as the layout ring, with the
//! world root last.

use alloc::vec::Vec;

use crate::error::{LayoutError, Result, Ring};
use crate::graph::{Graph, GroupLink};
use crate::layout::LayoutDirty;
use crate::types::NodeId;

impl<V> Graph<V> {
    /// True for world roots and creased nodes.
    pub fn is_paint_group(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.paint_group.is_some())
    }

    /// True only for nodes creased with [`crease`](Self::crease).
    pub fn is_creased(&self, id: NodeId) -> bool {
        self.get(id)
            .and_then(|n| n.paint_group)
            .is_some_and(|g| g.explicit)
    }

    /// Root of the paint group `id` belongs to.
    pub fn paint_group(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.paint_group_root)
    }

    /// Paint-group roots of `world`, children before parents, ending with `world`.
    pub fn paint_groups(&self, world: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let root = self.is_alive(world).then(|| self.root_of_live(world));
        root.into_iter()
            .flat_map(|r| self.ring_after(Ring::PaintGroups, r))
    }

    /// Make `id` the root of its own paint group.
    ///
    /// Creasing a node that is already a paint group only records that it was
    /// creased on purpose, so it stays one when connected elsewhere.
    pub fn crease(&mut self, id: NodeId) -> Result<()> {
        let node = self.try_node(id)?;
        if let Some(group) = node.paint_group {
            if !group.explicit {
                self.node_mut(id).paint_group = Some(GroupLink {
                    explicit: true,
                    ..group
                });
                self.revision_bump();
            }
            return Ok(());
        }
        let old_group = node.paint_group_root;
        let world = self.root_of_live(id);

        let head = self.head(id);
        self.cut(Ring::Siblings, head, id);
        self.node_mut(id).paint_group = Some(GroupLink::solo(id, true));
        self.insert_group_segment(world, id, id, id)?;
        self.stamp_group(id);
        self.node_mut(old_group).layout.dirty |=
            LayoutDirty::GROUP_GEOMETRY | LayoutDirty::GROUP_MEMBERS | LayoutDirty::PAINT;
        self.revision_bump();
        tracing::debug!(?id, ?old_group, "creased");

        self.verify_group(old_group)?;
        self.verify_group(id)?;
        self.verify_ring(Ring::PaintGroups, world)
    }

    /// Fold a creased node back into its parent's paint group.
    ///
    /// World roots always remain paint groups; uncreasing one only clears the
    /// creased mark. Uncreasing a node that is not a paint group is a no-op.
    pub fn uncrease(&mut self, id: NodeId) -> Result<()> {
        let node = self.try_node(id)?;
        let Some(group) = node.paint_group else {
            return Ok(());
        };
        let Some((parent, to_parent)) = node.neighbors.parent() else {
            if group.explicit {
                self.node_mut(id).paint_group = Some(GroupLink {
                    explicit: false,
                    ..group
                });
                self.revision_bump();
            }
            return Ok(());
        };
        let world = self.root_of_live(id);

        self.cut(Ring::PaintGroups, id, id);
        self.node_mut(id).paint_group = None;
        self.insert_into_layout(parent, to_parent.reverse());
        let new_group = self.node(parent).paint_group_root;
        self.stamp_group(new_group);
        self.revision_bump();
        tracing::debug!(?id, ?new_group, "uncreased");

        self.verify_group(new_group)?;
        self.verify_ring(Ring::PaintGroups, world)
    }

    /// True when `a` comes before `b` in children-before-parent visiting order.
    ///
    /// A descendant always comes before its ancestor. Otherwise the two paths
    /// split at their lowest common ancestor, and the branch visited first in
    /// that ancestor's layout order wins.
    pub fn comes_before(&self, a: NodeId, b: NodeId) -> Result<bool> {
        self.try_node(a)?;
        self.try_node(b)?;
        self.comes_before_live(a, b)
    }

    /// Number of links on the tree path between `a` and `b`.
    ///
    /// This is a diagnostic query only. Paint groups are ordered by
    /// [`comes_before`](Self::comes_before) alone.
    pub fn paint_group_distance(&self, a: NodeId, b: NodeId) -> Result<usize> {
        self.try_node(a)?;
        self.try_node(b)?;
        let (mut x, mut y) = (a, b);
        let (mut dx, mut dy) = (self.depth(a), self.depth(b));
        let mut distance = 0;
        while dx > dy {
            x = self.parent_live(x);
            dx -= 1;
            distance += 1;
        }
        while dy > dx {
            y = self.parent_live(y);
            dy -= 1;
            distance += 1;
        }
        while x != y {
            if dx == 0 {
                return Err(LayoutError::Disconnected(a, b));
            }
            x = self.parent_live(x);
            y = self.parent_live(y);
            dx -= 1;
            distance += 2;
        }
        Ok(distance)
    }

    /// Check every ring of `world`: the paint-group ring and each group's layout ring.
    pub fn verify(&self, world: NodeId) -> Result<()> {
        let root = self.try_node(world).map(|_| self.root_of_live(world))?;
        self.verify_ring(Ring::PaintGroups, root)?;
        let groups: Vec<_> = self.ring_after(Ring::PaintGroups, root).collect();
        for group in groups {
            self.verify_group(group)?;
        }
        Ok(())
    }

    pub(crate) fn comes_before_live(&self, a: NodeId, b: NodeId) -> Result<bool> {
        if a == b {
            return Ok(false);
        }
        let (mut x, mut y) = (a, b);
        let (mut dx, mut dy) = (self.depth(a), self.depth(b));
        // Direction from the current node down to the previous one on each path.
        let (mut via_x, mut via_y) = (None, None);
        while dx > dy {
            via_x = self.node(x).neighbors.parent_direction().map(|d| d.reverse());
            x = self.parent_live(x);
            dx -= 1;
        }
        while dy > dx {
            via_y = self.node(y).neighbors.parent_direction().map(|d| d.reverse());
            y = self.parent_live(y);
            dy -= 1;
        }
        while x != y {
            if dx == 0 {
                return Err(LayoutError::Disconnected(a, b));
            }
            via_x = self.node(x).neighbors.parent_direction().map(|d| d.reverse());
            via_y = self.node(y).neighbors.parent_direction().map(|d| d.reverse());
            x = self.parent_live(x);
            y = self.parent_live(y);
            dx -= 1;
        }
        Ok(match (via_x, via_y) {
            // `b` is the common ancestor.
            (_, None) => true,
            // `a` is the common ancestor.
            (None, Some(_)) => false,
            (Some(da), Some(db)) => {
                let order = self.order_of(x);
                let rank = |d| order.iter().position(|&o| o == d);
                rank(da) < rank(db)
            }
        })
    }

    fn parent_live(&self, id: NodeId) -> NodeId {
        self.node(id)
            .neighbors
            .parent()
            .map(|(p, _)| p)
            .expect("depth counted a parent")
    }

    /// Insert the closed paint-group segment `first..=last` into `world`'s ring,
    /// before the first group that `reference` comes before.
    pub(crate) fn insert_group_segment(
        &mut self,
        world: NodeId,
        first: NodeId,
        last: NodeId,
        reference: NodeId,
    ) -> Result<()> {
        let mut anchor = self.ring_next(Ring::PaintGroups, world);
        for _ in 0..self.slot_count() {
            if anchor == world || self.comes_before_live(reference, anchor)? {
                break;
            }
            anchor = self.ring_next(Ring::PaintGroups, anchor);
        }
        self.splice_before(Ring::PaintGroups, anchor, first, last);
        Ok(())
    }

    /// First group of the contiguous run of paint groups ending at the paint group `id`.
    pub(crate) fn first_group_in_subtree(&self, id: NodeId) -> NodeId {
        let mut first = id;
        loop {
            let prev = self.ring_prev(Ring::PaintGroups, first);
            if prev == id || !self.is_ancestor(id, prev) {
                return first;
            }
            first = prev;
        }
    }

    /// The contiguous run of paint groups strictly inside the subtree of the
    /// non-group node `id`, found through the creased children of its group members.
    ///
    /// `id`'s layout segment must already be closed into its own ring.
    pub(crate) fn subgroup_span(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        let seed = self.ring_after(Ring::Siblings, id).find_map(|member| {
            self.node(member)
                .neighbors
                .children()
                .map(|(_, c)| c)
                .find(|&c| self.node(c).paint_group.is_some())
        })?;
        let mut first = seed;
        loop {
            let prev = self.ring_prev(Ring::PaintGroups, first);
            if prev == seed || !self.is_ancestor(id, prev) {
                break;
            }
            first = prev;
        }
        let mut last = seed;
        loop {
            let next = self.ring_next(Ring::PaintGroups, last);
            if next == first || !self.is_ancestor(id, next) {
                break;
            }
            last = next;
        }
        Some((first, last))
    }

    /// Re-sort the paint groups strictly below `id` after its visiting order changed.
    pub(crate) fn resort_subgroups(&mut self, id: NodeId) -> Result<()> {
        let world = self.root_of_live(id);
        let below: Vec<_> = self
            .ring_after(Ring::PaintGroups, world)
            .filter(|&g| g != id && self.is_ancestor(id, g))
            .collect();
        if below.len() < 2 {
            return Ok(());
        }
        for &g in &below {
            self.cut(Ring::PaintGroups, g, g);
        }
        for g in below {
            self.insert_group_segment(world, g, g, g)?;
        }
        self.verify_ring(Ring::PaintGroups, world)
    }

    /// Point every member of `group`'s layout ring at `group` and schedule them
    /// for repositioning.
    pub(crate) fn stamp_group(&mut self, group: NodeId) {
        let members: Vec<_> = self.ring_after(Ring::Siblings, group).collect();
        for member in members {
            let node = self.node_mut(member);
            node.paint_group_root = group;
            node.layout.dirty |= LayoutDirty::GROUP_POSITION | LayoutDirty::ABSOLUTE_POSITION;
        }
        self.node_mut(group).layout.dirty |=
            LayoutDirty::GROUP_GEOMETRY | LayoutDirty::GROUP_MEMBERS | LayoutDirty::PAINT;
    }

    /// Check `group`'s layout ring and that each member points back at `group`.
    pub(crate) fn verify_group(&self, group: NodeId) -> Result<()> {
        self.verify_ring(Ring::Siblings, group)?;
        match self
            .ring_after(Ring::Siblings, group)
            .find(|&m| self.node(m).paint_group_root != group)
        {
            Some(node) => Err(LayoutError::RingCorrupted {
                ring: Ring::Siblings,
                node,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::types::PreferredAxis;

    fn groups(g: &Graph<&'static str>, world: NodeId) -> Vec<&'static str> {
        g.paint_groups(world).map(|n| *g.value(n).unwrap()).collect()
    }

    fn ring(g: &Graph<&'static str>, id: NodeId) -> Vec<&'static str> {
        g.siblings(id).map(|n| *g.value(n).unwrap()).collect()
    }

    /// root ─ Backward: a (Downward: a1), Forward: b (Downward: b1)
    fn fixture() -> (Graph<&'static str>, [NodeId; 5]) {
        let mut g = Graph::new();
        let root = g.insert("root");
        let a = g.insert("a");
        let a1 = g.insert("a1");
        let b = g.insert("b");
        let b1 = g.insert("b1");
        g.connect(root, Direction::Backward, a).unwrap();
        g.connect(a, Direction::Downward, a1).unwrap();
        g.connect(root, Direction::Forward, b).unwrap();
        g.connect(b, Direction::Downward, b1).unwrap();
        (g, [root, a, a1, b, b1])
    }

    #[test]
    fn comes_before_follows_post_order() {
        let (g, [root, a, a1, b, b1]) = fixture();
        assert!(g.comes_before(a1, a).unwrap());
        assert!(!g.comes_before(a, a1).unwrap());
        assert!(g.comes_before(a, b).unwrap());
        assert!(g.comes_before(a1, b1).unwrap());
        assert!(!g.comes_before(b1, a).unwrap());
        assert!(g.comes_before(b, root).unwrap());
        assert!(!g.comes_before(root, root).unwrap());
    }

    #[test]
    fn comes_before_rejects_separate_worlds() {
        let (mut g, [root, ..]) = fixture();
        let lonely = g.insert("lonely");
        assert_eq!(
            g.comes_before(root, lonely),
            Err(LayoutError::Disconnected(root, lonely))
        );
    }

    #[test]
    fn distance_counts_links() {
        let (g, [root, a, a1, b, b1]) = fixture();
        assert_eq!(g.paint_group_distance(a1, b1), Ok(4));
        assert_eq!(g.paint_group_distance(root, b1), Ok(2));
        assert_eq!(g.paint_group_distance(a, a), Ok(0));
        assert_eq!(g.paint_group_distance(b, root), Ok(1));
    }

    #[test]
    fn crease_splits_layout_ring_and_orders_groups() {
        let (mut g, [root, a, _, b, b1]) = fixture();
        g.crease(b).unwrap();
        assert_eq!(ring(&g, root), ["a1", "a", "root"]);
        assert_eq!(ring(&g, b), ["b1", "b"]);
        assert_eq!(g.paint_group(b1), Some(b));
        assert_eq!(groups(&g, root), ["b", "root"]);
        g.crease(a).unwrap();
        assert_eq!(groups(&g, root), ["a", "b", "root"]);
        assert!(g.is_creased(a));
        g.verify(root).unwrap();
    }

    #[test]
    fn uncrease_restores_original_rings() {
        let (mut g, [root, a, _, b, _]) = fixture();
        let before = ring(&g, root);
        g.crease(b).unwrap();
        g.crease(a).unwrap();
        g.uncrease(b).unwrap();
        g.uncrease(a).unwrap();
        assert_eq!(ring(&g, root), before);
        assert_eq!(groups(&g, root), ["root"]);
        g.verify(root).unwrap();
    }

    #[test]
    fn creased_child_keeps_its_group_across_connect() {
        let (mut g, [root, ..]) = fixture();
        let c = g.insert("c");
        let c1 = g.insert("c1");
        g.connect(c, Direction::Forward, c1).unwrap();
        g.crease(c).unwrap();
        g.connect(root, Direction::Downward, c).unwrap();
        assert_eq!(groups(&g, root), ["c", "root"]);
        assert_eq!(ring(&g, c), ["c1", "c"]);
        assert_eq!(g.paint_group(c1), Some(c));

        let d = g.insert("d");
        g.connect(root, Direction::Upward, d).unwrap();
        assert_eq!(groups(&g, root), ["c", "root"]);
        assert_eq!(ring(&g, root), ["a1", "a", "b1", "b", "d", "root"]);
    }

    #[test]
    fn nested_groups_merge_and_split_with_their_subtree() {
        let (mut g, [root, ..]) = fixture();
        // x (Downward: y creased, Forward: z creased)
        let x = g.insert("x");
        let y = g.insert("y");
        let z = g.insert("z");
        g.connect(x, Direction::Downward, y).unwrap();
        g.connect(x, Direction::Forward, z).unwrap();
        g.crease(y).unwrap();
        g.crease(z).unwrap();
        assert_eq!(groups(&g, x), ["z", "y", "x"]);

        g.connect(root, Direction::Upward, x).unwrap();
        assert_eq!(groups(&g, root), ["z", "y", "root"]);
        assert_eq!(g.paint_group(x), Some(root));
        g.verify(root).unwrap();

        let lone = g.insert("lone");
        g.connect(root, Direction::Downward, lone).unwrap();
        g.crease(lone).unwrap();
        assert_eq!(groups(&g, root), ["z", "y", "lone", "root"]);

        assert_eq!(g.disconnect(root, Direction::Upward), Ok(Some(x)));
        assert_eq!(groups(&g, x), ["z", "y", "x"]);
        assert_eq!(groups(&g, root), ["lone", "root"]);
        g.verify(root).unwrap();
        g.verify(x).unwrap();
    }

    #[test]
    fn preference_flip_resorts_subgroups() {
        let mut g = Graph::new();
        let root = g.insert("root");
        let up = g.insert("up");
        let fwd = g.insert("fwd");
        g.connect(root, Direction::Upward, up).unwrap();
        g.connect(root, Direction::Forward, fwd).unwrap();
        g.crease(up).unwrap();
        g.crease(fwd).unwrap();
        assert_eq!(groups(&g, root), ["fwd", "up", "root"]);
        g.set_layout_preference(root, PreferredAxis::Vertical)
            .unwrap();
        assert_eq!(groups(&g, root), ["up", "fwd", "root"]);
        g.verify(root).unwrap();
    }

    #[test]
    fn corrupted_ring_is_reported() {
        let (mut g, [root, a, ..]) = fixture();
        g.node_mut(a).siblings.next = a;
        assert!(matches!(
            g.verify(root),
            Err(LayoutError::RingCorrupted {
                ring: Ring::Siblings,
                ..
            })
        ));
    }
}
