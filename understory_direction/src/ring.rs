// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intrusive doubly-linked rings threaded through graph nodes.
//!
//! Both rings store `prev`/`next` ids on the nodes themselves. A segment is a
//! run `first..=last` of consecutive members; cutting a segment closes it into
//! its own ring, and splicing inserts a closed segment before an anchor.

use crate::error::{LayoutError, Result, Ring};
use crate::graph::Graph;
use crate::types::NodeId;

/// Neighbors in one ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) prev: NodeId,
    pub(crate) next: NodeId,
}

impl Link {
    /// A ring of one.
    pub(crate) const fn solo(id: NodeId) -> Self {
        Self { prev: id, next: id }
    }
}

impl<V> Graph<V> {
    pub(crate) fn ring_link(&self, ring: Ring, id: NodeId) -> Link {
        let node = self.node(id);
        match ring {
            Ring::Siblings => node.siblings,
            Ring::PaintGroups => node.paint_group.expect("paint group ring member").link,
        }
    }

    fn ring_link_mut(&mut self, ring: Ring, id: NodeId) -> &mut Link {
        let node = self.node_mut(id);
        match ring {
            Ring::Siblings => &mut node.siblings,
            Ring::PaintGroups => {
                &mut node
                    .paint_group
                    .as_mut()
                    .expect("paint group ring member")
                    .link
            }
        }
    }

    pub(crate) fn ring_next(&self, ring: Ring, id: NodeId) -> NodeId {
        self.ring_link(ring, id).next
    }

    pub(crate) fn ring_prev(&self, ring: Ring, id: NodeId) -> NodeId {
        self.ring_link(ring, id).prev
    }

    fn join(&mut self, ring: Ring, a: NodeId, b: NodeId) {
        self.ring_link_mut(ring, a).next = b;
        self.ring_link_mut(ring, b).prev = a;
    }

    /// Remove `first..=last` from its ring and close it on itself.
    pub(crate) fn cut(&mut self, ring: Ring, first: NodeId, last: NodeId) {
        let before = self.ring_prev(ring, first);
        let after = self.ring_next(ring, last);
        if before != last {
            self.join(ring, before, after);
        }
        self.join(ring, last, first);
    }

    /// Insert the closed segment `first..=last` immediately before `anchor`.
    pub(crate) fn splice_before(&mut self, ring: Ring, anchor: NodeId, first: NodeId, last: NodeId) {
        let before = self.ring_prev(ring, anchor);
        self.join(ring, before, first);
        self.join(ring, last, anchor);
    }

    /// Members from `start.next` around to `start` inclusive.
    pub(crate) fn ring_after(&self, ring: Ring, start: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cursor = Some(self.ring_next(ring, start));
        core::iter::from_fn(move || {
            let id = cursor?;
            cursor = (id != start).then(|| self.ring_next(ring, id));
            Some(id)
        })
    }

    /// Members from `start` backward around to `start.next` inclusive.
    pub(crate) fn ring_reversed(&self, ring: Ring, start: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let stop = self.ring_next(ring, start);
        let mut cursor = Some(start);
        core::iter::from_fn(move || {
            let id = cursor?;
            cursor = (id != stop).then(|| self.ring_prev(ring, id));
            Some(id)
        })
    }

    /// Walk the ring from `start` for at most one step per slot, checking that
    /// links agree in both directions and that the walk returns to `start`.
    pub(crate) fn verify_ring(&self, ring: Ring, start: NodeId) -> Result<()> {
        let corrupted = |node| LayoutError::RingCorrupted { ring, node };
        let link_of = |id: NodeId| -> Result<Link> {
            let node = self.get(id).ok_or(corrupted(id))?;
            match ring {
                Ring::Siblings => Ok(node.siblings),
                Ring::PaintGroups => node.paint_group.map(|g| g.link).ok_or(corrupted(id)),
            }
        };
        let mut cursor = start;
        let mut link = link_of(cursor)?;
        for _ in 0..=self.slot_count() {
            let next = link.next;
            let next_link = link_of(next)?;
            if next_link.prev != cursor {
                return Err(corrupted(next));
            }
            if next == start {
                return Ok(());
            }
            cursor = next;
            link = next_link;
        }
        Err(corrupted(start))
    }
}
