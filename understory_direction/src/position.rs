// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group-relative and absolute positions.
//!
//! Group positions are relative to the paint-group root, in the root's unscaled
//! space. Absolute positions compose a group root's absolute position with its
//! members' group positions. Each group root carries a version that is bumped
//! whenever its absolute position moves; members remember the version they were
//! derived from, so a stale member is detected without walking the group.

use alloc::vec::Vec;

use crate::error::Ring;
use crate::graph::Graph;
use crate::layout::{LayoutDirty, ScaledPosition};
use crate::types::{Fit, NodeId};

impl<V> Graph<V> {
    /// Current absolute position of `id`, recomputing it and any stale frames it depends on.
    ///
    /// Returns `None` for stale ids and for nodes whose placement has never been committed.
    pub fn absolute_position(&mut self, id: NodeId) -> Option<ScaledPosition> {
        if !self.is_alive(id) {
            return None;
        }
        self.commit_absolute(id)
    }

    /// Recompute group positions of `group`'s members, parents before children.
    ///
    /// A member is refreshed when its parent re-placed it, when it has never been
    /// positioned, or when its parent was refreshed in this sweep.
    pub(crate) fn sweep_group_positions(&mut self, group: NodeId) {
        let order: Vec<_> = self.ring_reversed(Ring::Siblings, group).collect();
        let mut changed = false;
        for &member in &order {
            if member == group {
                let layout = &mut self.node_mut(group).layout;
                // The root's own placement belongs to its parent's group.
                layout.dirty.remove(LayoutDirty::GROUP_POSITION);
                if layout.group_position != Some(ScaledPosition::IDENTITY) {
                    layout.group_position = Some(ScaledPosition::IDENTITY);
                    layout.dirty |= LayoutDirty::GROUP_POSITION | LayoutDirty::ABSOLUTE_POSITION;
                    changed = true;
                }
                continue;
            }
            let node = self.node(member);
            let Some((parent, to_parent)) = node.neighbors.parent() else {
                continue;
            };
            let parent_layout = &self.node(parent).layout;
            let refresh = node.layout.dirty.contains(LayoutDirty::GROUP_POSITION)
                || node.layout.group_position.is_none()
                || parent_layout.dirty.contains(LayoutDirty::GROUP_POSITION);
            if !refresh {
                continue;
            }
            let Some(parent_position) = parent_layout.group_position else {
                continue;
            };
            let Some(edge) = self.edge(parent, to_parent.reverse()) else {
                continue;
            };
            let local = ScaledPosition {
                origin: edge.position,
                scale: node.scale,
            };
            let position = parent_position.then(local);
            let creased: Vec<_> = node
                .neighbors
                .children()
                .map(|(_, c)| c)
                .filter(|&c| self.node(c).paint_group.is_some())
                .collect();
            let layout = &mut self.node_mut(member).layout;
            layout.group_position = Some(position);
            layout.dirty |= LayoutDirty::GROUP_POSITION | LayoutDirty::ABSOLUTE_POSITION;
            changed = true;
            for child in creased {
                self.node_mut(child).layout.dirty |= LayoutDirty::ABSOLUTE_POSITION;
            }
        }
        for member in order {
            self.node_mut(member)
                .layout
                .dirty
                .remove(LayoutDirty::GROUP_POSITION);
        }
        let layout = &mut self.node_mut(group).layout;
        layout.dirty.remove(LayoutDirty::GROUP_GEOMETRY);
        if changed {
            layout.dirty |= LayoutDirty::GROUP_MEMBERS | LayoutDirty::PAINT;
        }
        tracing::trace!(?group, changed, "swept group positions");
    }

    /// Bring `group`'s absolute position and, when needed, its members' up to date.
    ///
    /// Returns true when anything was recomputed.
    pub(crate) fn commit_group_absolute(&mut self, group: NodeId) -> bool {
        let before = self.node(group).layout.group_version;
        let was_current = self.absolute_is_current(group);
        self.commit_absolute(group);
        let moved = self.node(group).layout.group_version != before;
        let members_dirty = self
            .node(group)
            .layout
            .dirty
            .contains(LayoutDirty::GROUP_MEMBERS);
        if moved || members_dirty {
            let members: Vec<_> = self.ring_after(Ring::Siblings, group).collect();
            for member in members {
                self.commit_absolute(member);
            }
            let layout = &mut self.node_mut(group).layout;
            layout.dirty.remove(LayoutDirty::GROUP_MEMBERS);
            layout.dirty |= LayoutDirty::PAINT;
        }
        !was_current || moved || members_dirty
    }

    /// Whether `id`'s cached absolute position is still valid, following its
    /// chain of frames up to the world root.
    pub(crate) fn absolute_is_current(&self, id: NodeId) -> bool {
        let mut cursor = id;
        loop {
            let node = self.node(cursor);
            if node.layout.absolute.is_none()
                || node.layout.dirty.contains(LayoutDirty::ABSOLUTE_POSITION)
            {
                return false;
            }
            let group = node.paint_group_root;
            let frame = if group == cursor {
                match node.neighbors.parent() {
                    Some((parent, _)) => parent,
                    None => return true,
                }
            } else {
                group
            };
            let frame_group = self.node(frame).paint_group_root;
            if node.layout.absolute_seen != self.node(frame_group).layout.group_version {
                return false;
            }
            cursor = frame;
        }
    }

    pub(crate) fn commit_absolute(&mut self, id: NodeId) -> Option<ScaledPosition> {
        if self.absolute_is_current(id) {
            return self.node(id).layout.absolute;
        }
        let node = self.node(id);
        let group = node.paint_group_root;
        if group != id {
            let local = node.layout.group_position?;
            let frame = self.commit_absolute(group)?;
            let version = self.node(group).layout.group_version;
            let absolute = frame.then(local);
            let layout = &mut self.node_mut(id).layout;
            layout.absolute = Some(absolute);
            layout.absolute_seen = version;
            layout.dirty.remove(LayoutDirty::ABSOLUTE_POSITION);
            return Some(absolute);
        }

        let scale = node.scale;
        let pinned = (node.fit == Fit::Naive)
            .then_some(node.layout.explicit)
            .flatten();
        let (mut absolute, seen) = match node.neighbors.parent() {
            None => (
                ScaledPosition {
                    origin: kurbo::Point::ORIGIN,
                    scale,
                },
                0,
            ),
            Some((parent, to_parent)) => {
                let origin = self.edge(parent, to_parent.reverse())?.position;
                let frame = self.commit_absolute(parent)?;
                let parent_group = self.node(parent).paint_group_root;
                (
                    frame.then(ScaledPosition { origin, scale }),
                    self.node(parent_group).layout.group_version,
                )
            }
        };
        if let Some(origin) = pinned {
            absolute.origin = origin;
        }
        let layout = &mut self.node_mut(id).layout;
        if layout.absolute != Some(absolute) {
            layout.group_version += 1;
            layout.dirty |= LayoutDirty::PAINT;
        }
        layout.absolute = Some(absolute);
        layout.absolute_seen = seen;
        layout.dirty.remove(LayoutDirty::ABSOLUTE_POSITION);
        Some(absolute)
    }
}
