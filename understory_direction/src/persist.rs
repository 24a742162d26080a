// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serializable snapshot of one world.
//!
//! Only user-set state is saved: values, scales, fit modes, preferences, edge
//! configuration, and creases. Layout results are recomputed after restore.

use alloc::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{LayoutError, Result};
use crate::graph::Graph;
use crate::types::{Alignment, AxisOverlap, Fit, NodeId, PreferredAxis};

/// One node of a [`SavedGraph`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedNode<V> {
    /// The node's value.
    pub value: V,
    /// Scale relative to the parent.
    pub scale: f64,
    /// Fit mode.
    pub fit: Fit,
    /// Raw layout preference.
    pub layout_preference: PreferredAxis,
    /// Saved id of the parent; `None` for the world root.
    pub parent_id: Option<u32>,
    /// Direction from this node toward its parent.
    pub parent_direction: Option<Direction>,
    /// Alignment of the parent's edge to this node.
    pub alignment: Alignment,
    /// Axis overlap policy of the parent's edge to this node.
    pub axis_overlap: AxisOverlap,
    /// Whether the node was creased.
    pub is_paint_group: bool,
    /// Right-to-left content.
    #[serde(default)]
    pub rtl: bool,
}

/// A world saved with [`Graph::save`]. Ids are dense and parents precede children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedGraph<V> {
    /// Saved id of the world root.
    pub root: u32,
    /// Nodes by saved id.
    pub nodes: BTreeMap<u32, SavedNode<V>>,
}

impl<V: Clone> Graph<V> {
    /// Snapshot the world containing `world`.
    pub fn save(&self, world: NodeId) -> Result<SavedGraph<V>> {
        self.try_node(world)?;
        let root = self.root_of_live(world);
        let order = self.subtree(root);
        let mut ids = BTreeMap::new();
        for (saved, id) in order.iter().enumerate() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices, so a world has at most u32::MAX nodes."
            )]
            ids.insert(id.idx(), saved as u32);
        }
        let mut nodes = BTreeMap::new();
        for id in order {
            let node = self.node(id);
            let parent = node.neighbors.parent();
            let edge = parent.and_then(|(p, to_parent)| self.edge(p, to_parent.reverse()));
            nodes.insert(
                ids[&id.idx()],
                SavedNode {
                    value: node.value.clone(),
                    scale: node.scale,
                    fit: node.fit,
                    layout_preference: node.preference,
                    parent_id: parent.map(|(p, _)| ids[&p.idx()]),
                    parent_direction: parent.map(|(_, d)| d),
                    alignment: edge.map_or(Alignment::None, |e| e.alignment),
                    axis_overlap: edge.map_or(AxisOverlap::Default, |e| e.axis_overlap),
                    is_paint_group: node.paint_group.is_some_and(|g| g.explicit),
                    rtl: node.rtl,
                },
            );
        }
        Ok(SavedGraph { root: 0, nodes })
    }
}

impl<V> Graph<V> {
    /// Rebuild a saved world in this graph and return its root.
    ///
    /// Nodes are replayed in id order, so every parent must have a smaller id
    /// than its children.
    pub fn restore(&mut self, saved: SavedGraph<V>) -> Result<NodeId> {
        let mut ids = BTreeMap::new();
        for (saved_id, node) in saved.nodes {
            let id = self.insert(node.value);
            ids.insert(saved_id, id);
            self.set_scale(id, node.scale)?;
            self.set_fit(id, node.fit)?;
            self.set_rtl(id, node.rtl)?;
            if let Some(parent_id) = node.parent_id {
                let parent = *ids
                    .get(&parent_id)
                    .ok_or(LayoutError::MissingSavedNode(parent_id))?;
                let direction = node
                    .parent_direction
                    .ok_or(LayoutError::InvalidDirection)?
                    .reverse();
                self.set_alignment(parent, direction, node.alignment)?;
                self.set_axis_overlap(parent, direction, node.axis_overlap)?;
                self.connect(parent, direction, id)?;
            }
            self.set_layout_preference(id, node.layout_preference)?;
            if node.is_paint_group {
                self.crease(id)?;
            }
        }
        tracing::debug!(nodes = ids.len(), "restored saved graph");
        ids.get(&saved.root)
            .copied()
            .ok_or(LayoutError::MissingSavedNode(saved.root))
    }
}
