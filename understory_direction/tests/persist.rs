// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saving and restoring worlds through serde.

use std::collections::BTreeMap;

use kurbo::Size;
use understory_direction::{
    Alignment, AxisOverlap, CommitLayout, CommitOutcome, Direction, Fit, Graph, LayoutError,
    LayoutPainter, NodeId, PreferredAxis, SavedGraph, SavedNode,
};

struct Tuples;

impl LayoutPainter<(f64, f64)> for Tuples {
    fn size(&mut self, graph: &Graph<(f64, f64)>, node: NodeId) -> Size {
        let (w, h) = *graph.value(node).unwrap();
        Size::new(w, h)
    }
}

fn sample() -> (Graph<(f64, f64)>, NodeId) {
    let mut g = Graph::new();
    let root = g.insert((20.0, 10.0));
    let below = g.insert((10.0, 4.0));
    let ahead = g.insert((10.0, 4.0));
    let leaf = g.insert((6.0, 6.0));
    g.set_axis_overlap(root, Direction::Downward, AxisOverlap::Prevented)
        .unwrap();
    g.connect(root, Direction::Downward, below).unwrap();
    g.set_alignment(root, Direction::Forward, Alignment::Center)
        .unwrap();
    g.set_scale(ahead, 0.5).unwrap();
    g.connect(root, Direction::Forward, ahead).unwrap();
    g.connect(ahead, Direction::Downward, leaf).unwrap();
    g.crease(ahead).unwrap();
    g.set_layout_preference(leaf, PreferredAxis::Perpendicular)
        .unwrap();
    g.set_fit(below, Fit::Loose).unwrap();
    g.set_rtl(below, true).unwrap();
    (g, root)
}

#[test]
fn json_round_trip_rebuilds_the_same_world() {
    let (mut g, root) = sample();
    let saved = g.save(root).unwrap();
    let json = serde_json::to_string(&saved).unwrap();
    let back: SavedGraph<(f64, f64)> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, saved);

    let mut h = Graph::new();
    let restored = h.restore(back).unwrap();
    assert_eq!(h.save(restored).unwrap(), saved);
    h.verify(restored).unwrap();

    let ahead = h.child_at(restored, Direction::Forward).unwrap();
    assert!(h.is_creased(ahead));
    assert_eq!(h.scale(ahead), Some(0.5));
    assert_eq!(h.paint_groups(restored).count(), 2);

    for (graph, world) in [(&mut g, root), (&mut h, restored)] {
        assert_eq!(
            CommitLayout::new(world)
                .commit(graph, &mut Tuples, 1_000)
                .unwrap(),
            CommitOutcome::Done
        );
    }
    let original_ahead = g.child_at(root, Direction::Forward).unwrap();
    assert_eq!(
        g.absolute_position(original_ahead),
        h.absolute_position(ahead)
    );
    let original_leaf = g.child_at(original_ahead, Direction::Downward).unwrap();
    let leaf = h.child_at(ahead, Direction::Downward).unwrap();
    assert_eq!(g.absolute_position(original_leaf), h.absolute_position(leaf));
}

#[test]
fn save_starts_from_the_world_root() {
    let (g, root) = sample();
    let below = g.child_at(root, Direction::Downward).unwrap();
    let saved = g.save(below).unwrap();
    assert_eq!(saved.root, 0);
    assert_eq!(saved.nodes.len(), 4);
    assert_eq!(saved.nodes[&0].parent_id, None);
    assert!(!saved.nodes[&0].is_paint_group);
}

#[test]
fn restore_rejects_forward_references() {
    let node = |parent_id| SavedNode {
        value: (1.0, 1.0),
        scale: 1.0,
        fit: Fit::Exact,
        layout_preference: PreferredAxis::Horizontal,
        parent_id,
        parent_direction: parent_id.map(|_| Direction::Upward),
        alignment: Alignment::None,
        axis_overlap: AxisOverlap::Default,
        is_paint_group: false,
        rtl: false,
    };
    let saved = SavedGraph {
        root: 0,
        nodes: BTreeMap::from([(0, node(None)), (1, node(Some(2))), (2, node(Some(0)))]),
    };
    assert_eq!(
        Graph::new().restore(saved),
        Err(LayoutError::MissingSavedNode(2))
    );
}
