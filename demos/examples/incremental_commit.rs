// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental, budgeted commits.
//!
//! Build a long chain split into paint groups, then commit it a few cranks per
//! "frame". Resizing one box afterwards only repaints the groups that moved.
//!
//! Run:
//! - `cargo run -p understory_demos --example incremental_commit`

use kurbo::Size;
use understory_direction::{
    CommitLayout, CommitOutcome, Direction, Graph, LayoutPainter, NodeId, PaintResult,
};

#[derive(Default)]
struct Frames {
    painted: Vec<NodeId>,
}

impl LayoutPainter<Size> for Frames {
    fn size(&mut self, graph: &Graph<Size>, node: NodeId) -> Size {
        *graph.value(node).unwrap()
    }

    fn paint(&mut self, _: &Graph<Size>, paint_group: NodeId) -> PaintResult {
        self.painted.push(paint_group);
        PaintResult::Done
    }
}

fn run_frames(graph: &mut Graph<Size>, commit: &mut CommitLayout, painter: &mut Frames) {
    let mut frame = 0;
    loop {
        frame += 1;
        painter.painted.clear();
        let outcome = commit.commit(graph, painter, 4).unwrap();
        println!(
            "frame {frame}: stage {:?}, painted {} group(s)",
            commit.stage(),
            painter.painted.len()
        );
        if outcome == CommitOutcome::Done {
            break;
        }
    }
}

fn main() {
    let mut graph = Graph::new();
    let root = graph.insert(Size::new(30.0, 30.0));
    let mut tail = root;
    let mut chain = Vec::new();
    for i in 0..40 {
        let node = graph.insert(Size::new(20.0, 10.0 + (i % 4) as f64 * 5.0));
        graph.connect(tail, Direction::Downward, node).unwrap();
        if i % 10 == 9 {
            graph.crease(node).unwrap();
        }
        chain.push(node);
        tail = node;
    }
    println!("{} paint groups", graph.paint_groups(root).count());

    let mut commit = CommitLayout::new(root);
    let mut painter = Frames::default();
    run_frames(&mut graph, &mut commit, &mut painter);
    let last = *chain.last().unwrap();
    println!("last box at {:?}", graph.absolute_position(last).unwrap().origin);

    // Grow a box near the bottom. Groups above it keep their positions.
    graph.set_value(chain[35], Size::new(20.0, 60.0)).unwrap();
    run_frames(&mut graph, &mut commit, &mut painter);
    println!("last box at {:?}", graph.absolute_position(last).unwrap().origin);
}
