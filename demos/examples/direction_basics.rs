// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Direction graph basics.
//!
//! Build a small diagram, commit it, and print where every box landed.
//!
//! Run:
//! - `cargo run -p understory_demos --example direction_basics`

use kurbo::Size;
use understory_direction::{
    Alignment, Axis, CommitLayout, Direction, Graph, LayoutPainter, NodeId, PaintResult,
};
use understory_extent::Extent;

/// Boxes sized by label length, with a thin connector.
struct Labels;

impl LayoutPainter<&'static str> for Labels {
    fn size(&mut self, graph: &Graph<&'static str>, node: NodeId) -> Size {
        let label = graph.value(node).copied().unwrap_or_default();
        Size::new(8.0 * label.len() as f64 + 8.0, 16.0)
    }

    fn separation(
        &mut self,
        _: &Graph<&'static str>,
        _: NodeId,
        _: Axis,
        _: Direction,
        _: bool,
    ) -> f64 {
        6.0
    }

    fn line_thickness(&mut self, _: &Graph<&'static str>, _: NodeId) -> f64 {
        2.0
    }

    fn paint(&mut self, graph: &Graph<&'static str>, paint_group: NodeId) -> PaintResult {
        println!("paint group {:?}", graph.value(paint_group));
        PaintResult::Done
    }
}

fn main() {
    let mut graph = Graph::new();
    let root = graph.insert("if");
    let then = graph.insert("then");
    let otherwise = graph.insert("else");
    let body = graph.insert("print(x)");
    let condition = graph.insert("x > 0");

    graph.connect(root, Direction::Inward, condition).unwrap();
    graph.connect(root, Direction::Forward, then).unwrap();
    graph
        .set_alignment(root, Direction::Downward, Alignment::Negative)
        .unwrap();
    graph.connect(root, Direction::Downward, otherwise).unwrap();
    graph.connect(then, Direction::Downward, body).unwrap();

    let mut commit = CommitLayout::new(root);
    let outcome = commit.commit(&mut graph, &mut Labels, 64).unwrap();
    println!("commit: {outcome:?}");

    for id in [root, condition, then, body, otherwise] {
        let position = graph.absolute_position(id).unwrap();
        let size = graph.layout(id).and_then(|l| l.size()).unwrap();
        println!(
            "{:>10}: center ({:6.1}, {:6.1}) scale {:.2} size {}x{}",
            graph.value(id).unwrap(),
            position.origin.x,
            position.origin.y,
            position.scale,
            size.width,
            size.height,
        );
    }

    // The root's silhouette as seen from below, one run per step in the outline.
    let below: &Extent = graph
        .layout(root)
        .and_then(|l| l.extent(Direction::Downward))
        .unwrap();
    for run in below.runs() {
        println!("  {:6.1} wide at depth {:6.1}", run.length, run.size);
    }
}
