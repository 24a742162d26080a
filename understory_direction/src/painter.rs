// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The callbacks layout needs from the application.

use kurbo::Size;

use crate::direction::{Axis, Direction};
use crate::graph::Graph;
use crate::types::NodeId;

/// Outcome of painting one paint group.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PaintResult {
    /// The group is fully painted.
    #[default]
    Done,
    /// The painter ran out of budget; call again on a later crank.
    ContinueNextFrame,
}

/// Supplies node sizes and spacing during commit, and paints committed groups.
///
/// The graph is passed read-only. Sizes must be finite and non-negative;
/// separations must not be negative.
pub trait LayoutPainter<V> {
    /// Size of the node's own box, centered on the node position.
    fn size(&mut self, graph: &Graph<V>, node: NodeId) -> Size;

    /// Extra gap between `node` and whatever lies in `direction`.
    ///
    /// `prefer_vertical` is true when the node lays out its vertical pair first.
    fn separation(
        &mut self,
        graph: &Graph<V>,
        node: NodeId,
        axis: Axis,
        direction: Direction,
        prefer_vertical: bool,
    ) -> f64 {
        let _ = (graph, node, axis, direction, prefer_vertical);
        0.0
    }

    /// Thickness of the connectors drawn from `node` to its children.
    ///
    /// Non-zero thickness also keeps siblings clear of the connector line.
    fn line_thickness(&mut self, graph: &Graph<V>, node: NodeId) -> f64 {
        let _ = (graph, node);
        0.0
    }

    /// Padding between `node`'s edge and nested content aligned to that edge.
    fn inward_inset(&mut self, graph: &Graph<V>, node: NodeId) -> f64 {
        let _ = (graph, node);
        0.0
    }

    /// Paint the group rooted at `paint_group`. Positions are current when this is called.
    fn paint(&mut self, graph: &Graph<V>, paint_group: NodeId) -> PaintResult {
        let _ = (graph, paint_group);
        PaintResult::Done
    }
}

impl<V, P: LayoutPainter<V> + ?Sized> LayoutPainter<V> for &mut P {
    fn size(&mut self, graph: &Graph<V>, node: NodeId) -> Size {
        (**self).size(graph, node)
    }

    fn separation(
        &mut self,
        graph: &Graph<V>,
        node: NodeId,
        axis: Axis,
        direction: Direction,
        prefer_vertical: bool,
    ) -> f64 {
        (**self).separation(graph, node, axis, direction, prefer_vertical)
    }

    fn line_thickness(&mut self, graph: &Graph<V>, node: NodeId) -> f64 {
        (**self).line_thickness(graph, node)
    }

    fn inward_inset(&mut self, graph: &Graph<V>, node: NodeId) -> f64 {
        (**self).inward_inset(graph, node)
    }

    fn paint(&mut self, graph: &Graph<V>, paint_group: NodeId) -> PaintResult {
        (**self).paint(graph, paint_group)
    }
}
