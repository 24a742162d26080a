// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resumable commit: geometry, group positions, absolute positions, paint.
//!
//! [`CommitLayout`] walks one world in four stages. Each call to
//! [`CommitLayout::crank`] does a bounded slice of work (at most one paint group)
//! and reports whether more remains, so the caller decides how much work fits in
//! a frame.
//!
//! 1. Geometry: paint groups children-first, and inside each group its layout
//!    ring in order, so every child is committed before its parent.
//! 2. Group positions: paint groups parents-first, composing edge positions.
//! 3. Absolute positions: paint groups parents-first, skipping unmoved groups.
//! 4. Paint: every group whose geometry or position changed.

use kurbo::{Point, Size};
use understory_extent::Extent;

use crate::direction::{Axis, Direction};
use crate::error::{LayoutError, Result, Ring};
use crate::graph::Graph;
use crate::layout::{LayoutDirty, LayoutPhase};
use crate::painter::{LayoutPainter, PaintResult};
use crate::types::{Alignment, Fit, NodeId, PreferredAxis};

/// Which stage a [`CommitLayout`] is in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommitStage {
    /// Computing extents and child placements.
    Geometry,
    /// Composing positions relative to paint-group roots.
    GroupPositions,
    /// Composing absolute positions.
    AbsolutePositions,
    /// Calling the painter for changed groups.
    Paint,
    /// Everything is current as of the graph revision the cycle started at.
    Done,
}

/// Result of a budgeted [`CommitLayout::commit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Layout and paint are current.
    Done,
    /// The budget ran out; call again to continue.
    Pending,
}

/// Incremental, resumable commit of one world.
///
/// The graph is borrowed only for the duration of each call. Any edit made
/// between cranks restarts the cycle at the geometry stage; nodes that are still
/// committed are not recomputed. [`reset`](Self::reset) forces the same restart.
#[derive(Clone, Debug)]
pub struct CommitLayout {
    root: NodeId,
    stage: CommitStage,
    cursor: Option<NodeId>,
    committed_in_pass: usize,
    yielded_in_pass: bool,
    paint_pending: bool,
    /// Graph revision the current cycle started at.
    revision: Option<u64>,
}

impl CommitLayout {
    /// Prepare to commit the world rooted at `root`.
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            stage: CommitStage::Geometry,
            cursor: None,
            committed_in_pass: 0,
            yielded_in_pass: false,
            paint_pending: false,
            revision: None,
        }
    }

    /// The world root being committed.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The stage the next crank will work on.
    pub fn stage(&self) -> CommitStage {
        self.stage
    }

    /// Restart from the geometry stage on the next crank.
    pub fn reset(&mut self) {
        *self = Self::new(self.root);
    }

    /// Do one bounded slice of work. Returns whether work remains.
    pub fn crank<V, P>(&mut self, graph: &mut Graph<V>, painter: &mut P) -> Result<bool>
    where
        P: LayoutPainter<V> + ?Sized,
    {
        if graph.try_node(self.root)?.neighbors.parent().is_some() {
            return Err(LayoutError::NotRoot(self.root));
        }
        let revision = graph.revision();
        if self.revision != Some(revision) {
            // The cursor may name a group that moved to another world or died.
            self.begin();
            self.revision = Some(revision);
        }
        if self.stage == CommitStage::Done {
            return Ok(false);
        }
        let more = match self.stage {
            CommitStage::Geometry => self.crank_geometry(graph, painter)?,
            CommitStage::GroupPositions => self.crank_group_positions(graph),
            CommitStage::AbsolutePositions => self.crank_absolute_positions(graph),
            CommitStage::Paint => self.crank_paint(graph, painter),
            CommitStage::Done => false,
        };
        if !more {
            tracing::debug!(root = ?self.root, "commit done");
        }
        Ok(more)
    }

    /// Crank until done or until `max_cranks` slices have run.
    pub fn commit<V, P>(
        &mut self,
        graph: &mut Graph<V>,
        painter: &mut P,
        max_cranks: usize,
    ) -> Result<CommitOutcome>
    where
        P: LayoutPainter<V> + ?Sized,
    {
        for _ in 0..max_cranks {
            if !self.crank(graph, painter)? {
                return Ok(CommitOutcome::Done);
            }
        }
        Ok(CommitOutcome::Pending)
    }

    fn begin(&mut self) {
        self.stage = CommitStage::Geometry;
        self.cursor = None;
        self.committed_in_pass = 0;
        self.yielded_in_pass = false;
        self.paint_pending = false;
    }

    fn advance(&mut self, stage: CommitStage) {
        tracing::trace!(root = ?self.root, ?stage, "commit stage");
        self.stage = stage;
        self.cursor = None;
    }

    fn crank_geometry<V, P>(&mut self, graph: &mut Graph<V>, painter: &mut P) -> Result<bool>
    where
        P: LayoutPainter<V> + ?Sized,
    {
        let root = self.root;
        if self.cursor.is_none() && graph.node(root).layout.is_committed() {
            self.advance(CommitStage::GroupPositions);
            return Ok(true);
        }
        let group = self
            .cursor
            .filter(|&g| graph.is_paint_group(g))
            .unwrap_or_else(|| graph.ring_next(Ring::PaintGroups, root));

        // A committed root means the whole group is committed.
        if !graph.node(group).layout.is_committed() {
            let mut member = graph.ring_next(Ring::Siblings, group);
            loop {
                match commit_node(graph, painter, member)? {
                    NodeCommit::Committed => self.committed_in_pass += 1,
                    NodeCommit::Yielded => self.yielded_in_pass = true,
                    NodeCommit::Unchanged => {}
                }
                if member == group {
                    break;
                }
                member = graph.ring_next(Ring::Siblings, member);
            }
        }

        if group != root {
            self.cursor = Some(graph.ring_next(Ring::PaintGroups, group));
        } else if self.yielded_in_pass {
            if self.committed_in_pass == 0 {
                tracing::warn!(?root, "geometry pass made no progress");
                return Err(LayoutError::LayoutStuck);
            }
            self.committed_in_pass = 0;
            self.yielded_in_pass = false;
            self.cursor = None;
        } else {
            self.advance(CommitStage::GroupPositions);
        }
        Ok(true)
    }

    /// Visit groups parents-first, running `work` on each until it reports doing something.
    fn sweep<V>(
        &mut self,
        graph: &mut Graph<V>,
        next: CommitStage,
        mut work: impl FnMut(&mut Graph<V>, NodeId) -> bool,
    ) -> bool {
        let root = self.root;
        let mut group = self
            .cursor
            .filter(|&g| graph.is_paint_group(g))
            .unwrap_or(root);
        loop {
            let did_work = work(graph, group);
            let prev = graph.ring_prev(Ring::PaintGroups, group);
            if prev == root {
                self.advance(next);
                return true;
            }
            self.cursor = Some(prev);
            if did_work {
                return true;
            }
            group = prev;
        }
    }

    fn crank_group_positions<V>(&mut self, graph: &mut Graph<V>) -> bool {
        self.sweep(graph, CommitStage::AbsolutePositions, |graph, group| {
            let dirty = graph
                .node(group)
                .layout
                .dirty
                .contains(LayoutDirty::GROUP_GEOMETRY);
            if dirty {
                graph.sweep_group_positions(group);
            }
            dirty
        })
    }

    fn crank_absolute_positions<V>(&mut self, graph: &mut Graph<V>) -> bool {
        self.sweep(graph, CommitStage::Paint, Graph::commit_group_absolute)
    }

    fn crank_paint<V, P>(&mut self, graph: &mut Graph<V>, painter: &mut P) -> bool
    where
        P: LayoutPainter<V> + ?Sized,
    {
        let mut pending = false;
        self.sweep(graph, CommitStage::Done, |graph, group| {
            if !graph.node(group).layout.dirty.contains(LayoutDirty::PAINT) {
                return false;
            }
            match painter.paint(graph, group) {
                PaintResult::Done => {
                    graph.node_mut(group).layout.dirty.remove(LayoutDirty::PAINT);
                }
                PaintResult::ContinueNextFrame => pending = true,
            }
            true
        });
        self.paint_pending |= pending;
        if self.stage == CommitStage::Done && self.paint_pending {
            // Revisit the groups that asked for another frame.
            self.paint_pending = false;
            self.advance(CommitStage::Paint);
        }
        self.stage != CommitStage::Done
    }
}

/// What happened to one node during the geometry stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NodeCommit {
    /// It was already committed.
    Unchanged,
    /// Its geometry was recomputed.
    Committed,
    /// A child was not committed yet.
    Yielded,
}

/// Commit one node: size it, place its children, and merge their extents.
pub(crate) fn commit_node<V, P>(
    graph: &mut Graph<V>,
    painter: &mut P,
    id: NodeId,
) -> Result<NodeCommit>
where
    P: LayoutPainter<V> + ?Sized,
{
    let node = graph.node(id);
    match node.layout.phase {
        LayoutPhase::Committed => return Ok(NodeCommit::Unchanged),
        LayoutPhase::InCommit => return Err(LayoutError::NestedCommit(id)),
        LayoutPhase::NeedsCommit => {}
    }
    if node.fit == Fit::Naive && node.layout.explicit.is_some() && node.layout.size.is_some() {
        graph.node_mut(id).layout.phase = LayoutPhase::Committed;
        return Ok(NodeCommit::Committed);
    }
    if let Some((_, child)) = node
        .neighbors
        .children()
        .find(|&(_, c)| !graph.node(c).layout.is_committed())
    {
        tracing::trace!(?id, ?child, "waiting on child");
        return Ok(NodeCommit::Yielded);
    }

    graph.node_mut(id).layout.phase = LayoutPhase::InCommit;
    match place_children(graph, painter, id) {
        Ok(()) => Ok(NodeCommit::Committed),
        Err(err) => {
            graph.node_mut(id).layout.phase = LayoutPhase::NeedsCommit;
            Err(err)
        }
    }
}

fn place_children<V, P>(graph: &mut Graph<V>, painter: &mut P, id: NodeId) -> Result<()>
where
    P: LayoutPainter<V> + ?Sized,
{
    let size = sanitize(id, painter.size(graph, id));
    let line_thickness = painter.line_thickness(graph, id).max(0.0);
    let extents = [
        Extent::from_run(size.width, size.height / 2.0, size.width / 2.0)?,
        Extent::from_run(size.width, size.height / 2.0, size.width / 2.0)?,
        Extent::from_run(size.height, size.width / 2.0, size.height / 2.0)?,
        Extent::from_run(size.height, size.width / 2.0, size.height / 2.0)?,
    ];
    let rootlike = graph.is_rootlike(id);
    let canonical = graph.canonical_live(id);
    let to_parent = graph.node(id).neighbors.parent_direction();
    let primary = graph.primary_axis(id);
    let mut placer = Placer {
        fit: graph.node(id).fit,
        graph,
        painter,
        id,
        size,
        line_thickness,
        extents,
        prefer_vertical: primary == Axis::Vertical,
    };

    match to_parent {
        Some(to_parent) if !rootlike => {
            let across = to_parent
                .axis()
                .perpendicular()
                .unwrap_or(Axis::Horizontal);
            let away = to_parent.reverse();
            if canonical == PreferredAxis::Perpendicular {
                placer.layout_axis(across, false)?;
                placer.layout_single(away, true)?;
            } else {
                placer.layout_single(away, false)?;
                placer.layout_axis(across, true)?;
            }
        }
        _ => {
            let secondary = primary.perpendicular().unwrap_or(Axis::Vertical);
            placer.layout_axis(primary, false)?;
            placer.layout_axis(secondary, true)?;
        }
    }
    placer.layout_inward();
    placer.finish();
    tracing::trace!(?id, ?size, "committed");
    Ok(())
}

fn sanitize(id: NodeId, size: Size) -> Size {
    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let sanitized = Size::new(clean(size.width), clean(size.height));
    if sanitized != size {
        tracing::warn!(?id, ?size, "painter returned an unusable size; clamped");
    }
    sanitized
}

/// Working state for committing one node.
struct Placer<'a, V, P: ?Sized> {
    graph: &'a mut Graph<V>,
    painter: &'a mut P,
    id: NodeId,
    fit: Fit,
    size: Size,
    line_thickness: f64,
    extents: [Extent; 4],
    prefer_vertical: bool,
}

impl<V, P> Placer<'_, V, P>
where
    P: LayoutPainter<V> + ?Sized,
{
    fn child(&self, direction: Direction) -> Option<NodeId> {
        self.graph.node(self.id).neighbors.child_at(direction)
    }

    fn child_scale(&self, child: NodeId) -> f64 {
        self.graph.node(child).scale
    }

    fn child_extent(&self, child: NodeId, direction: Direction) -> &Extent {
        &self.graph.node(child).layout.extents[direction.index()]
    }

    /// Half of this node's size along `direction`'s axis.
    fn half(&self, direction: Direction) -> f64 {
        half_along(self.size, direction)
    }

    fn allows_overlap(&self, direction: Direction, default: bool) -> bool {
        self.graph
            .edge(self.id, direction)
            .map_or(default, |e| e.axis_overlap.allows(default))
    }

    /// Sum of separations along the chain of children in `direction`, in `start`'s space.
    fn chain_length(&self, start: NodeId, direction: Direction) -> f64 {
        let mut total = 0.0;
        let mut scale = 1.0;
        let mut cursor = start;
        while let Some(next) = self.graph.node(cursor).neighbors.child_at(direction) {
            let separation = self
                .graph
                .edge(cursor, direction)
                .map_or(0.0, |e| e.separation);
            total += scale * separation;
            scale *= self.graph.node(next).scale;
            cursor = next;
        }
        total
    }

    /// Offset of the child in `direction` across the link axis, in this node's space.
    fn alignment(&self, direction: Direction) -> f64 {
        let Some(child) = self.child(direction) else {
            return 0.0;
        };
        let Some(across) = direction.axis().perpendicular() else {
            return 0.0;
        };
        let mode = self
            .graph
            .edge(self.id, direction)
            .map_or(Alignment::None, |e| e.alignment);
        let offset = match mode {
            Alignment::None | Alignment::InwardHorizontal | Alignment::InwardVertical => 0.0,
            Alignment::Negative => self.chain_length(child, across.negative()),
            Alignment::Positive => -self.chain_length(child, across.positive()),
            Alignment::Center => {
                (self.chain_length(child, across.negative())
                    - self.chain_length(child, across.positive()))
                    / 2.0
            }
        };
        offset * self.child_scale(child)
    }

    fn painter_separation(&mut self, direction: Direction) -> Result<f64> {
        let separation = self.painter.separation(
            self.graph,
            self.id,
            direction.axis(),
            direction,
            self.prefer_vertical,
        );
        if separation.is_nan() || separation < 0.0 {
            return Err(LayoutError::NegativeSeparation(separation));
        }
        Ok(separation)
    }

    /// Center-to-center distance for the child in `direction` against what is placed so far.
    fn single_separation(
        &mut self,
        direction: Direction,
        child: NodeId,
        alignment: f64,
        allow_overlap: bool,
    ) -> Result<f64> {
        let scale = self.child_scale(child);
        let own = &self.extents[direction.index()];
        let theirs = self.child_extent(child, direction.reverse());
        let adjustment = alignment + own.offset() - scale * theirs.offset();
        let silhouette = own.separation(
            theirs,
            adjustment,
            allow_overlap,
            scale,
            self.line_thickness / 2.0,
        );
        let child_size = self.graph.node(child).layout.size.unwrap_or(Size::ZERO);
        let boxes = self.half(direction) + scale * half_along(child_size, direction);
        Ok(silhouette.max(boxes) + self.painter_separation(direction)?)
    }

    /// Distance the two children of a pair need between each other.
    fn pair_separation(
        &mut self,
        (negative, first, first_alignment): (Direction, NodeId, f64),
        (positive, second, second_alignment): (Direction, NodeId, f64),
        allow_overlap: bool,
    ) -> Result<f64> {
        let first_scale = self.child_scale(first);
        let second_scale = self.child_scale(second);
        let first_face = self.child_extent(first, positive);
        let second_face = self.child_extent(second, negative);
        let adjustment = ((second_alignment - second_scale * second_face.offset())
            - (first_alignment - first_scale * first_face.offset()))
            / first_scale;
        let between = first_scale
            * first_face.separation(
                second_face,
                adjustment,
                allow_overlap,
                second_scale / first_scale,
                self.line_thickness / 2.0 / first_scale,
            );
        Ok(between + self.painter_separation(positive)?)
    }

    fn layout_single(&mut self, direction: Direction, default_overlap: bool) -> Result<()> {
        let Some(child) = self.child(direction) else {
            return Ok(());
        };
        let allow = self.allows_overlap(direction, default_overlap);
        let alignment = self.alignment(direction);
        let separation = self.single_separation(direction, child, alignment, allow)?;
        self.place(direction, child, alignment, separation)
    }

    fn layout_axis(&mut self, axis: Axis, default_overlap: bool) -> Result<()> {
        let negative = axis.negative();
        let positive = axis.positive();
        let (first, second) = match (self.child(negative), self.child(positive)) {
            (None, None) => return Ok(()),
            (Some(_), None) => return self.layout_single(negative, default_overlap),
            (None, Some(_)) => return self.layout_single(positive, default_overlap),
            (Some(first), Some(second)) => (first, second),
        };
        let allow_first = self.allows_overlap(negative, default_overlap);
        let allow_second = self.allows_overlap(positive, default_overlap);
        let first_alignment = self.alignment(negative);
        let second_alignment = self.alignment(positive);
        let mut first_separation =
            self.single_separation(negative, first, first_alignment, allow_first)?;
        let mut second_separation =
            self.single_separation(positive, second, second_alignment, allow_second)?;
        let between = self.pair_separation(
            (negative, first, first_alignment),
            (positive, second, second_alignment),
            allow_first && allow_second,
        )?;
        if between > first_separation + second_separation {
            first_separation = first_separation.max(between / 2.0);
            second_separation = second_separation.max(between / 2.0);
        }
        self.place(negative, first, first_alignment, first_separation)?;
        self.place(positive, second, second_alignment, second_separation)
    }

    /// Record the child's placement and fold its extents into this node's.
    fn place(
        &mut self,
        direction: Direction,
        child: NodeId,
        alignment: f64,
        separation: f64,
    ) -> Result<()> {
        let scale = self.child_scale(child);
        let position = if direction.is_vertical() {
            Point::new(alignment, direction.sign() * separation)
        } else {
            Point::new(direction.sign() * separation, alignment)
        };
        let face = self.child_extent(child, direction.reverse());
        let contact = face.size_at(face.offset() - alignment / scale);
        let reach = if contact.is_nan() { 0.0 } else { scale * contact };
        let line_length = (separation - self.half(direction) - reach).max(0.0);

        let edge = self.graph.node_mut(self.id).neighbors.ensure(direction);
        edge.alignment_offset = alignment;
        edge.separation = separation;
        edge.line_length = line_length;
        edge.position = position;

        self.merge_child(child, scale, position)?;
        if self.line_thickness > 0.0 && line_length > 0.0 {
            self.merge_connector(direction, line_length)?;
        }
        Ok(())
    }

    fn merge_child(&mut self, child: NodeId, scale: f64, position: Point) -> Result<()> {
        let extents = &self.graph.node(child).layout.extents;
        for direction in Direction::CARDINAL {
            let (along, across) = match direction {
                Direction::Downward => (position.x, position.y),
                Direction::Upward => (position.x, -position.y),
                Direction::Forward => (position.y, position.x),
                _ => (position.y, -position.x),
            };
            let theirs = &extents[direction.index()];
            let own = &mut self.extents[direction.index()];
            let length_adjustment = along + own.offset() - scale * theirs.offset();
            if self.fit == Fit::Loose {
                own.combine_extent_and_simplify(theirs, length_adjustment, across, scale)?;
            } else {
                own.combine_extent(theirs, length_adjustment, across, scale)?;
            }
        }
        Ok(())
    }

    /// Keep the connector toward `direction` clear in the extents that run along it.
    fn merge_connector(&mut self, direction: Direction, line_length: f64) -> Result<()> {
        let half = self.half(direction);
        let start = if direction.sign() > 0.0 {
            half
        } else {
            -(half + line_length)
        };
        let Some(across) = direction.axis().perpendicular() else {
            return Ok(());
        };
        for side in [across.negative(), across.positive()] {
            let own = &mut self.extents[side.index()];
            let offset = own.offset();
            own.combine_bound(start + offset, line_length, self.line_thickness / 2.0)?;
        }
        Ok(())
    }

    /// Place nested content inside this node's box.
    fn layout_inward(&mut self) {
        let Some(child) = self.child(Direction::Inward) else {
            return;
        };
        let scale = self.child_scale(child);
        let layout = &self.graph.node(child).layout;
        let down = &layout.extents[Direction::Downward.index()];
        let forward = &layout.extents[Direction::Forward.index()];
        let width = scale * down.bounding_values().total_length;
        let height = scale * forward.bounding_values().total_length;
        let offset_x = scale * down.offset();
        let offset_y = scale * forward.offset();
        let alignment = self
            .graph
            .edge(self.id, Direction::Inward)
            .map_or(Alignment::None, |e| e.alignment);
        let inset = self.painter.inward_inset(self.graph, self.id);
        // Aligned content hangs on a connector from the near side of the inset box.
        // The line stays inside this node's box, so no extent bound is merged for it.
        let (position, line_length) = match alignment {
            Alignment::InwardVertical => (
                Point::new(
                    -width / 2.0 + offset_x,
                    self.size.height / 2.0 - inset - height + offset_y,
                ),
                self.size.height - 2.0 * inset - height,
            ),
            Alignment::InwardHorizontal => (
                Point::new(
                    self.size.width / 2.0 - inset - width + offset_x,
                    -height / 2.0 + offset_y,
                ),
                self.size.width - 2.0 * inset - width,
            ),
            _ => (
                Point::new(-width / 2.0 + offset_x, -height / 2.0 + offset_y),
                0.0,
            ),
        };
        let edge = self
            .graph
            .node_mut(self.id)
            .neighbors
            .ensure(Direction::Inward);
        edge.alignment_offset = 0.0;
        edge.separation = 0.0;
        edge.line_length = line_length.max(0.0);
        edge.position = position;
    }

    /// Store results and schedule the affected positions.
    fn finish(self) {
        let Self {
            graph,
            id,
            size,
            extents,
            ..
        } = self;
        let node = graph.node_mut(id);
        node.layout.extents = extents;
        node.layout.size = Some(size);
        node.layout.phase = LayoutPhase::Committed;
        let group = node.paint_group_root;
        let children: alloc::vec::Vec<_> = node.neighbors.children().map(|(_, c)| c).collect();
        for child in children {
            let layout = &mut graph.node_mut(child).layout;
            layout.dirty |= LayoutDirty::GROUP_POSITION | LayoutDirty::ABSOLUTE_POSITION;
        }
        graph.node_mut(group).layout.dirty |= LayoutDirty::GROUP_GEOMETRY | LayoutDirty::PAINT;
    }
}

fn half_along(size: Size, direction: Direction) -> f64 {
    if direction.is_vertical() {
        size.height / 2.0
    } else {
        size.width / 2.0
    }
}
