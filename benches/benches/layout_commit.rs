// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_direction::{CommitLayout, CommitOutcome, Direction, Graph, LayoutPainter, NodeId};

struct Blocks;

impl LayoutPainter<Size> for Blocks {
    fn size(&mut self, graph: &Graph<Size>, node: NodeId) -> Size {
        *graph.value(node).unwrap()
    }

    fn line_thickness(&mut self, _: &Graph<Size>, _: NodeId) -> f64 {
        1.0
    }
}

/// A bushy world: every node gets a forward and a downward child until `count` nodes exist.
/// Every `crease_every`-th node becomes its own paint group.
fn gen_world(count: usize, crease_every: usize) -> (Graph<Size>, NodeId, Vec<NodeId>) {
    let mut g = Graph::new();
    let root = g.insert(Size::new(40.0, 20.0));
    let mut nodes = vec![root];
    let mut next = 0;
    while nodes.len() < count {
        let parent = nodes[next];
        next += 1;
        for direction in [Direction::Forward, Direction::Downward] {
            if nodes.len() >= count {
                break;
            }
            let i = nodes.len();
            let child = g.insert(Size::new(10.0 + (i % 7) as f64 * 4.0, 8.0 + (i % 3) as f64 * 6.0));
            g.connect(parent, direction, child).unwrap();
            if crease_every > 0 && i % crease_every == 0 {
                g.crease(child).unwrap();
            }
            nodes.push(child);
        }
    }
    (g, root, nodes)
}

fn commit_all(g: &mut Graph<Size>, commit: &mut CommitLayout) {
    let outcome = commit.commit(g, &mut Blocks, usize::MAX).unwrap();
    debug_assert_eq!(outcome, CommitOutcome::Done);
}

fn bench_full_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit_full");
    for &count in &[100_usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        for (label, crease_every) in [("one_group", 0), ("grouped", 16)] {
            group.bench_function(format!("{label}/{count}"), |b| {
                b.iter_batched(
                    || gen_world(count, crease_every),
                    |(mut g, root, _)| {
                        let mut commit = CommitLayout::new(root);
                        commit_all(&mut g, &mut commit);
                        black_box(g)
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_incremental_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit_incremental");
    for &count in &[1_000_usize, 10_000] {
        for (label, crease_every) in [("one_group", 0), ("grouped", 16)] {
            let (mut g, root, nodes) = gen_world(count, crease_every);
            let mut commit = CommitLayout::new(root);
            commit_all(&mut g, &mut commit);
            let leaf = *nodes.last().unwrap();
            let mut grow = false;
            group.bench_function(format!("resize_leaf/{label}/{count}"), |b| {
                b.iter(|| {
                    grow = !grow;
                    let size = if grow {
                        Size::new(30.0, 30.0)
                    } else {
                        Size::new(10.0, 8.0)
                    };
                    g.set_value(leaf, size).unwrap();
                    commit_all(&mut g, &mut commit);
                    black_box(g.absolute_position(leaf))
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_full_commit, bench_incremental_commit);
criterion_main!(benches);
