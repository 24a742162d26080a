// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_extent::Extent;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A jagged profile of `runs` runs, roughly one in eight unbounded.
fn gen_profile(rng: &mut Rng, runs: usize) -> Extent {
    let mut e = Extent::new();
    for _ in 0..runs {
        let length = 1.0 + rng.next_f64() * 20.0;
        let size = if rng.next_u64() % 8 == 0 {
            f64::NAN
        } else {
            rng.next_f64() * 50.0
        };
        e.append_ls(length, size).unwrap();
    }
    let total = e.bounding_values().total_length;
    e.set_offset(total / 2.0).unwrap();
    e
}

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("extent_combine");
    for &runs in &[8_usize, 64, 512] {
        let mut rng = Rng::new(0x9e37_79b9_7f4a_7c15 ^ runs as u64);
        let a = gen_profile(&mut rng, runs);
        let b = gen_profile(&mut rng, runs);
        group.throughput(Throughput::Elements(runs as u64));
        group.bench_function(format!("combined_extent/{runs}"), |bencher| {
            bencher.iter(|| black_box(a.combined_extent(&b, 13.0, 4.0, 0.75).unwrap()));
        });
        group.bench_function(format!("combined_extent_negative/{runs}"), |bencher| {
            bencher.iter(|| black_box(a.combined_extent(&b, -13.0, 4.0, 0.75).unwrap()));
        });
        group.bench_function(format!("combine_and_simplify/{runs}"), |bencher| {
            bencher.iter_batched(
                || a.clone(),
                |mut e| {
                    e.combine_extent_and_simplify(&b, 13.0, 4.0, 0.75).unwrap();
                    black_box(e)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_separation(c: &mut Criterion) {
    let mut group = c.benchmark_group("extent_separation");
    for &runs in &[8_usize, 64, 512] {
        let mut rng = Rng::new(0x2545_f491_4f6c_dd1d ^ runs as u64);
        let a = gen_profile(&mut rng, runs);
        let b = gen_profile(&mut rng, runs);
        group.throughput(Throughput::Elements(runs as u64));
        group.bench_function(format!("allow_overlap/{runs}"), |bencher| {
            bencher.iter(|| black_box(a.separation(&b, 7.0, true, 1.0, 0.0)));
        });
        group.bench_function(format!("prevent_overlap/{runs}"), |bencher| {
            bencher.iter(|| black_box(a.separation(&b, 7.0, false, 0.5, 1.0)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_combine, bench_separation);
criterion_main!(benches);
