// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_off_click::tree::{Ancestry, ParentMap};
use understory_off_click::{Click, NodeRef, off_click};

/// A chain `0 <- 1 <- ... <- depth-1` plus `leaves` extra children of the root.
///
/// Clicks land on the deepest chain node, so every containment query against a leaf
/// walks the full chain.
fn tree(depth: usize, leaves: usize) -> Vec<Option<usize>> {
    (0..depth)
        .map(|i| i.checked_sub(1))
        .chain((0..leaves).map(|_| Some(0)))
        .collect()
}

/// Handles on the side leaves; with `hit`, the last one is re-pointed at the root.
fn handles(count: usize, depth: usize, hit: bool) -> Vec<NodeRef<usize>> {
    let out: Vec<NodeRef<usize>> = (0..count).map(|i| NodeRef::mounted(depth + i)).collect();
    if hit && let Some(last) = out.last() {
        last.set(0);
    }
    out
}

fn bench_arena(c: &mut Criterion) {
    let mut group = c.benchmark_group("off_click/arena");

    for depth in [8_usize, 64, 512] {
        let parents = tree(depth, 16);
        let origin = Click::on(depth - 1);
        for count in [1_usize, 4, 16] {
            group.throughput(Throughput::Elements(count as u64));

            let miss = handles(count, depth, false);
            let handler = off_click(Ancestry::new(&parents[..]), |_: &Click<usize>| {}, miss);
            group.bench_with_input(
                BenchmarkId::new(format!("miss/depth={depth}"), count),
                &origin,
                |b, origin| b.iter(|| black_box(handler.classify(black_box(origin)))),
            );

            let hit = handles(count, depth, true);
            let handler = off_click(Ancestry::new(&parents[..]), |_: &Click<usize>| {}, hit);
            group.bench_with_input(
                BenchmarkId::new(format!("hit/depth={depth}"), count),
                &origin,
                |b, origin| b.iter(|| black_box(handler.classify(black_box(origin)))),
            );
        }
    }

    group.finish();
}

fn bench_parent_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("off_click/parent_map");

    for depth in [8_u32, 64, 512] {
        let mut doc = ParentMap::new();
        doc.insert_root(0_u32);
        for node in 1..depth {
            doc.insert(node, node - 1);
        }
        let origin = Click::on(depth - 1);
        let handler = off_click(
            &doc,
            |_: &Click<u32>| {},
            [NodeRef::mounted(depth), NodeRef::mounted(0)],
        );
        group.bench_with_input(BenchmarkId::from_parameter(depth), &origin, |b, origin| {
            b.iter(|| handler.handle(black_box(origin)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_arena, bench_parent_map);
criterion_main!(benches);
