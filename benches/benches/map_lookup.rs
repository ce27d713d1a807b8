// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `backfield_map` lookups.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use backfield_map::FixedSizeMap;

const NAMES: [&str; 30] = [
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliett",
    "kilo", "lima", "mike", "november", "oscar", "papa", "quebec", "romeo", "sierra", "tango",
    "uniform", "victor", "whiskey", "xray", "yankee", "zulu", "north", "south", "east", "west",
];

fn build(len: usize) -> FixedSizeMap<u16> {
    FixedSizeMap::from_entries(
        (0_u16..)
            .zip(NAMES.iter().take(len).copied())
            .map(|(index, name)| (name, index)),
    )
    .unwrap()
}

fn bench_map_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("map/hit");
    for len in [1_usize, 4, 8, 16, 30] {
        let map = build(len);
        // The last inserted key sits at the end of its bucket chain.
        let probe = NAMES[len - 1];
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            b.iter(|| black_box(map.get(black_box(probe))))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("map/miss");
    for len in [1_usize, 8, 30] {
        let map = build(len);
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            b.iter(|| black_box(map.get(black_box("absent"))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_map_lookup);
criterion_main!(benches);
