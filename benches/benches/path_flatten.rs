// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use hitgraph_geometry::path::{FlattenOptions, flatten_cubic, flatten_path, parse, segment_shapes};
use kurbo::{CubicBez, Point};

const WAVE: &str = "M0 0 C20 -40 40 40 60 0 S100 -40 120 0 S160 40 180 0 \
                    Q200 -30 220 0 T260 0 T300 0 A40 20 30 0 1 380 0 Z";

fn bench_cubic(c: &mut Criterion) {
    let mut group = c.benchmark_group("cubic");
    let curve = CubicBez::new(
        Point::new(0.0, 0.0),
        Point::new(300.0, -400.0),
        Point::new(700.0, 400.0),
        Point::new(1000.0, 0.0),
    );
    for &flatness in &[10.0, 1.0, 0.1] {
        let opts = FlattenOptions {
            flatness,
            ..FlattenOptions::default()
        };
        group.bench_function(format!("flatten_flatness_{flatness}"), |b| {
            b.iter(|| black_box(flatten_cubic(black_box(curve), &opts)));
        });
    }
    group.finish();
}

fn bench_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("path");
    let d = WAVE.repeat(16);
    group.throughput(Throughput::Bytes(d.len() as u64));
    group.bench_function("parse", |b| b.iter(|| black_box(parse(black_box(&d)))));
    let opts = FlattenOptions::default();
    group.bench_function("flatten_and_segment", |b| {
        b.iter(|| {
            let segments = flatten_path(black_box(&d), &opts);
            black_box(segment_shapes(&segments, 1.0))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_cubic, bench_path);
criterion_main!(benches);
