// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hitgraph_geometry::{Circle, Rect, Shape};
use hitgraph_scene::{ColliderSpec, Geometry, NodeDesc, QueryFilter, Scene};
use kurbo::Point;

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

/// `n × n` cells of `cell` units, each a rect rotated a little about its center.
fn grid_scene(n: usize, cell: f64) -> Scene<usize> {
    let mut scene = Scene::new();
    for y in 0..n {
        for x in 0..n {
            let transform = format!(
                "translate({}, {}) rotate({}, {}, {})",
                x as f64 * cell,
                y as f64 * cell,
                (x + y) % 30,
                cell / 2.0,
                cell / 2.0
            );
            scene.add(
                NodeDesc::new(Geometry::Rect(Rect::new(0.0, 0.0, cell * 0.8, cell * 0.8)))
                    .with_transform(transform)
                    .with_data(y * n + x),
            );
        }
    }
    scene
}

/// `groups` bounds-culled groups of `per_group` random circles each.
fn grouped_scene(groups: usize, per_group: usize) -> Scene<usize> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut scene = Scene::new();
    for g in 0..groups {
        let group = scene.add(
            NodeDesc::group()
                .with_collider(ColliderSpec::Bounds)
                .with_transform(format!("translate({}, 0)", g as f64 * 200.0)),
        );
        for i in 0..per_group {
            let circle = Circle::new(rng.next_f64() * 180.0, rng.next_f64() * 180.0, 6.0);
            let _ = scene.insert(
                Some(group),
                NodeDesc::new(Geometry::Circle(circle)).with_data(g * per_group + i),
            );
        }
    }
    scene
}

fn probes(count: usize, extent: f64) -> Vec<Shape> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|_| Shape::Point(Point::new(rng.next_f64() * extent, rng.next_f64() * extent)))
        .collect()
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    for &n in &[16_usize, 32, 64] {
        let scene = grid_scene(n, 10.0);
        let qs = probes(256, n as f64 * 10.0);
        // Warm the matrix caches once so the loop measures queries only.
        let _ = scene.find_all(&qs[0], QueryFilter::default());
        group.throughput(Throughput::Elements(qs.len() as u64));
        group.bench_function(format!("find_all_point_n{n}"), |b| {
            b.iter(|| {
                for q in &qs {
                    black_box(scene.find_all(q, QueryFilter::default()));
                }
            });
        });
        group.bench_function(format!("find_any_point_n{n}"), |b| {
            b.iter(|| {
                for q in &qs {
                    black_box(scene.find_any(q, QueryFilter::default()));
                }
            });
        });
        let window = Shape::Rect(Rect::new(0.0, 0.0, n as f64 * 2.5, n as f64 * 2.5));
        group.bench_function(format!("find_all_window_n{n}"), |b| {
            b.iter(|| black_box(scene.find_all(&window, QueryFilter::default())));
        });
    }
    group.finish();
}

fn bench_grouped(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounds_groups");
    for &(groups, per) in &[(8_usize, 64_usize), (32, 64)] {
        let scene = grouped_scene(groups, per);
        let qs = probes(256, 200.0);
        let _ = scene.find_all(&qs[0], QueryFilter::default());
        group.throughput(Throughput::Elements(qs.len() as u64));
        group.bench_function(format!("find_all_g{groups}_p{per}"), |b| {
            b.iter(|| {
                for q in &qs {
                    black_box(scene.find_all(q, QueryFilter::INTERACTIVE));
                }
            });
        });
    }
    group.finish();
}

fn bench_cold_caches(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold");
    let qs = probes(64, 320.0);
    group.bench_function("build_and_query_n32", |b| {
        b.iter_batched(
            || grid_scene(32, 10.0),
            |scene| {
                for q in &qs {
                    black_box(scene.find_all(q, QueryFilter::default()));
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_grid, bench_grouped, bench_cold_caches);
criterion_main!(benches);
