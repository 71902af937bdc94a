// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Circle, Point, Rect};
use understory_interaction::config::GestureConfig;
use understory_interaction::hit::{find_hover, probe_with_offsets};
use understory_scene::{LocalShape, Scene, ShapeFlags};

/// `n * n` cells, each a rect with a circle child. Every fourth rect is silent.
fn grid_scene(n: usize, cell: f64) -> Scene {
    let mut scene = Scene::new();
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let mut rect = LocalShape::new(Rect::new(x0, y0, x0 + cell, y0 + cell));
            if (x + y) % 4 == 0 {
                rect = rect.with_flags(ShapeFlags::SILENT);
            }
            let parent = scene.insert(None, rect).unwrap();
            let dot = Circle::new((x0 + cell * 0.5, y0 + cell * 0.5), cell * 0.25);
            scene.insert(Some(parent), LocalShape::new(dot)).unwrap();
        }
    }
    let _ = scene.commit();
    scene
}

/// Like [`grid_scene`] but every cell sits in a clipped group nested `depth` deep.
fn nested_scene(n: usize, cell: f64, depth: usize) -> Scene {
    let mut scene = Scene::new();
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let bounds = Rect::new(x0, y0, x0 + cell, y0 + cell);
            let mut parent = None;
            for _ in 0..depth {
                let group = LocalShape::default().with_clip(bounds);
                parent = Some(scene.insert(parent, group).unwrap());
            }
            scene.insert(parent, LocalShape::new(bounds)).unwrap();
        }
    }
    let _ = scene.commit();
    scene
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // xorshift64*
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        let v = self.0.wrapping_mul(0x2545_F491_4F6C_DD1D);
        (v >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn gen_points(count: usize, extent: f64, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn bench_find_hover(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_hover");
    for n in [16_usize, 64] {
        let cell = 10.0;
        let scene = grid_scene(n, cell);
        let points = gen_points(256, n as f64 * cell, 0x5eed);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("grid_{n}x{n}"), |b| {
            b.iter(|| {
                for pt in &points {
                    black_box(find_hover(&scene, *pt, None));
                }
            });
        });
    }
    group.finish();
}

fn bench_clipped_ancestry(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_hover_clipped");
    let cell = 10.0;
    let points = gen_points(256, 32.0 * cell, 0xc11b);
    group.throughput(Throughput::Elements(points.len() as u64));
    for depth in [1_usize, 4, 8] {
        let scene = nested_scene(32, cell, depth);
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter(|| {
                for pt in &points {
                    black_box(find_hover(&scene, *pt, None));
                }
            });
        });
    }
    group.finish();
}

fn bench_touch_probe(c: &mut Criterion) {
    let offsets = GestureConfig::default_touch_offsets();
    // Sparse scene: most touches miss and walk every offset.
    let mut scene = Scene::new();
    for i in 0..256 {
        let x0 = f64::from(i % 16) * 40.0;
        let y0 = f64::from(i / 16) * 40.0;
        scene
            .insert(None, LocalShape::new(Rect::new(x0, y0, x0 + 4.0, y0 + 4.0)))
            .unwrap();
    }
    let _ = scene.commit();
    let points = gen_points(256, 640.0, 0xfeed);

    c.bench_function("probe_with_offsets_sparse", |b| {
        b.iter(|| {
            for pt in &points {
                black_box(probe_with_offsets(&scene, *pt, None, &offsets));
            }
        });
    });
}

fn bench_commit(c: &mut Criterion) {
    c.bench_function("commit_after_translate_64x64", |b| {
        b.iter_batched(
            || {
                let mut scene = grid_scene(64, 10.0);
                let first = scene.display_list()[0];
                scene.translate(first, kurbo::Vec2::new(5.0, 5.0));
                scene
            },
            |mut scene| black_box(scene.commit()),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_find_hover,
    bench_clipped_ancestry,
    bench_touch_probe,
    bench_commit
);
criterion_main!(benches);
