// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_interaction::clock::ManualClock;
use understory_interaction::engine::Engine;
use understory_interaction::host::{InputSurface, NullPainter};
use understory_interaction::types::{Cursor, DeviceClass, EventKind, InputKind, PointerInput};
use understory_scene::{LocalShape, Scene, ShapeFlags};

struct Surface(DeviceClass);

impl InputSurface for Surface {
    fn device_class(&self) -> DeviceClass {
        self.0
    }
    fn set_cursor(&mut self, _: Cursor) {}
}

fn board(n: usize, cell: f64) -> Scene {
    let mut scene = Scene::new();
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let shape = LocalShape::new(Rect::new(x0 + 1.0, y0 + 1.0, x0 + cell - 1.0, y0 + cell - 1.0))
                .with_flags(ShapeFlags::DRAGGABLE);
            scene.insert(None, shape).unwrap();
        }
    }
    let _ = scene.commit();
    scene
}

/// A sweep across the board: every step crosses into a new cell.
fn sweep(n: usize, cell: f64) -> Vec<PointerInput> {
    (0..n * n)
        .map(|i| {
            let x = (i % n) as f64 * cell + cell * 0.5;
            let y = (i / n) as f64 * cell + cell * 0.5;
            PointerInput::new(InputKind::Move, (x, y))
        })
        .collect()
}

fn bench_hover_sweep(c: &mut Criterion) {
    let clock = ManualClock::new(0);
    let mut engine = Engine::new(board(32, 20.0), NullPainter, &clock);
    engine
        .attach(Box::new(Surface(DeviceClass::Mouse)))
        .unwrap();
    let _ = engine.on(EventKind::HoverEnter, |p| {
        black_box(p.target);
    });
    let moves = sweep(32, 20.0);

    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements(moves.len() as u64));
    group.bench_function("hover_sweep_32x32", |b| {
        b.iter(|| {
            for m in &moves {
                black_box(engine.handle(*m).unwrap());
            }
        });
    });
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    c.bench_function("engine/drag_100_moves", |b| {
        b.iter_batched(
            || {
                let clock = ManualClock::new(0);
                let mut engine = Engine::new(board(16, 20.0), NullPainter, clock);
                engine
                    .attach(Box::new(Surface(DeviceClass::Mouse)))
                    .unwrap();
                engine
            },
            |mut engine| {
                engine
                    .handle(PointerInput::new(InputKind::Move, (10.0, 10.0)))
                    .unwrap();
                engine
                    .handle(PointerInput::new(InputKind::Down, (10.0, 10.0)))
                    .unwrap();
                for i in 1..=100 {
                    let x = 10.0 + f64::from(i);
                    engine
                        .handle(PointerInput::new(InputKind::Move, (x, 10.0)))
                        .unwrap();
                }
                engine
                    .handle(PointerInput::new(InputKind::Up, (110.0, 10.0)))
                    .unwrap();
                black_box(engine.state().click_count())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_hover_sweep, bench_drag);
criterion_main!(benches);
