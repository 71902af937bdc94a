// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a card onto a tray.
//!
//! Builds a small scene, wires the interaction engine to it, and replays a mouse
//! sequence: hover the card, press, drag it across the tray, release. Shape handlers on
//! the tray react to drag-enter, drag-leave and drop. An overlay sees the events that
//! hit nothing.
//!
//! Run:
//! - `cargo run -p understory_demos --example drag_and_drop`
//! - `RUST_LOG=understory_interaction=trace cargo run -p understory_demos --example drag_and_drop`

use kurbo::{Point, Rect, RoundedRect};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use understory_interaction::clock::StdClock;
use understory_interaction::dispatch::Overlay;
use understory_interaction::engine::Engine;
use understory_interaction::host::{InputSurface, Painter};
use understory_interaction::types::{
    Cursor, DeviceClass, EventKind, EventPacket, InputKind, Outcome, PointerInput,
};
use understory_scene::{LocalShape, Scene, ShapeFlags, ShapeId};

#[derive(Debug, Default)]
struct LogPainter {
    frames: usize,
}

impl Painter for LogPainter {
    fn refresh(&mut self) {
        self.frames += 1;
        info!(frame = self.frames, "refresh");
    }
}

struct Window;

impl InputSurface for Window {
    fn device_class(&self) -> DeviceClass {
        DeviceClass::Mouse
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        info!(?cursor, "cursor");
    }
}

struct Background;

impl Overlay<ShapeId> for Background {
    fn on_event(&mut self, packet: &EventPacket<ShapeId>) {
        info!(kind = %packet.kind, at = ?packet.input.position, "overlay");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut scene = Scene::new();
    let tray = scene.insert(
        None,
        LocalShape::new(RoundedRect::new(200.0, 50.0, 400.0, 250.0, 12.0)),
    )?;
    let card = scene.insert(
        None,
        LocalShape::new(Rect::new(20.0, 100.0, 100.0, 160.0))
            .with_flags(ShapeFlags::DRAGGABLE)
            .with_z_index(1),
    )?;
    let label = scene.insert(
        Some(card),
        LocalShape::new(Rect::new(30.0, 110.0, 90.0, 130.0)).with_flags(ShapeFlags::SILENT),
    )?;
    let _ = scene.commit();
    info!(?tray, ?card, ?label, "scene built");

    let mut engine = Engine::new(scene, LogPainter::default(), StdClock::new());
    engine.attach(Box::new(Window))?;
    engine.add_overlay(Box::new(Background));

    engine.on_shape(tray, EventKind::DragEnter, |p, _| {
        info!(dragged = ?p.dragged, "tray: something is over me");
        Outcome::Continue
    });
    engine.on_shape(tray, EventKind::DragLeave, |p, _| {
        info!(dragged = ?p.dragged, "tray: it left");
        Outcome::Continue
    });
    engine.on_shape(tray, EventKind::Drop, |p, scene: &mut Scene| {
        info!(dropped = ?p.dragged, "tray: accepted");
        if let Some(card) = p.dragged {
            scene.set_z_index(card, 2);
        }
        Outcome::Stop
    });
    let _ = engine.on(EventKind::DragEnd, |p| {
        info!(target = ?p.target, "drag finished");
    });

    let script = [
        (InputKind::Move, 5.0, 5.0),
        (InputKind::Move, 50.0, 120.0),
        (InputKind::Down, 50.0, 120.0),
        (InputKind::Move, 120.0, 130.0),
        (InputKind::Move, 250.0, 150.0),
        (InputKind::Move, 450.0, 150.0),
        (InputKind::Move, 300.0, 150.0),
        (InputKind::Up, 300.0, 150.0),
        (InputKind::Leave, 300.0, 150.0),
    ];
    for (kind, x, y) in script {
        engine.handle(PointerInput::new(kind, Point::new(x, y)))?;
    }

    let damage = engine.scene_mut().commit();
    info!(
        card = ?engine.scene().world_bounds(card),
        damage = ?damage.union_rect(),
        "final state"
    );
    Ok(())
}
