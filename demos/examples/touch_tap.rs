// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch emulation on a small button.
//!
//! Replays touch sequences against a manual clock:
//! - a touch that lands just left of the button and is corrected onto it,
//! - a quick tap followed by a second tap, which yields click then double click,
//! - a long press, which yields neither.
//!
//! Run:
//! - `cargo run -p understory_demos --example touch_tap`

use kurbo::{Circle, Point};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use understory_interaction::clock::ManualClock;
use understory_interaction::engine::Engine;
use understory_interaction::host::{InputSurface, NullPainter};
use understory_interaction::types::{Cursor, DeviceClass, EventKind, InputKind, PointerInput};
use understory_scene::{LocalShape, Scene};

struct Screen;

impl InputSurface for Screen {
    fn device_class(&self) -> DeviceClass {
        DeviceClass::Touch
    }

    fn set_cursor(&mut self, _: Cursor) {}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut scene = Scene::new();
    let button = scene.insert(None, LocalShape::new(Circle::new((100.0, 100.0), 12.0)))?;
    let _ = scene.commit();

    let clock = ManualClock::new(0);
    let mut engine = Engine::new(scene, NullPainter, &clock);
    engine.attach(Box::new(Screen))?;
    info!(wired = ?engine.wired(), "touch surface attached");

    for kind in [EventKind::Down, EventKind::Click, EventKind::DoubleClick] {
        let _ = engine.on(kind, move |p| {
            info!(event = p.kind.name(), target = ?p.target, at = ?p.input.position, "engine bus");
        });
    }

    let mut touch = |kind: InputKind, at: (f64, f64), t: u64| {
        clock.set(t);
        let response = engine.handle(PointerInput::new(kind, Point::from(at)))?;
        if response.prevent_default {
            info!(t, "platform default suppressed");
        }
        Ok::<_, understory_interaction::error::EngineError>(())
    };

    info!("touch beside the button");
    touch(InputKind::TouchStart, (80.0, 100.0), 0)?;
    touch(InputKind::TouchEnd, (80.0, 100.0), 80)?;

    info!("second quick tap");
    touch(InputKind::TouchStart, (100.0, 100.0), 100)?;
    touch(InputKind::TouchEnd, (100.0, 100.0), 120)?;

    info!("long press");
    touch(InputKind::TouchStart, (100.0, 100.0), 1_000)?;
    touch(InputKind::TouchEnd, (100.0, 100.0), 1_600)?;

    info!(?button, last_tap = ?engine.state().last_tap_at(), "done");
    Ok(())
}
