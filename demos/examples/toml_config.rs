// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tuning from TOML.
//!
//! Reads a partial [`GestureConfig`] document (missing keys keep their defaults),
//! builds an engine with it, and shows how an invalid document is rejected.
//!
//! Run:
//! - `cargo run -p understory_demos --example toml_config`
//! - `cargo run -p understory_demos --example toml_config -- path/to/gestures.toml`

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use understory_interaction::clock::StdClock;
use understory_interaction::config::GestureConfig;
use understory_interaction::engine::Engine;
use understory_interaction::host::NullPainter;
use understory_scene::Scene;

const SAMPLE: &str = r#"
# Slower tapping for a kiosk.
tap_delay_ms = 450
touch_offsets = [
    { x = 12.0 },
    { x = -24.0 },
    { x = 12.0, y = 12.0 },
    { y = -24.0 },
]
"#;

const BROKEN: &str = r#"
tap_delay_ms = 0
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)?,
        None => SAMPLE.to_owned(),
    };
    let config: GestureConfig = toml::from_str(&text)?;
    info!(
        tap_delay_ms = config.tap_delay_ms,
        double_tap_window_ms = config.double_tap_window_ms(),
        click_suppress_threshold = config.click_suppress_threshold,
        offsets = config.touch_offsets.len(),
        "loaded gesture config"
    );

    let engine = Engine::with_config(Scene::new(), NullPainter, StdClock::new(), config)?;
    info!(attached = engine.is_attached(), "engine ready");

    let broken: GestureConfig = toml::from_str(BROKEN)?;
    match Engine::with_config(Scene::new(), NullPainter, StdClock::new(), broken) {
        Ok(_) => warn!("zero tap delay was accepted"),
        Err(err) => info!(%err, "rejected"),
    }

    info!(defaults = %toml::to_string(&GestureConfig::default())?, "default config");
    Ok(())
}
