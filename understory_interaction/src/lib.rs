// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Interaction: a deterministic, `no_std` pointer and touch engine for retained 2D scenes.
//!
//! ## Overview
//!
//! This crate turns normalized pointer and touch input into semantic scene events: hover
//! enter/leave, press/release, click and double click, and the drag lifecycle.
//! It does not own geometry. It reads an ordered [`DisplayList`](crate::host::DisplayList)
//! (for example `understory_scene::Scene` with the `scene_adapter` feature) and asks it to
//! translate shapes while dragging.
//!
//! ## Pipeline
//!
//! 1) Raw input arrives as a [`PointerInput`](crate::types::PointerInput) through
//!    [`Engine::handle`](crate::engine::Engine::handle).
//! 2) The [hit tester](crate::hit) walks the display list front to back, skipping silent
//!    shapes and the drag target and honouring ancestor clips.
//! 3) The engine updates the [`InteractionState`](crate::state::InteractionState) and emits
//!    hover transitions. The [drag controller](crate::drag) starts, moves and finishes drags.
//! 4) The [`Dispatcher`](crate::dispatch::Dispatcher) bubbles each event from its target
//!    through the ancestors, then to the engine bus, honouring cancellation. Events with no
//!    target go to the engine bus and to overlays.
//!
//! Touch surfaces go through the [gesture emulator](crate::gesture), which retries missed
//! touches at small offsets and synthesizes clicks and double clicks from tap timing.
//!
//! ## Time
//!
//! Dwell and tap timing read an injected [`Clock`](crate::clock::Clock). Use
//! [`ManualClock`](crate::clock::ManualClock) for tests and replays.
//!
//! ## Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use kurbo::{Point, Vec2};
//! use understory_interaction::{
//!     clock::ManualClock,
//!     engine::Engine,
//!     host::{DisplayList, InputSurface, NullPainter},
//!     types::{Cursor, DeviceClass, EventKind, InputKind, PointerInput},
//! };
//!
//! // A single draggable square.
//! struct Square(kurbo::Rect);
//! impl DisplayList for Square {
//!     type Key = u8;
//!     fn display_list(&self) -> &[u8] { &[0] }
//!     fn contains_point(&self, _: u8, pt: Point) -> bool { self.0.contains(pt) }
//!     fn parent_of(&self, _: u8) -> Option<u8> { None }
//!     fn clip_excludes(&self, _: u8, _: Point) -> bool { false }
//!     fn is_silent(&self, _: u8) -> bool { false }
//!     fn is_draggable(&self, _: u8) -> bool { true }
//!     fn drag_dwell_ms(&self, _: u8) -> Option<u64> { None }
//!     fn translate(&mut self, _: u8, d: Vec2) { self.0 = self.0 + d; }
//! }
//!
//! struct Canvas;
//! impl InputSurface for Canvas {
//!     fn device_class(&self) -> DeviceClass { DeviceClass::Mouse }
//!     fn set_cursor(&mut self, _: Cursor) {}
//! }
//!
//! let clock = ManualClock::new(0);
//! let mut engine = Engine::new(Square(kurbo::Rect::new(0.0, 0.0, 10.0, 10.0)), NullPainter, &clock);
//! engine.attach(Box::new(Canvas)).unwrap();
//!
//! let events = Rc::new(RefCell::new(Vec::new()));
//! for kind in [EventKind::DragStart, EventKind::DragEnd] {
//!     let events = events.clone();
//!     engine.on(kind, move |p| events.borrow_mut().push(p.kind));
//! }
//!
//! for (kind, x) in [(InputKind::Move, 5.0), (InputKind::Down, 5.0), (InputKind::Move, 25.0), (InputKind::Up, 25.0)] {
//!     engine.handle(PointerInput::new(kind, (x, 5.0))).unwrap();
//! }
//! assert_eq!(*events.borrow(), [EventKind::DragStart, EventKind::DragEnd]);
//! assert_eq!(engine.scene().0.x0, 20.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod adapters;
pub mod bus;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod drag;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod hit;
pub mod host;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_util;
