// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction engine: routes raw input through hit testing, the drag
//! controller, touch emulation and the dispatcher.
//!
//! ## Lifecycle
//!
//! An engine starts detached. [`Engine::attach`] wires the raw inputs of the surface's
//! [`DeviceClass`]. [`Engine::detach`] drops the surface, every handler, subscription and
//! overlay, and resets the state; the engine is inert afterwards.
//!
//! ## Mouse path
//!
//! - Move: drag start check, hit test with hover transitions, drag translation, cursor
//!   update, then `mousemove` to the hover target.
//! - Down: records the press and dispatches `mousedown`. A down right after a secondary
//!   down only dismisses the context menu and is not dispatched.
//! - Up: resets the cursor, dispatches `mouseup`, then drop and drag end.
//! - Click, double click, wheel: dispatched to the hover target, then processed as a move.
//!   Clicks are suppressed after too many drag moves.
//! - Leave: a leave onto an element still inside the surface is a move. Otherwise the
//!   engine dispatches `mouseout`, finishes any drag and emits `globalout`.
//! - Resize: forgets the hover target and emits `resize`.
//!
//! The touch path lives in [`gesture`](crate::gesture).

use alloc::boxed::Box;

use crate::bus::SubscriptionId;
use crate::clock::Clock;
use crate::config::GestureConfig;
use crate::dispatch::{Delivery, Dispatcher, Overlay};
use crate::error::EngineError;
use crate::hit;
use crate::host::{DisplayList, InputSurface, Painter};
use crate::state::InteractionState;
use crate::types::{
    Cursor, EventKind, EventPacket, InputKind, InputMask, Outcome, PointerButton, PointerInput,
    Response,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Lifecycle {
    Detached,
    Attached,
    Disposed,
}

/// Pointer and touch interaction engine for one input surface.
pub struct Engine<S: DisplayList, P, C> {
    pub(crate) scene: S,
    pub(crate) painter: P,
    pub(crate) clock: C,
    pub(crate) config: GestureConfig,
    pub(crate) state: InteractionState<S::Key>,
    pub(crate) dispatcher: Dispatcher<S>,
    surface: Option<Box<dyn InputSurface>>,
    wired: InputMask,
    lifecycle: Lifecycle,
}

impl<S: DisplayList, P, C> core::fmt::Debug for Engine<S, P, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .field("wired", &self.wired)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}

impl<S: DisplayList, P: Painter, C: Clock> Engine<S, P, C> {
    /// Engine with the default [`GestureConfig`].
    pub fn new(scene: S, painter: P, clock: C) -> Self {
        Self {
            scene,
            painter,
            clock,
            config: GestureConfig::default(),
            state: InteractionState::new(),
            dispatcher: Dispatcher::new(),
            surface: None,
            wired: InputMask::empty(),
            lifecycle: Lifecycle::Detached,
        }
    }

    /// Engine with a custom configuration, validated first.
    pub fn with_config(
        scene: S,
        painter: P,
        clock: C,
        config: GestureConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let mut engine = Self::new(scene, painter, clock);
        engine.config = config;
        Ok(engine)
    }

    // --- lifecycle ---

    /// Start receiving input from `surface`.
    pub fn attach(&mut self, surface: Box<dyn InputSurface>) -> Result<(), EngineError> {
        match self.lifecycle {
            Lifecycle::Attached => return Err(EngineError::AlreadyAttached),
            Lifecycle::Disposed => return Err(EngineError::Disposed),
            Lifecycle::Detached => {}
        }
        let class = surface.device_class();
        self.wired = InputMask::for_device(class);
        self.surface = Some(surface);
        self.lifecycle = Lifecycle::Attached;
        tracing::debug!(?class, wired = ?self.wired, "surface attached");
        Ok(())
    }

    /// Stop receiving input and release every handler and listener.
    ///
    /// The engine is inert afterwards: input fails with [`EngineError::NotAttached`]
    /// and [`Engine::attach`] fails with [`EngineError::Disposed`].
    pub fn detach(&mut self) {
        self.surface = None;
        self.wired = InputMask::empty();
        self.dispatcher.clear();
        self.state.reset();
        self.lifecycle = Lifecycle::Disposed;
        tracing::debug!("surface detached");
    }

    /// Whether a surface is attached.
    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Attached
    }

    /// Raw inputs accepted from the attached surface.
    pub fn wired(&self) -> InputMask {
        self.wired
    }

    // --- input ---

    /// Process one normalized input.
    pub fn handle(&mut self, input: PointerInput) -> Result<Response, EngineError> {
        if self.lifecycle != Lifecycle::Attached {
            return Err(EngineError::NotAttached);
        }
        if !self.wired.contains(input.kind.mask()) {
            tracing::debug!(kind = ?input.kind, "rejected unwired input");
            return Err(EngineError::Unwired(input.kind));
        }
        let mut response = Response::default();
        match input.kind {
            InputKind::Resize => self.on_resize(input),
            InputKind::Click => self.on_click(input, EventKind::Click),
            InputKind::DoubleClick => self.on_click(input, EventKind::DoubleClick),
            InputKind::Wheel => self.on_wheel(input),
            InputKind::Move => self.on_move(input),
            InputKind::Leave => self.on_leave(input),
            InputKind::Down => self.on_down(input),
            InputKind::Up => self.on_up(input),
            InputKind::TouchStart => self.on_touch_start(input),
            InputKind::TouchMove => response = self.on_touch_move(input),
            InputKind::TouchEnd => response = self.on_touch_end(input),
        }
        Ok(response)
    }

    pub(crate) fn on_resize(&mut self, input: PointerInput) {
        self.state.hover = None;
        self.state.pointer_down = false;
        self.dispatcher.trigger(EventKind::Resize, input);
    }

    pub(crate) fn on_click(&mut self, input: PointerInput, kind: EventKind) {
        if self.state.click_count < self.config.click_suppress_threshold {
            self.deliver(self.state.hover, kind, input, None);
        } else {
            tracing::debug!(
                ?kind,
                click_count = self.state.click_count,
                "click suppressed after drag motion"
            );
        }
        self.on_move(input);
    }

    pub(crate) fn on_wheel(&mut self, input: PointerInput) {
        self.deliver(self.state.hover, EventKind::Wheel, input, None);
        self.on_move(input);
    }

    pub(crate) fn on_move(&mut self, input: PointerInput) {
        self.state.last = self.state.current;
        self.state.current = input.position;
        let delta = self.state.delta();

        // Uses the hover target from before this move.
        self.try_start_drag(input);

        let found = hit::find_hover(&self.scene, self.state.current, self.state.drag);
        self.resolve_hover(found, input);

        if let Some(dragged) = self.state.drag {
            self.drag_motion(dragged, delta);
        }

        self.update_cursor();
        self.deliver(self.state.hover, EventKind::Move, input, None);
    }

    pub(crate) fn on_down(&mut self, input: PointerInput) {
        self.state.click_count = 0;
        if self.state.last_down_button == Some(PointerButton::Secondary) {
            self.state.last_down_button = Some(input.button);
            self.state.press = None;
            tracing::debug!("pointer down dismisses context menu");
            return;
        }
        self.state.pointer_down_at = Some(self.clock.now_ms());
        self.state.pointer_down = true;
        self.state.press = self.state.hover;
        tracing::trace!(press = ?self.state.press, button = ?input.button, "pointer down");
        self.deliver(self.state.hover, EventKind::Down, input, None);
        self.state.last_down_button = Some(input.button);
    }

    pub(crate) fn on_up(&mut self, input: PointerInput) {
        self.set_cursor(Cursor::Default);
        self.state.pointer_down = false;
        self.state.press = None;
        tracing::trace!(hover = ?self.state.hover, "pointer up");
        self.deliver(self.state.hover, EventKind::Up, input, None);
        self.drop_dragged(input);
        self.end_drag(input);
    }

    pub(crate) fn on_leave(&mut self, input: PointerInput) {
        if input.related_in_surface {
            self.on_move(input);
            return;
        }
        let input = input.at(self.state.current);
        self.set_cursor(Cursor::Default);
        self.state.pointer_down = false;
        self.state.press = None;
        if let Some(old) = self.state.hover {
            self.deliver(Some(old), EventKind::HoverLeave, input, None);
        }
        self.drop_dragged(input);
        self.end_drag(input);
        self.state.hover = None;
        tracing::trace!("pointer left surface");
        self.dispatcher.trigger(EventKind::GlobalOut, input);
    }

    // --- hover ---

    /// Apply the result of a hit test to the hover target.
    pub(crate) fn resolve_hover(&mut self, found: Option<S::Key>, input: PointerInput) {
        match found {
            Some(target) => self.enter(target, input),
            None => self.vacate(input),
        }
    }

    fn enter(&mut self, target: S::Key, input: PointerInput) {
        if self.state.hover != Some(target) {
            let old = self.state.hover;
            tracing::trace!(?old, new = ?target, "hover changed");
            if let Some(old) = old {
                self.deliver(Some(old), EventKind::HoverLeave, input, None);
                self.drag_leave(old, input);
            }
            self.state.hover = Some(target);
            self.deliver(Some(target), EventKind::HoverEnter, input, None);
            self.drag_enter(target, input);
        }
        self.drag_over(target, input);
    }

    fn vacate(&mut self, input: PointerInput) {
        if let Some(old) = self.state.hover {
            // Dragging the target out from under the pointer is not a leave.
            if self.state.drag != Some(old) {
                tracing::trace!(?old, "hover cleared");
                self.deliver(Some(old), EventKind::HoverLeave, input, None);
                self.drag_leave(old, input);
            }
        }
        self.state.hover = None;
    }

    fn update_cursor(&mut self) {
        let cursor = match self.state.hover {
            _ if self.state.drag.is_some() => Cursor::Move,
            Some(h) if self.scene.is_draggable(h) => Cursor::Move,
            Some(_) => Cursor::Pointer,
            None => Cursor::Default,
        };
        self.set_cursor(cursor);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_cursor(cursor);
        }
    }

    pub(crate) fn deliver(
        &mut self,
        target: Option<S::Key>,
        kind: EventKind,
        input: PointerInput,
        dragged: Option<S::Key>,
    ) -> Delivery<S::Key> {
        self.dispatcher
            .dispatch(&mut self.scene, target, kind, input, dragged)
    }

    // --- accessors and registration ---

    /// The display list.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable display list, for edits between inputs.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// The painter.
    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Interaction state.
    pub fn state(&self) -> &InteractionState<S::Key> {
        &self.state
    }

    /// Gesture configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Handler registry, for direct access to shape buses and overlays.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<S> {
        &mut self.dispatcher
    }

    /// Subscribe on the engine bus.
    pub fn on(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&EventPacket<S::Key>) + 'static,
    ) -> SubscriptionId {
        self.dispatcher.bus().subscribe(kind, callback)
    }

    /// Subscribe on the engine bus for the next event of `kind` only.
    pub fn once(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&EventPacket<S::Key>) + 'static,
    ) -> SubscriptionId {
        self.dispatcher.bus().once(kind, callback)
    }

    /// Remove an engine bus subscription.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.bus().unsubscribe(id)
    }

    /// Emit a reduced packet on the engine bus.
    pub fn trigger(&mut self, kind: EventKind, input: PointerInput) {
        self.dispatcher.trigger(kind, input);
    }

    /// Install the `on<kind>` handler slot of a shape.
    pub fn on_shape(
        &mut self,
        shape: S::Key,
        kind: EventKind,
        handler: impl FnMut(&EventPacket<S::Key>, &mut S) -> Outcome + 'static,
    ) {
        self.dispatcher.set_handler(shape, kind, handler);
    }

    /// Register an overlay listener.
    pub fn add_overlay(&mut self, overlay: Box<dyn Overlay<S::Key>>) {
        self.dispatcher.add_overlay(overlay);
    }
}
