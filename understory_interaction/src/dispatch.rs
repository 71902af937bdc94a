// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event delivery: bubble from a target up its ancestors, then to the engine.
//!
//! ## Delivery
//!
//! Given a target, a kind, the raw input and an optional dragged shape:
//!
//! 1) Build an [`EventPacket`] with `cancel_bubble = false`.
//! 2) Walk from the target through its ancestors. At each shape, call its handler slot for
//!    the kind (if any) and store whether it returned [`Outcome::Stop`] in `cancel_bubble`,
//!    then emit on the shape's own bus. Stop walking once `cancel_bubble` is set.
//! 3) With a target and no cancellation, emit on the engine bus.
//! 4) Without a target and without a dragged shape, emit a reduced packet on the engine bus
//!    and broadcast it to every [`Overlay`].
//!
//! Without a target but with a dragged shape, nothing is delivered.
//!
//! Parents are read from the display list after each handler runs, so a handler may
//! mutate the scene. A shape removed mid-walk has no parent and ends the walk.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use crate::bus::{EventBus, SubscriptionId};
use crate::host::DisplayList;
use crate::types::{EventKind, EventPacket, Outcome, PointerInput};

/// Per-shape handler slot: `on<kind>`.
///
/// Handlers get mutable access to the display list and may restructure it.
pub type ShapeHandler<S> =
    Box<dyn FnMut(&EventPacket<<S as DisplayList>::Key>, &mut S) -> Outcome>;

/// A listener outside the scene (for example an overlay layer) that receives events
/// nothing in the scene was hit for.
pub trait Overlay<K> {
    /// Handler slot. Defaults to ignoring the event.
    fn on_event(&mut self, packet: &EventPacket<K>) {
        let _ = packet;
    }

    /// The overlay's own bus, if it has one.
    fn bus(&mut self) -> Option<&mut EventBus<K>> {
        None
    }
}

/// What a dispatch reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delivery<K> {
    /// Shapes walked, target first.
    pub visited: Vec<K>,
    /// Whether a handler stopped bubbling.
    pub cancelled: bool,
}

struct ShapeSlots<S: DisplayList> {
    handlers: BTreeMap<EventKind, ShapeHandler<S>>,
    bus: EventBus<S::Key>,
}

impl<S: DisplayList> Default for ShapeSlots<S> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
            bus: EventBus::new(),
        }
    }
}

/// Handler registry and bubbling walk.
pub struct Dispatcher<S: DisplayList> {
    shapes: BTreeMap<S::Key, ShapeSlots<S>>,
    bus: EventBus<S::Key>,
    overlays: Vec<Box<dyn Overlay<S::Key>>>,
}

impl<S: DisplayList> fmt::Debug for Dispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("shapes", &self.shapes.len())
            .field("bus", &self.bus)
            .field("overlays", &self.overlays.len())
            .finish_non_exhaustive()
    }
}

impl<S: DisplayList> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DisplayList> Dispatcher<S> {
    /// Empty dispatcher.
    pub fn new() -> Self {
        Self {
            shapes: BTreeMap::new(),
            bus: EventBus::new(),
            overlays: Vec::new(),
        }
    }

    /// Install the `on<kind>` handler of a shape, replacing any previous one.
    pub fn set_handler(
        &mut self,
        shape: S::Key,
        kind: EventKind,
        handler: impl FnMut(&EventPacket<S::Key>, &mut S) -> Outcome + 'static,
    ) {
        self.shapes
            .entry(shape)
            .or_default()
            .handlers
            .insert(kind, Box::new(handler));
    }

    /// Remove the `on<kind>` handler of a shape. Returns whether one was installed.
    pub fn clear_handler(&mut self, shape: S::Key, kind: EventKind) -> bool {
        self.shapes
            .get_mut(&shape)
            .is_some_and(|s| s.handlers.remove(&kind).is_some())
    }

    /// The shape's own bus.
    pub fn shape_bus(&mut self, shape: S::Key) -> &mut EventBus<S::Key> {
        &mut self.shapes.entry(shape).or_default().bus
    }

    /// Drop every handler and subscription of a shape, for example after removing it.
    pub fn forget_shape(&mut self, shape: S::Key) {
        self.shapes.remove(&shape);
    }

    /// The engine-level bus.
    pub fn bus(&mut self) -> &mut EventBus<S::Key> {
        &mut self.bus
    }

    /// Subscribe on the engine-level bus.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&EventPacket<S::Key>) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(kind, callback)
    }

    /// Register an overlay listener.
    pub fn add_overlay(&mut self, overlay: Box<dyn Overlay<S::Key>>) {
        self.overlays.push(overlay);
    }

    /// Drop every handler, subscription and overlay.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.bus.clear();
        self.overlays.clear();
    }

    /// Emit a reduced packet on the engine bus only.
    pub fn trigger(&mut self, kind: EventKind, input: PointerInput) {
        self.bus.emit(&EventPacket::reduced(kind, input));
    }

    /// Deliver an event. See the module docs for the exact order.
    pub fn dispatch(
        &mut self,
        scene: &mut S,
        target: Option<S::Key>,
        kind: EventKind,
        input: PointerInput,
        dragged: Option<S::Key>,
    ) -> Delivery<S::Key> {
        let mut packet = EventPacket {
            kind,
            input,
            target,
            dragged,
            cancel_bubble: false,
        };
        let mut visited = Vec::new();

        let mut cursor = target;
        while let Some(shape) = cursor {
            visited.push(shape);
            if let Some(slots) = self.shapes.get_mut(&shape) {
                if let Some(handler) = slots.handlers.get_mut(&kind) {
                    packet.cancel_bubble = handler(&packet, &mut *scene) == Outcome::Stop;
                }
                slots.bus.emit(&packet);
            }
            cursor = scene.parent_of(shape);
            if packet.cancel_bubble {
                tracing::trace!(?kind, ?shape, "bubbling cancelled");
                break;
            }
        }

        if target.is_some() {
            if !packet.cancel_bubble {
                self.bus.emit(&packet);
            }
        } else if dragged.is_none() {
            let reduced = EventPacket::reduced(kind, input);
            self.bus.emit(&reduced);
            for overlay in &mut self.overlays {
                overlay.on_event(&reduced);
                if let Some(bus) = overlay.bus() {
                    bus.emit(&reduced);
                }
            }
        }

        Delivery {
            visited,
            cancelled: packet.cancel_bubble,
        }
    }
}
