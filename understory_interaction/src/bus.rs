// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small publish/subscribe bus keyed by [`EventKind`].
//!
//! Every shape, the engine, and any overlay can own one. Subscribers observe packets;
//! they cannot cancel bubbling (per-shape handler slots do that, see
//! [`Dispatcher`](crate::dispatch::Dispatcher)).
//!
//! ```
//! use understory_interaction::bus::EventBus;
//! use understory_interaction::types::{EventKind, EventPacket, InputKind, PointerInput};
//! use std::{cell::Cell, rc::Rc};
//!
//! let hits = Rc::new(Cell::new(0));
//! let mut bus: EventBus<u32> = EventBus::new();
//! let h = hits.clone();
//! bus.once(EventKind::Click, move |_| h.set(h.get() + 1));
//!
//! let packet = EventPacket::reduced(EventKind::Click, PointerInput::new(InputKind::Click, (0.0, 0.0)));
//! bus.emit(&packet);
//! bus.emit(&packet);
//! assert_eq!(hits.get(), 1);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::types::{EventKind, EventPacket};

/// Handle returned by [`EventBus::subscribe`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<K> = Box<dyn FnMut(&EventPacket<K>)>;

struct Subscription<K> {
    id: SubscriptionId,
    kind: EventKind,
    once: bool,
    callback: Callback<K>,
}

/// Subscribers grouped by event kind, called in subscription order.
pub struct EventBus<K> {
    next_id: u64,
    subs: Vec<Subscription<K>>,
}

impl<K> fmt::Debug for EventBus<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subs.len())
            .finish_non_exhaustive()
    }
}

impl<K> Default for EventBus<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EventBus<K> {
    /// Empty bus.
    pub const fn new() -> Self {
        Self {
            next_id: 0,
            subs: Vec::new(),
        }
    }

    fn add(&mut self, kind: EventKind, once: bool, callback: Callback<K>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subs.push(Subscription {
            id,
            kind,
            once,
            callback,
        });
        id
    }

    /// Call `callback` for every packet of `kind`.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&EventPacket<K>) + 'static,
    ) -> SubscriptionId {
        self.add(kind, false, Box::new(callback))
    }

    /// Call `callback` for the next packet of `kind` only.
    pub fn once(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&EventPacket<K>) + 'static,
    ) -> SubscriptionId {
        self.add(kind, true, Box::new(callback))
    }

    /// Remove one subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subs.len();
        self.subs.retain(|s| s.id != id);
        self.subs.len() != before
    }

    /// Remove every subscription for `kind`.
    pub fn unsubscribe_kind(&mut self, kind: EventKind) {
        self.subs.retain(|s| s.kind != kind);
    }

    /// Deliver a packet to the subscribers of its kind. Returns how many were called.
    pub fn emit(&mut self, packet: &EventPacket<K>) -> usize {
        let mut delivered = 0;
        self.subs.retain_mut(|s| {
            if s.kind != packet.kind {
                return true;
            }
            (s.callback)(packet);
            delivered += 1;
            !s.once
        });
        delivered
    }

    /// Whether anyone listens for `kind`.
    pub fn has_subscribers(&self, kind: EventKind) -> bool {
        self.subs.iter().any(|s| s.kind == kind)
    }

    /// Remove every subscription.
    pub fn clear(&mut self) {
        self.subs.clear();
    }
}
