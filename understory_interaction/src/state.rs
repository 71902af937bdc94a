// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction state for one pointer on one surface.
//!
//! The [`Engine`](crate::engine::Engine) is the only writer. Callers read it through
//! [`Engine::state`](crate::engine::Engine::state).
//!
//! ## Invariants
//!
//! - A drag target implies `is_dragging`, and the pointer was down when the drag started.
//! - The hover target is never a silent shape (as of the last hit test).
//! - Between gestures every target is cleared and the state is back to [`Phase::Idle`].

use kurbo::{Point, Vec2};

use crate::types::PointerButton;

/// Conceptual state derived from the fields of [`InteractionState`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase<K> {
    /// Nothing under the pointer, nothing pressed.
    Idle,
    /// Pointer over a shape.
    Hovering(K),
    /// Pointer pressed on a shape.
    Pressed(K),
    /// Shape being dragged.
    Dragging(K),
}

/// Hover, press and drag bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionState<K> {
    pub(crate) hover: Option<K>,
    pub(crate) press: Option<K>,
    pub(crate) drag: Option<K>,
    pub(crate) pointer_down: bool,
    pub(crate) dragging: bool,
    pub(crate) click_count: u32,
    pub(crate) pointer_down_at: Option<u64>,
    pub(crate) touch_started_at: Option<u64>,
    pub(crate) last_tap_at: Option<u64>,
    pub(crate) last_down_button: Option<PointerButton>,
    pub(crate) last: Point,
    pub(crate) current: Point,
}

impl<K> Default for InteractionState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> InteractionState<K> {
    /// Idle state at the origin.
    pub const fn new() -> Self {
        Self {
            hover: None,
            press: None,
            drag: None,
            pointer_down: false,
            dragging: false,
            click_count: 0,
            pointer_down_at: None,
            touch_started_at: None,
            last_tap_at: None,
            last_down_button: None,
            last: Point::ZERO,
            current: Point::ZERO,
        }
    }

    /// Back to [`InteractionState::new`].
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of drag moves since the last press.
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    /// Whether the pointer is down.
    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// When the pointer last went down.
    pub fn pointer_down_at(&self) -> Option<u64> {
        self.pointer_down_at
    }

    /// When the current (or last) touch started.
    pub fn touch_started_at(&self) -> Option<u64> {
        self.touch_started_at
    }

    /// When the last synthesized tap happened.
    pub fn last_tap_at(&self) -> Option<u64> {
        self.last_tap_at
    }

    /// Button of the last pointer-down.
    pub fn last_down_button(&self) -> Option<PointerButton> {
        self.last_down_button
    }

    /// Previous pointer position.
    pub fn last_position(&self) -> Point {
        self.last
    }

    /// Latest pointer position.
    pub fn current_position(&self) -> Point {
        self.current
    }

    /// Motion between the previous and latest positions.
    pub fn delta(&self) -> Vec2 {
        self.current - self.last
    }
}

impl<K: Copy> InteractionState<K> {
    /// Shape under the pointer.
    pub fn hover_target(&self) -> Option<K> {
        self.hover
    }

    /// Shape that was hovered when the pointer went down.
    pub fn press_target(&self) -> Option<K> {
        self.press
    }

    /// Shape being dragged.
    pub fn drag_target(&self) -> Option<K> {
        self.drag
    }

    /// The conceptual state. Dragging dominates pressing, which dominates hovering.
    pub fn phase(&self) -> Phase<K> {
        if let Some(d) = self.drag {
            return Phase::Dragging(d);
        }
        if self.pointer_down
            && let Some(p) = self.press
        {
            return Phase::Pressed(p);
        }
        match self.hover {
            Some(h) => Phase::Hovering(h),
            None => Phase::Idle,
        }
    }
}
