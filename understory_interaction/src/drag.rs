// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag lifecycle: start, motion, enter/over/leave, drop, end.
//!
//! ## Start
//!
//! A move starts a drag when the pointer is down, nothing is being dragged yet, and the
//! hover target from before the move is draggable and is the press target. A shape with a
//! nonzero dwell time defers the start until that much time has passed since the press;
//! the first eligible move at or after it starts the drag. Starting requests a repaint.
//!
//! ## Motion
//!
//! While dragging, every move translates the dragged shape by the pointer delta and counts
//! towards click suppression.
//!
//! ## Finish
//!
//! Pointer up and leaving the surface deliver `drop` to the shape under the pointer (if any)
//! and then `dragend` to the dragged shape, and clear hover and drag targets.

use kurbo::Vec2;

use crate::clock::Clock;
use crate::engine::Engine;
use crate::host::{DisplayList, Painter};
use crate::types::{EventKind, PointerInput};

impl<S: DisplayList, P: Painter, C: Clock> Engine<S, P, C> {
    pub(crate) fn try_start_drag(&mut self, input: PointerInput) {
        let Some(target) = self.state.hover else {
            return;
        };
        if !self.state.pointer_down
            || self.state.drag.is_some()
            || self.state.press != Some(target)
            || !self.scene.is_draggable(target)
        {
            return;
        }
        if let Some(dwell) = self.scene.drag_dwell_ms(target).filter(|&d| d > 0) {
            let now = self.clock.now_ms();
            let elapsed = now.saturating_sub(self.state.pointer_down_at.unwrap_or(now));
            if elapsed < dwell {
                tracing::trace!(?target, elapsed, dwell, "drag start deferred");
                return;
            }
        }
        self.state.drag = Some(target);
        self.state.dragging = true;
        tracing::debug!(?target, "drag start");
        self.deliver(Some(target), EventKind::DragStart, input, None);
        self.painter.refresh();
    }

    pub(crate) fn drag_motion(&mut self, dragged: S::Key, delta: Vec2) {
        self.scene.translate(dragged, delta);
        self.state.click_count = self.state.click_count.saturating_add(1);
    }

    pub(crate) fn drag_enter(&mut self, target: S::Key, input: PointerInput) {
        if let Some(dragged) = self.state.drag {
            self.deliver(Some(target), EventKind::DragEnter, input, Some(dragged));
        }
    }

    pub(crate) fn drag_over(&mut self, target: S::Key, input: PointerInput) {
        if let Some(dragged) = self.state.drag {
            self.deliver(Some(target), EventKind::DragOver, input, Some(dragged));
        }
    }

    pub(crate) fn drag_leave(&mut self, target: S::Key, input: PointerInput) {
        if let Some(dragged) = self.state.drag {
            self.deliver(Some(target), EventKind::DragLeave, input, Some(dragged));
        }
    }

    pub(crate) fn drop_dragged(&mut self, input: PointerInput) {
        let Some(dragged) = self.state.drag else {
            return;
        };
        self.scene.mark_dirty(dragged);
        self.painter.refresh();
        tracing::debug!(?dragged, over = ?self.state.hover, "drop");
        self.deliver(self.state.hover, EventKind::Drop, input, Some(dragged));
    }

    pub(crate) fn end_drag(&mut self, input: PointerInput) {
        if let Some(dragged) = self.state.drag {
            tracing::debug!(?dragged, "drag end");
            self.deliver(Some(dragged), EventKind::DragEnd, input, None);
            self.state.hover = None;
        }
        self.state.dragging = false;
        self.state.drag = None;
    }
}
