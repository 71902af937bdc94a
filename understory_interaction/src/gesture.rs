// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch emulation: turns touch sequences into mouse-style presses, moves, clicks and
//! double clicks.
//!
//! - Touch start runs a fixed hover search: the raw point first, then the configured
//!   [`TouchOffset`](crate::config::TouchOffset)s, cumulatively, until something is hit.
//!   A hit corrects the input position. The corrected input is then a pointer down.
//! - Touch move is a pointer move. While dragging, the platform default (scrolling) is
//!   suppressed.
//! - Touch end is a pointer up, then [`classify_tap`] decides whether to synthesize a
//!   click, or a click and a double click. Transient hover feedback is always cleared.

use crate::clock::Clock;
use crate::engine::Engine;
use crate::hit;
use crate::host::{DisplayList, Painter};
use crate::types::{EventKind, PointerInput, Response};

/// Classification of a finished touch.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TapClass {
    /// Too long to be a tap.
    None,
    /// A single tap.
    Tap,
    /// A tap shortly after the previous tap.
    DoubleTap,
}

/// Classify a touch ending at `now`.
///
/// A touch shorter than `tap_delay_ms` is a tap. A tap less than half of `tap_delay_ms`
/// after the previous tap is a double tap.
///
/// ```
/// use understory_interaction::gesture::{classify_tap, TapClass};
/// assert_eq!(classify_tap(100, Some(0), None, 300), TapClass::Tap);
/// assert_eq!(classify_tap(200, Some(150), Some(100), 300), TapClass::DoubleTap);
/// assert_eq!(classify_tap(400, Some(0), None, 300), TapClass::None);
/// ```
pub fn classify_tap(
    now: u64,
    touch_started_at: Option<u64>,
    last_tap_at: Option<u64>,
    tap_delay_ms: u64,
) -> TapClass {
    let Some(start) = touch_started_at else {
        return TapClass::None;
    };
    if now.saturating_sub(start) >= tap_delay_ms {
        return TapClass::None;
    }
    match last_tap_at {
        Some(last) if now.saturating_sub(last) < tap_delay_ms / 2 => TapClass::DoubleTap,
        _ => TapClass::Tap,
    }
}

impl<S: DisplayList, P: Painter, C: Clock> Engine<S, P, C> {
    /// Hover search with touch retry offsets. Returns the input at the corrected position.
    pub(crate) fn find_fixed(&mut self, input: PointerInput) -> PointerInput {
        let probe = hit::probe_with_offsets(
            &self.scene,
            input.position,
            self.state.drag,
            &self.config.touch_offsets,
        );
        if probe.point != input.position {
            tracing::trace!(raw = ?input.position, corrected = ?probe.point, "touch point corrected");
        }
        let corrected = input.at(probe.point);
        self.state.current = probe.point;
        self.resolve_hover(probe.hit, corrected);
        corrected
    }

    pub(crate) fn on_touch_start(&mut self, input: PointerInput) {
        self.state.touch_started_at = Some(self.clock.now_ms());
        let corrected = self.find_fixed(input);
        self.on_down(corrected);
    }

    pub(crate) fn on_touch_move(&mut self, input: PointerInput) -> Response {
        self.on_move(input);
        Response {
            prevent_default: self.state.dragging,
        }
    }

    pub(crate) fn on_touch_end(&mut self, input: PointerInput) -> Response {
        self.on_up(input);
        let now = self.clock.now_ms();
        let mut response = Response::default();
        let class = classify_tap(
            now,
            self.state.touch_started_at,
            self.state.last_tap_at,
            self.config.tap_delay_ms,
        );
        tracing::trace!(?class, now, "touch end");
        if class != TapClass::None {
            let corrected = self.find_fixed(input);
            self.on_click(corrected, EventKind::Click);
            if class == TapClass::DoubleTap {
                self.on_click(corrected, EventKind::DoubleClick);
                response.prevent_default = self.state.hover.is_some();
            }
            self.state.last_tap_at = Some(now);
        }
        self.painter.clear_hover();
        response
    }
}
