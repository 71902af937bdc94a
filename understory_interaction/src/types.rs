// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the engine: event kinds, raw inputs, packets, outcomes, and cursors.
//!
//! ## Overview
//!
//! Raw input arrives as a [`PointerInput`] tagged with an [`InputKind`].
//! The engine turns it into zero or more semantic [`EventKind`]s, each delivered as an
//! [`EventPacket`] by the [`Dispatcher`](crate::dispatch::Dispatcher).

use core::fmt;

use kurbo::Point;

/// Semantic scene events produced by the engine.
///
/// Every kind has a conventional lowercase name (see [`EventKind::name`]); per-shape
/// handler slots are conventionally called `on<name>`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// The input surface changed size.
    Resize,
    /// Click (or synthesized tap).
    Click,
    /// Double click (or synthesized double tap).
    DoubleClick,
    /// Wheel rotation.
    Wheel,
    /// Pointer motion.
    Move,
    /// Pointer pressed.
    Down,
    /// Pointer released.
    Up,
    /// Pointer left the input surface.
    GlobalOut,
    /// Pointer entered a shape.
    HoverEnter,
    /// Pointer left a shape.
    HoverLeave,
    /// A drag began on the dragged shape.
    DragStart,
    /// A dragged shape entered another shape.
    DragEnter,
    /// A dragged shape moved over another shape.
    DragOver,
    /// A dragged shape left another shape.
    DragLeave,
    /// A dragged shape was released over another shape.
    Drop,
    /// A drag finished.
    DragEnd,
}

impl EventKind {
    /// All kinds in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Resize,
        Self::Click,
        Self::DoubleClick,
        Self::Wheel,
        Self::Move,
        Self::Down,
        Self::Up,
        Self::GlobalOut,
        Self::HoverEnter,
        Self::HoverLeave,
        Self::DragStart,
        Self::DragEnter,
        Self::DragOver,
        Self::DragLeave,
        Self::Drop,
        Self::DragEnd,
    ];

    /// Conventional event name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Click => "click",
            Self::DoubleClick => "dblclick",
            Self::Wheel => "mousewheel",
            Self::Move => "mousemove",
            Self::Down => "mousedown",
            Self::Up => "mouseup",
            Self::GlobalOut => "globalout",
            Self::HoverEnter => "mouseover",
            Self::HoverLeave => "mouseout",
            Self::DragStart => "dragstart",
            Self::DragEnter => "dragenter",
            Self::DragOver => "dragover",
            Self::DragLeave => "dragleave",
            Self::Drop => "drop",
            Self::DragEnd => "dragend",
        }
    }

    /// Look a kind up by its conventional name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Whether this kind belongs to the drag lifecycle.
    pub const fn is_drag(self) -> bool {
        matches!(
            self,
            Self::DragStart
                | Self::DragEnter
                | Self::DragOver
                | Self::DragLeave
                | Self::Drop
                | Self::DragEnd
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of raw, already normalized input.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InputKind {
    /// Surface resized.
    Resize,
    /// Platform click.
    Click,
    /// Platform double click.
    DoubleClick,
    /// Wheel.
    Wheel,
    /// Mouse move.
    Move,
    /// Pointer left the surface element.
    Leave,
    /// Mouse button down.
    Down,
    /// Mouse button up.
    Up,
    /// Finger down.
    TouchStart,
    /// Finger moved.
    TouchMove,
    /// Finger lifted.
    TouchEnd,
}

impl InputKind {
    /// The wiring bit for this kind.
    pub const fn mask(self) -> InputMask {
        match self {
            Self::Resize => InputMask::RESIZE,
            Self::Click => InputMask::CLICK,
            Self::DoubleClick => InputMask::DOUBLE_CLICK,
            Self::Wheel => InputMask::WHEEL,
            Self::Move => InputMask::MOVE,
            Self::Leave => InputMask::LEAVE,
            Self::Down => InputMask::DOWN,
            Self::Up => InputMask::UP,
            Self::TouchStart => InputMask::TOUCH_START,
            Self::TouchMove => InputMask::TOUCH_MOVE,
            Self::TouchEnd => InputMask::TOUCH_END,
        }
    }
}

bitflags::bitflags! {
    /// Set of raw input kinds wired for a surface.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InputMask: u16 {
        /// [`InputKind::Resize`].
        const RESIZE       = 1 << 0;
        /// [`InputKind::Click`].
        const CLICK        = 1 << 1;
        /// [`InputKind::DoubleClick`].
        const DOUBLE_CLICK = 1 << 2;
        /// [`InputKind::Wheel`].
        const WHEEL        = 1 << 3;
        /// [`InputKind::Move`].
        const MOVE         = 1 << 4;
        /// [`InputKind::Leave`].
        const LEAVE        = 1 << 5;
        /// [`InputKind::Down`].
        const DOWN         = 1 << 6;
        /// [`InputKind::Up`].
        const UP           = 1 << 7;
        /// [`InputKind::TouchStart`].
        const TOUCH_START  = 1 << 8;
        /// [`InputKind::TouchMove`].
        const TOUCH_MOVE   = 1 << 9;
        /// [`InputKind::TouchEnd`].
        const TOUCH_END    = 1 << 10;
    }
}

impl InputMask {
    /// Raw inputs wired for a device class.
    ///
    /// Mouse surfaces never see touch input; touch surfaces emulate clicks, wheel and
    /// mouse buttons themselves and only take touch, leave and resize input.
    pub const fn for_device(class: DeviceClass) -> Self {
        match class {
            DeviceClass::Mouse => Self::RESIZE
                .union(Self::CLICK)
                .union(Self::DOUBLE_CLICK)
                .union(Self::WHEEL)
                .union(Self::MOVE)
                .union(Self::LEAVE)
                .union(Self::DOWN)
                .union(Self::UP),
            DeviceClass::Touch => Self::RESIZE
                .union(Self::TOUCH_START)
                .union(Self::TOUCH_MOVE)
                .union(Self::TOUCH_END)
                .union(Self::LEAVE),
        }
    }
}

/// Pointer button associated with an input.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PointerButton {
    /// Main button (left mouse button, or a finger).
    #[default]
    Primary,
    /// Middle button.
    Auxiliary,
    /// Right button, usually opening a context menu.
    Secondary,
    /// Any other button, by platform index.
    Other(u8),
}

/// Class of pointing device behind an input surface.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeviceClass {
    /// Mouse or trackpad.
    Mouse,
    /// Touch screen.
    Touch,
}

/// A normalized raw input record in scene coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// What happened.
    pub kind: InputKind,
    /// Pointer position in scene space.
    pub position: Point,
    /// Button involved, when relevant.
    pub button: PointerButton,
    /// Wheel delta for [`InputKind::Wheel`].
    pub wheel_delta: f64,
    /// For [`InputKind::Leave`]: whether the pointer moved onto an element that is
    /// still inside the surface (for example an overlay child).
    pub related_in_surface: bool,
}

impl PointerInput {
    /// Input of the given kind at a scene position, primary button.
    pub fn new(kind: InputKind, position: impl Into<Point>) -> Self {
        Self {
            kind,
            position: position.into(),
            button: PointerButton::Primary,
            wheel_delta: 0.0,
            related_in_surface: false,
        }
    }

    /// Builder-style helper to set the button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Builder-style helper to set the wheel delta.
    #[must_use]
    pub fn with_wheel_delta(mut self, delta: f64) -> Self {
        self.wheel_delta = delta;
        self
    }

    /// Builder-style helper to mark a leave as staying inside the surface.
    #[must_use]
    pub fn with_related_in_surface(mut self, inside: bool) -> Self {
        self.related_in_surface = inside;
        self
    }

    /// Same input moved to another position.
    #[must_use]
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }
}

/// The record delivered to handlers for one dispatch.
///
/// A packet lives for exactly one dispatch call. Handlers see it by reference.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EventPacket<K> {
    /// Semantic kind.
    pub kind: EventKind,
    /// Raw input that caused it.
    pub input: PointerInput,
    /// Shape the event is aimed at. `None` for reduced packets.
    pub target: Option<K>,
    /// Shape being dragged, for drag-enter/over/leave and drop.
    pub dragged: Option<K>,
    /// Set once a handler stopped propagation.
    pub cancel_bubble: bool,
}

impl<K> EventPacket<K> {
    /// A reduced packet: no target, no dragged shape, no cancellation.
    ///
    /// Used when nothing is under the pointer and for engine-level notifications.
    pub fn reduced(kind: EventKind, input: PointerInput) -> Self {
        Self {
            kind,
            input,
            target: None,
            dragged: None,
            cancel_bubble: false,
        }
    }
}

/// Handler outcome controlling propagation.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Outcome {
    /// Keep bubbling to the parent.
    #[default]
    Continue,
    /// Cancel bubbling: no ancestor and no engine-level listener sees the event.
    Stop,
}

/// Cursor feedback requested from the input surface.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Cursor {
    /// Nothing interactive under the pointer.
    #[default]
    Default,
    /// Hovering a shape.
    Pointer,
    /// Hovering a draggable shape, or dragging.
    Move,
}

/// What the caller should do with the platform's default handling of an input.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Response {
    /// Suppress the platform default (for example page scrolling during a touch drag).
    pub prevent_default: bool,
}
