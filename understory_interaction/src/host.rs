// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits: the display list the engine reads, the painter it pokes,
//! and the surface it receives input from.
//!
//! The engine owns none of the geometry. It only asks the [`DisplayList`] questions
//! and, while dragging, asks it to translate a shape.

use core::fmt::Debug;

use kurbo::{Point, Vec2};

use crate::types::{Cursor, DeviceClass};

/// An ordered set of shapes with ancestry, flags and containment.
///
/// Keys are small handles. A key that no longer refers to a live shape must behave
/// as if the shape had no geometry and no parent, so walks that reach it simply end.
pub trait DisplayList {
    /// Shape handle.
    type Key: Copy + Eq + Ord + Debug;

    /// Shapes in paint order, back to front.
    fn display_list(&self) -> &[Self::Key];

    /// Whether the shape's own geometry contains a scene-space point.
    fn contains_point(&self, key: Self::Key, pt: Point) -> bool;

    /// Parent of a shape, if any.
    fn parent_of(&self, key: Self::Key) -> Option<Self::Key>;

    /// Whether the shape declares a clip region that leaves out `pt`.
    ///
    /// A clip restricts the shape's descendants. Shapes without a clip exclude nothing.
    fn clip_excludes(&self, key: Self::Key, pt: Point) -> bool;

    /// Silent shapes are never hit and never receive events.
    fn is_silent(&self, key: Self::Key) -> bool;

    /// Whether the shape may be dragged.
    fn is_draggable(&self, key: Self::Key) -> bool;

    /// Minimum press duration before a drag may start, if any.
    fn drag_dwell_ms(&self, key: Self::Key) -> Option<u64>;

    /// Move a shape by a scene-space delta.
    fn translate(&mut self, key: Self::Key, delta: Vec2);

    /// Flag a shape for repaint.
    fn mark_dirty(&mut self, key: Self::Key) {
        let _ = key;
    }
}

/// Repaint requests. Fire-and-forget.
pub trait Painter {
    /// Schedule a repaint.
    fn refresh(&mut self);

    /// Drop any transient hover visualization.
    fn clear_hover(&mut self) {}
}

/// A painter that ignores every request.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullPainter;

impl Painter for NullPainter {
    fn refresh(&mut self) {}
}

/// The element raw input comes from.
pub trait InputSurface {
    /// What kind of device drives this surface.
    fn device_class(&self) -> DeviceClass;

    /// Show a cursor over the surface.
    fn set_cursor(&mut self, cursor: Cursor);
}
