// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`DisplayList`] for Understory Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! ## Notes
//!
//! The engine sees the display list as of the last [`Scene::commit`]. Shapes inserted
//! since are not hit until the next commit; shapes removed since are never hit because
//! their ids are stale. Translation during a drag takes effect for hit testing right away,
//! since containment reads the live transforms.
//!
//! Stale ids report silent, not draggable, and without a parent.

use kurbo::{Point, Vec2};
use understory_scene::{Scene, ShapeFlags, ShapeId};

use crate::host::DisplayList;

impl DisplayList for Scene {
    type Key = ShapeId;

    fn display_list(&self) -> &[ShapeId] {
        Self::display_list(self)
    }

    fn contains_point(&self, key: ShapeId, pt: Point) -> bool {
        Self::contains_point(self, key, pt)
    }

    fn parent_of(&self, key: ShapeId) -> Option<ShapeId> {
        Self::parent_of(self, key)
    }

    fn clip_excludes(&self, key: ShapeId, pt: Point) -> bool {
        Self::clip_excludes(self, key, pt)
    }

    fn is_silent(&self, key: ShapeId) -> bool {
        self.local(key)
            .is_none_or(|l| l.flags.contains(ShapeFlags::SILENT))
    }

    fn is_draggable(&self, key: ShapeId) -> bool {
        self.local(key)
            .is_some_and(|l| l.flags.contains(ShapeFlags::DRAGGABLE))
    }

    fn drag_dwell_ms(&self, key: ShapeId) -> Option<u64> {
        self.local(key)?.drag_dwell_ms
    }

    fn translate(&mut self, key: ShapeId, delta: Vec2) {
        Self::translate(self, key, delta);
    }

    fn mark_dirty(&mut self, key: ShapeId) {
        Self::mark_dirty(self, key);
    }
}
