// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: shape identifiers, flags, and local shape data.

use kurbo::Affine;

use crate::geometry::Geometry;

/// Identifier for a shape in the scene.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ShapeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ShapeId`.
///
/// ### Liveness
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether a `ShapeId` still refers to a live shape.
/// Stale `ShapeId`s never alias a different live shape because the generation must match.
/// Parent walks that reach a stale id simply end, which is what makes removal during
/// event delivery safe for callers walking ancestry.
///
/// ### Ordering
///
/// The `Ord` implementation (slot, then generation) exists so ids can key ordered maps.
/// It says nothing about paint order; see [`Scene::display_list`](crate::Scene::display_list).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) u32, pub(crate) u32);

impl ShapeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Shape flags controlling interaction and display-list membership.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ShapeFlags: u8 {
        /// Shape never takes part in hit testing or event delivery.
        const SILENT    = 0b0000_0001;
        /// Shape may be dragged with the pointer.
        const DRAGGABLE = 0b0000_0010;
        /// Shape and its subtree are left out of the display list.
        const HIDDEN    = 0b0000_0100;
    }
}

/// Local data for a shape.
#[derive(Clone, Debug)]
pub struct LocalShape {
    /// Geometry in the shape's local coordinate space.
    pub geometry: Geometry,
    /// Local transform relative to parent space.
    pub transform: Affine,
    /// Optional clip in local space. It restricts the interactive region of descendants,
    /// not of the shape itself.
    pub clip: Option<Geometry>,
    /// Z-order among siblings. Higher is drawn on top.
    pub z_index: i32,
    /// Interaction and visibility flags.
    pub flags: ShapeFlags,
    /// Minimum time in milliseconds between press and drag start. `None` or `Some(0)` means no delay.
    pub drag_dwell_ms: Option<u64>,
}

impl Default for LocalShape {
    fn default() -> Self {
        Self {
            geometry: Geometry::Empty,
            transform: Affine::IDENTITY,
            clip: None,
            z_index: 0,
            flags: ShapeFlags::default(),
            drag_dwell_ms: None,
        }
    }
}

impl LocalShape {
    /// A shape with the given geometry and default everything else.
    pub fn new(geometry: impl Into<Geometry>) -> Self {
        Self {
            geometry: geometry.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper to set flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ShapeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Builder-style helper to set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Builder-style helper to set a clip.
    #[must_use]
    pub fn with_clip(mut self, clip: impl Into<Geometry>) -> Self {
        self.clip = Some(clip.into());
        self
    }

    /// Builder-style helper to set the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Builder-style helper to set the drag dwell time.
    #[must_use]
    pub fn with_drag_dwell_ms(mut self, dwell_ms: u64) -> Self {
        self.drag_dwell_ms = Some(dwell_ms);
        self
    }
}
