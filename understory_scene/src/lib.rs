// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Scene: a Kurbo-native arena of shapes for retained-mode 2D scenes.
//!
//! Understory Scene holds the structure that pointer interaction needs to reason about:
//!
//! - A hierarchy of shapes with local transforms, clips, z-order, and flags.
//! - Exact containment tests against each shape's own geometry.
//! - An ordered display list (back to front) rebuilt by a [`Scene::commit`] step that also yields coarse damage regions.
//!
//! ## Where this fits
//!
//! The scene is the structural half of an interaction stack.
//! The `understory_interaction` crate walks [`Scene::display_list`] front to back to find the
//! shape under the pointer and follows [`Scene::parent_of`] to bubble events.
//! Its `scene_adapter` feature implements its display-list trait for [`Scene`].
//!
//! ## Not a renderer
//!
//! This crate does not paint anything.
//! The display list is the order a painter would use; [`Damage`] tells it where to repaint.
//!
//! ## API overview
//!
//! - [`Scene`]: container managing shapes, ancestry, and the display list.
//! - [`LocalShape`]: per-shape local data (geometry, transform, optional clip, z, flags, drag dwell).
//! - [`Geometry`]: rectangles, rounded rectangles, circles, ellipses, and paths.
//! - [`ShapeFlags`]: silent/draggable/hidden controls.
//! - [`ShapeId`]: generational handle of a shape.
//! - [`SceneError`]: failures of structural edits.
//!
//! Key operations:
//! - [`Scene::insert`] → [`ShapeId`]
//! - [`Scene::translate`] / [`Scene::set_transform`] / [`Scene::set_clip`]
//! - [`Scene::commit`] → [`Damage`]; rebuilds the display list.
//! - [`Scene::contains_point`] and [`Scene::clip_excludes`].
//!
//! ## Clips
//!
//! A clip on a shape restricts where its descendants can be hit, not the shape itself.
//! Containment is always exact against the shape's own geometry; world AABBs are only
//! used for damage and are conservative under rotation and shear.
//!
//! # Example
//!
//! ```rust
//! use understory_scene::{LocalShape, Scene, ShapeFlags};
//! use kurbo::{Circle, Point, Rect, Vec2};
//!
//! let mut scene = Scene::new();
//!
//! let backdrop = scene
//!     .insert(None, LocalShape::new(Rect::new(0.0, 0.0, 200.0, 200.0)))
//!     .unwrap();
//! let handle = scene
//!     .insert(
//!         Some(backdrop),
//!         LocalShape::new(Circle::new((50.0, 50.0), 10.0)).with_flags(ShapeFlags::DRAGGABLE),
//!     )
//!     .unwrap();
//!
//! let _ = scene.commit();
//! assert_eq!(scene.display_list(), &[backdrop, handle]);
//!
//! // Move the handle and compute damage.
//! scene.translate(handle, Vec2::new(20.0, 0.0));
//! let damage = scene.commit();
//! assert!(damage.union_rect().is_some());
//!
//! assert!(scene.contains_point(handle, Point::new(70.0, 50.0)));
//! assert!(!scene.contains_point(handle, Point::new(50.0, 50.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod damage;
mod error;
mod geometry;
mod scene;
mod types;
mod util;

pub use damage::Damage;
pub use error::SceneError;
pub use geometry::Geometry;
pub use scene::Scene;
pub use types::{LocalShape, ShapeFlags, ShapeId};
