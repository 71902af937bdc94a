// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect, Vec2};

use crate::damage::Damage;
use crate::error::SceneError;
use crate::geometry::Geometry;
use crate::types::{LocalShape, ShapeFlags, ShapeId};
use crate::util::{has_area, transform_rect_bbox};

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena of shapes addressed by generational [`ShapeId`]s.
pub struct Scene {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    epoch: u64,
    next_seq: u64,
    // Back-to-front paint order, rebuilt by `commit`.
    order: Vec<ShapeId>,
    // World AABBs of shapes removed since the last commit.
    removed: Vec<Rect>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Scene")
            .field("shapes_total", &total)
            .field("shapes_alive", &alive)
            .field("free_list", &free)
            .field("epoch", &self.epoch)
            .field("display_list_len", &self.order.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    // Insertion sequence; breaks z-index ties between siblings.
    seq: u64,
    parent: Option<ShapeId>,
    children: Vec<ShapeId>,
    local: LocalShape,
    dirty: bool,
    // World AABB as of the last commit.
    committed_bounds: Rect,
}

impl Node {
    fn new(generation: u32, seq: u64, local: LocalShape) -> Self {
        Self {
            generation,
            seq,
            parent: None,
            children: Vec::new(),
            local,
            dirty: true,
            committed_bounds: Rect::ZERO,
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            epoch: 0,
            next_seq: 0,
            order: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Insert a new shape as a child of `parent` (or as a root if `None`).
    ///
    /// The shape joins the display list on the next [`Scene::commit`].
    pub fn insert(
        &mut self,
        parent: Option<ShapeId>,
        local: LocalShape,
    ) -> Result<ShapeId, SceneError> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(SceneError::StaleShape(p));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, seq, local));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, seq, local)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ShapeId uses 32-bit indices by design."
        )]
        let id = ShapeId::new(idx as u32, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        Ok(id)
    }

    /// Remove a shape (and its subtree) from the scene.
    ///
    /// Stale ids are ignored.
    pub fn remove(&mut self, id: ShapeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let Some(parent) = node.parent {
            self.unlink_parent(id, parent);
        }
        self.remove_subtree(id);
    }

    fn remove_subtree(&mut self, id: ShapeId) {
        let Some(node) = self.nodes[id.idx()].take() else {
            return;
        };
        if has_area(node.committed_bounds) {
            self.removed.push(node.committed_bounds);
        }
        self.free_list.push(id.idx());
        for child in node.children {
            self.remove_subtree(child);
        }
    }

    /// Reparent `id` under `new_parent` (or make it a root with `None`).
    ///
    /// Fails if either id is stale or if `new_parent` is `id` itself or one of its descendants.
    pub fn reparent(&mut self, id: ShapeId, new_parent: Option<ShapeId>) -> Result<(), SceneError> {
        if !self.is_alive(id) {
            return Err(SceneError::StaleShape(id));
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) {
                return Err(SceneError::StaleShape(p));
            }
            let mut cur = Some(p);
            while let Some(c) = cur {
                if c == id {
                    return Err(SceneError::Cycle {
                        shape: id,
                        parent: p,
                    });
                }
                cur = self.parent_of(c);
            }
        }
        if let Some(parent) = self.parent_of(id) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        self.mark_subtree_dirty(id);
        Ok(())
    }

    /// Replace the geometry of a shape.
    pub fn set_geometry(&mut self, id: ShapeId, geometry: Geometry) {
        if let Some(node) = self.node_mut(id) {
            node.local.geometry = geometry;
            node.dirty = true;
        }
    }

    /// Replace the local transform of a shape.
    pub fn set_transform(&mut self, id: ShapeId, transform: Affine) {
        if let Some(node) = self.node_mut(id) {
            node.local.transform = transform;
            self.mark_subtree_dirty(id);
        }
    }

    /// Move a shape by a scene-space delta.
    ///
    /// The delta is mapped into the parent's space first, so a shape under a scaled
    /// or rotated parent still follows the pointer.
    pub fn translate(&mut self, id: ShapeId, delta: Vec2) {
        let Some(node) = self.node(id) else {
            return;
        };
        let local_delta = match node.parent.and_then(|p| self.world_transform(p)) {
            Some(parent_tf) => {
                let inv = parent_tf.inverse();
                (inv * delta.to_point()) - (inv * Point::ZERO)
            }
            None => delta,
        };
        if let Some(node) = self.node_mut(id) {
            node.local.transform = Affine::translate(local_delta) * node.local.transform;
            self.mark_subtree_dirty(id);
        }
    }

    /// Replace the clip of a shape. The clip applies to its descendants.
    pub fn set_clip(&mut self, id: ShapeId, clip: Option<Geometry>) {
        if let Some(node) = self.node_mut(id) {
            node.local.clip = clip;
            self.mark_subtree_dirty(id);
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: ShapeId, z: i32) {
        if let Some(node) = self.node_mut(id) {
            node.local.z_index = z;
            node.dirty = true;
        }
    }

    /// Update flags.
    pub fn set_flags(&mut self, id: ShapeId, flags: ShapeFlags) {
        if let Some(node) = self.node_mut(id) {
            node.local.flags = flags;
            node.dirty = true;
        }
    }

    /// Update the drag dwell time.
    pub fn set_drag_dwell(&mut self, id: ShapeId, dwell_ms: Option<u64>) {
        if let Some(node) = self.node_mut(id) {
            node.local.drag_dwell_ms = dwell_ms;
        }
    }

    /// Flag a shape for repaint on the next commit without changing it.
    pub fn mark_dirty(&mut self, id: ShapeId) {
        if let Some(node) = self.node_mut(id) {
            node.dirty = true;
        }
    }

    /// Commit pending changes: rebuild the display list and return coarse damage.
    pub fn commit(&mut self) -> Damage {
        self.epoch = self.epoch.wrapping_add(1);
        let mut damage = Damage {
            dirty_rects: core::mem::take(&mut self.removed),
        };

        let dirty: Vec<ShapeId> = self
            .live_ids()
            .filter(|&id| self.node(id).is_some_and(|n| n.dirty))
            .collect();
        for id in dirty {
            let new_bounds = self.world_bounds(id).unwrap_or(Rect::ZERO);
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            let old_bounds = node.committed_bounds;
            node.committed_bounds = new_bounds;
            node.dirty = false;
            if old_bounds != new_bounds && has_area(old_bounds) {
                damage.dirty_rects.push(old_bounds);
            }
            if has_area(new_bounds) {
                damage.dirty_rects.push(new_bounds);
            }
        }

        self.rebuild_order();
        tracing::trace!(
            epoch = self.epoch,
            shapes = self.order.len(),
            damage = damage.dirty_rects.len(),
            "scene commit"
        );
        damage
    }

    /// Shapes in paint order, back to front, as of the last [`Scene::commit`].
    ///
    /// Hidden shapes and their subtrees are excluded. The list may contain ids that
    /// were removed after the last commit; queries on them report "no hit".
    pub fn display_list(&self) -> &[ShapeId] {
        &self.order
    }

    /// Whether `id` refers to a live shape.
    pub fn is_alive(&self, id: ShapeId) -> bool {
        self.node(id).is_some()
    }

    /// Parent of a shape, if any.
    pub fn parent_of(&self, id: ShapeId) -> Option<ShapeId> {
        self.node(id)?.parent
    }

    /// Children of a shape in insertion order.
    pub fn children_of(&self, id: ShapeId) -> &[ShapeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Local data of a shape.
    pub fn local(&self, id: ShapeId) -> Option<&LocalShape> {
        self.node(id).map(|n| &n.local)
    }

    /// Product of the local transforms from the root down to `id`.
    pub fn world_transform(&self, id: ShapeId) -> Option<Affine> {
        let mut node = self.node(id)?;
        let mut tf = node.local.transform;
        while let Some(p) = node.parent {
            node = self.node(p)?;
            tf = node.local.transform * tf;
        }
        Some(tf)
    }

    /// Conservative world-space AABB of a shape's own geometry.
    pub fn world_bounds(&self, id: ShapeId) -> Option<Rect> {
        let node = self.node(id)?;
        if node.local.geometry.is_empty() {
            return Some(Rect::ZERO);
        }
        let tf = self.world_transform(id)?;
        Some(transform_rect_bbox(tf, node.local.geometry.bounding_box()))
    }

    /// Whether the shape's own geometry contains a scene-space point.
    ///
    /// Stale ids contain nothing.
    pub fn contains_point(&self, id: ShapeId, pt: Point) -> bool {
        let (Some(node), Some(tf)) = (self.node(id), self.world_transform(id)) else {
            return false;
        };
        node.local.geometry.contains(tf.inverse() * pt)
    }

    /// Whether the shape declares a clip that leaves out a scene-space point.
    ///
    /// Shapes without a clip, and stale ids, exclude nothing.
    pub fn clip_excludes(&self, id: ShapeId, pt: Point) -> bool {
        let Some(clip) = self.node(id).and_then(|n| n.local.clip.as_ref()) else {
            return false;
        };
        let Some(tf) = self.world_transform(id) else {
            return false;
        };
        !clip.contains(tf.inverse() * pt)
    }

    // --- internals ---

    fn live_ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ShapeId uses 32-bit indices by design."
            )]
            let idx = i as u32;
            n.as_ref().map(|n| ShapeId::new(idx, n.generation))
        })
    }

    fn node(&self, id: ShapeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn node_mut(&mut self, id: ShapeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }

    fn mark_subtree_dirty(&mut self, id: ShapeId) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.dirty = true;
        let children = node.children.clone();
        for c in children {
            self.mark_subtree_dirty(c);
        }
    }

    fn link_parent(&mut self, id: ShapeId, parent: ShapeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: ShapeId, parent: ShapeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    fn sorted_by_paint_order(&self, mut ids: Vec<ShapeId>) -> Vec<ShapeId> {
        ids.sort_by_key(|&id| {
            self.node(id)
                .map(|n| (n.local.z_index, n.seq))
                .unwrap_or((i32::MIN, 0))
        });
        ids
    }

    fn rebuild_order(&mut self) {
        let roots: Vec<ShapeId> = self
            .live_ids()
            .filter(|&id| self.parent_of(id).is_none())
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        for root in self.sorted_by_paint_order(roots) {
            self.push_subtree(root, &mut order);
        }
        self.order = order;
    }

    fn push_subtree(&self, id: ShapeId, out: &mut Vec<ShapeId>) {
        let Some(node) = self.node(id) else {
            return;
        };
        if node.local.flags.contains(ShapeFlags::HIDDEN) {
            return;
        }
        // Parents paint behind their children.
        out.push(id);
        for child in self.sorted_by_paint_order(node.children.clone()) {
            self.push_subtree(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::f64::consts::FRAC_PI_2;
    use kurbo::Circle;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> LocalShape {
        LocalShape::new(Rect::new(x0, y0, x1, y1))
    }

    #[test]
    fn display_list_orders_by_z_then_insertion() {
        let mut scene = Scene::new();
        let a = scene.insert(None, rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = scene
            .insert(None, rect(0.0, 0.0, 10.0, 10.0).with_z_index(5))
            .unwrap();
        let c = scene.insert(None, rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let _ = scene.commit();
        assert_eq!(scene.display_list(), &[a, c, b]);
    }

    #[test]
    fn parents_paint_behind_children() {
        let mut scene = Scene::new();
        let group = scene.insert(None, LocalShape::default()).unwrap();
        let top = scene
            .insert(Some(group), rect(0.0, 0.0, 5.0, 5.0).with_z_index(1))
            .unwrap();
        let bottom = scene.insert(Some(group), rect(0.0, 0.0, 5.0, 5.0)).unwrap();
        let other = scene.insert(None, rect(0.0, 0.0, 5.0, 5.0)).unwrap();
        let _ = scene.commit();
        assert_eq!(scene.display_list(), &[group, bottom, top, other]);
    }

    #[test]
    fn hidden_subtree_is_left_out() {
        let mut scene = Scene::new();
        let group = scene
            .insert(None, LocalShape::default().with_flags(ShapeFlags::HIDDEN))
            .unwrap();
        let _child = scene.insert(Some(group), rect(0.0, 0.0, 5.0, 5.0)).unwrap();
        let visible = scene.insert(None, rect(0.0, 0.0, 5.0, 5.0)).unwrap();
        let _ = scene.commit();
        assert_eq!(scene.display_list(), &[visible]);
    }

    #[test]
    fn containment_follows_parent_transform() {
        let mut scene = Scene::new();
        let group = scene
            .insert(
                None,
                LocalShape::default().with_transform(Affine::translate((100.0, 0.0))),
            )
            .unwrap();
        let dot = scene
            .insert(Some(group), LocalShape::new(Circle::new((0.0, 0.0), 5.0)))
            .unwrap();
        assert!(scene.contains_point(dot, Point::new(101.0, 1.0)));
        assert!(!scene.contains_point(dot, Point::new(1.0, 1.0)));
        assert!(!scene.contains_point(group, Point::new(101.0, 1.0)));
    }

    #[test]
    fn translate_maps_delta_through_rotated_parent() {
        let mut scene = Scene::new();
        let group = scene
            .insert(
                None,
                LocalShape::default().with_transform(Affine::rotate(FRAC_PI_2)),
            )
            .unwrap();
        let leaf = scene.insert(Some(group), rect(-1.0, -1.0, 1.0, 1.0)).unwrap();
        scene.translate(leaf, Vec2::new(20.0, 0.0));
        // The leaf must follow the scene-space delta regardless of the parent's rotation.
        assert!(scene.contains_point(leaf, Point::new(20.0, 0.0)));
        assert!(!scene.contains_point(leaf, Point::new(0.0, 0.0)));
    }

    #[test]
    fn clip_excludes_outside_points_only() {
        let mut scene = Scene::new();
        let clipped = scene
            .insert(
                None,
                LocalShape::default().with_clip(Rect::new(0.0, 0.0, 50.0, 50.0)),
            )
            .unwrap();
        let plain = scene.insert(None, rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(!scene.clip_excludes(clipped, Point::new(10.0, 10.0)));
        assert!(scene.clip_excludes(clipped, Point::new(60.0, 10.0)));
        assert!(!scene.clip_excludes(plain, Point::new(60.0, 10.0)));
    }

    #[test]
    fn remove_frees_subtree_and_stales_ids() {
        let mut scene = Scene::new();
        let root = scene.insert(None, rect(0.0, 0.0, 100.0, 100.0)).unwrap();
        let child = scene.insert(Some(root), rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let grandchild = scene.insert(Some(child), rect(0.0, 0.0, 5.0, 5.0)).unwrap();
        let _ = scene.commit();

        scene.remove(child);
        assert!(scene.is_alive(root));
        assert!(!scene.is_alive(child));
        assert!(!scene.is_alive(grandchild));
        assert!(scene.children_of(root).is_empty());
        assert_eq!(scene.parent_of(grandchild), None);
        assert!(!scene.contains_point(child, Point::new(1.0, 1.0)));

        let damage = scene.commit();
        assert!(damage.dirty_rects.contains(&Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(scene.display_list(), &[root]);
    }

    #[test]
    fn slot_reuse_bumps_generation() {
        let mut scene = Scene::new();
        let a = scene.insert(None, rect(0.0, 0.0, 1.0, 1.0)).unwrap();
        scene.remove(a);
        let b = scene.insert(None, rect(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(a.idx(), b.idx());
        assert_ne!(a, b);
        assert!(!scene.is_alive(a));
        assert!(scene.is_alive(b));
    }

    #[test]
    fn insert_under_stale_parent_fails() {
        let mut scene = Scene::new();
        let a = scene.insert(None, LocalShape::default()).unwrap();
        scene.remove(a);
        assert_eq!(
            scene.insert(Some(a), LocalShape::default()),
            Err(SceneError::StaleShape(a))
        );
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut scene = Scene::new();
        let a = scene.insert(None, LocalShape::default()).unwrap();
        let b = scene.insert(Some(a), LocalShape::default()).unwrap();
        let c = scene.insert(Some(b), LocalShape::default()).unwrap();
        assert_eq!(
            scene.reparent(a, Some(c)),
            Err(SceneError::Cycle {
                shape: a,
                parent: c
            })
        );
        assert_eq!(
            scene.reparent(a, Some(a)),
            Err(SceneError::Cycle {
                shape: a,
                parent: a
            })
        );
        assert_eq!(scene.reparent(c, Some(a)), Ok(()));
        assert_eq!(scene.parent_of(c), Some(a));
        assert_eq!(scene.children_of(a), &[b, c]);
        assert!(scene.children_of(b).is_empty());
    }

    #[test]
    fn translate_reports_old_and_new_bounds() {
        let mut scene = Scene::new();
        let n = scene.insert(None, rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let _ = scene.commit();
        scene.translate(n, Vec2::new(50.0, 0.0));
        let damage = scene.commit();
        assert_eq!(
            damage.dirty_rects,
            vec![
                Rect::new(0.0, 0.0, 10.0, 10.0),
                Rect::new(50.0, 0.0, 60.0, 10.0)
            ]
        );
        assert_eq!(damage.union_rect(), Some(Rect::new(0.0, 0.0, 60.0, 10.0)));
        assert!(scene.commit().is_empty());
    }

    #[test]
    fn mark_dirty_repaints_in_place() {
        let mut scene = Scene::new();
        let n = scene.insert(None, rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let _ = scene.commit();
        scene.mark_dirty(n);
        let damage = scene.commit();
        assert_eq!(damage.dirty_rects, vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
    }
}
