// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing over a [`DisplayList`].
//!
//! ## Rules
//!
//! - The display list is walked front to back (reverse paint order); the first eligible hit wins.
//! - Silent shapes and the current drag target are never eligible.
//! - A shape is hit when its own geometry contains the point and no ancestor's clip excludes it.
//!   The ancestor walk stops at the first exclusion.
//!
//! These functions are pure. Hover transitions are applied by the
//! [`Engine`](crate::engine::Engine).
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_interaction::hit::{find_hover, probe_with_offsets};
//! use understory_interaction::config::GestureConfig;
//! # use understory_interaction::host::DisplayList;
//! # use kurbo::{Rect, Vec2};
//! # struct Rects(Vec<Rect>, Vec<usize>);
//! # impl DisplayList for Rects {
//! #     type Key = usize;
//! #     fn display_list(&self) -> &[usize] { &self.1 }
//! #     fn contains_point(&self, k: usize, pt: Point) -> bool { self.0[k].contains(pt) }
//! #     fn parent_of(&self, _: usize) -> Option<usize> { None }
//! #     fn clip_excludes(&self, _: usize, _: Point) -> bool { false }
//! #     fn is_silent(&self, _: usize) -> bool { false }
//! #     fn is_draggable(&self, _: usize) -> bool { false }
//! #     fn drag_dwell_ms(&self, _: usize) -> Option<u64> { None }
//! #     fn translate(&mut self, _: usize, _: Vec2) {}
//! # }
//! # let scene = Rects(vec![Rect::new(0.0, 0.0, 50.0, 50.0), Rect::new(20.0, 20.0, 40.0, 40.0)], vec![0, 1]);
//! // Shape 1 is painted above shape 0.
//! assert_eq!(find_hover(&scene, Point::new(30.0, 30.0), None), Some(1));
//! assert_eq!(find_hover(&scene, Point::new(30.0, 30.0), Some(1)), Some(0));
//!
//! // A touch just below shape 0 is pulled onto it by the last retry step.
//! let offsets = GestureConfig::default().touch_offsets;
//! let probe = probe_with_offsets(&scene, Point::new(45.0, 55.0), None, &offsets);
//! assert_eq!(probe.hit, Some(0));
//! assert_eq!(probe.point, Point::new(45.0, 45.0));
//! ```

use kurbo::Point;

use crate::config::TouchOffset;
use crate::host::DisplayList;

/// Whether some ancestor of `key` clips `pt` away.
pub fn clipped_by_ancestor<S: DisplayList + ?Sized>(scene: &S, key: S::Key, pt: Point) -> bool {
    let mut ancestor = scene.parent_of(key);
    while let Some(a) = ancestor {
        if scene.clip_excludes(a, pt) {
            return true;
        }
        ancestor = scene.parent_of(a);
    }
    false
}

/// Whether `key` is an eligible hit for `pt` while `drag` is being dragged.
pub fn is_hover<S: DisplayList + ?Sized>(
    scene: &S,
    key: S::Key,
    pt: Point,
    drag: Option<S::Key>,
) -> bool {
    if drag == Some(key) || scene.is_silent(key) {
        return false;
    }
    scene.contains_point(key, pt) && !clipped_by_ancestor(scene, key, pt)
}

/// Topmost eligible shape under `pt`.
pub fn find_hover<S: DisplayList + ?Sized>(
    scene: &S,
    pt: Point,
    drag: Option<S::Key>,
) -> Option<S::Key> {
    scene
        .display_list()
        .iter()
        .rev()
        .copied()
        .find(|&k| is_hover(scene, k, pt, drag))
}

/// Result of a retry search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Probe<K> {
    /// Shape found, if any.
    pub hit: Option<K>,
    /// Where it was found; the raw point when nothing was.
    pub point: Point,
}

/// Hit test `pt`, then retry at cumulative `offsets` until something is hit.
pub fn probe_with_offsets<S: DisplayList + ?Sized>(
    scene: &S,
    pt: Point,
    drag: Option<S::Key>,
    offsets: &[TouchOffset],
) -> Probe<S::Key> {
    let mut probe = pt;
    if let Some(hit) = find_hover(scene, probe, drag) {
        return Probe {
            hit: Some(hit),
            point: probe,
        };
    }
    for offset in offsets {
        probe += offset.to_vec2();
        if let Some(hit) = find_hover(scene, probe, drag) {
            return Probe {
                hit: Some(hit),
                point: probe,
            };
        }
    }
    Probe {
        hit: None,
        point: pt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{MockScene, MockShape};
    use alloc::vec;
    use kurbo::Rect;

    #[test]
    fn topmost_wins() {
        let mut scene = MockScene::new();
        scene.push(1, MockShape::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
        scene.push(2, MockShape::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(find_hover(&scene, Point::new(50.0, 50.0), None), Some(2));
    }

    #[test]
    fn silent_and_dragged_are_never_hit() {
        let mut scene = MockScene::new();
        scene.push(1, MockShape::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
        scene.push(2, MockShape::new(Rect::new(0.0, 0.0, 100.0, 100.0)).silent());
        scene.push(3, MockShape::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let pt = Point::new(10.0, 10.0);
        assert_eq!(find_hover(&scene, pt, None), Some(3));
        assert_eq!(find_hover(&scene, pt, Some(3)), Some(1));
        assert!(!is_hover(&scene, 2, pt, None));
        assert!(!is_hover(&scene, 3, pt, Some(3)));
    }

    #[test]
    fn any_clipping_ancestor_excludes() {
        let mut scene = MockScene::new();
        // Outer group clips to the left half, inner group does not clip.
        scene.push(
            1,
            MockShape::new(Rect::ZERO).with_clip(Rect::new(0.0, 0.0, 50.0, 100.0)),
        );
        scene.push(2, MockShape::new(Rect::ZERO).with_parent(1));
        scene.push(
            3,
            MockShape::new(Rect::new(0.0, 0.0, 100.0, 100.0)).with_parent(2),
        );
        assert_eq!(find_hover(&scene, Point::new(25.0, 50.0), None), Some(3));
        assert_eq!(find_hover(&scene, Point::new(75.0, 50.0), None), None);
        assert!(clipped_by_ancestor(&scene, 3, Point::new(75.0, 50.0)));
    }

    #[test]
    fn own_clip_does_not_restrict_shape() {
        let mut scene = MockScene::new();
        scene.push(
            1,
            MockShape::new(Rect::new(0.0, 0.0, 100.0, 100.0))
                .with_clip(Rect::new(0.0, 0.0, 10.0, 10.0)),
        );
        assert_eq!(find_hover(&scene, Point::new(50.0, 50.0), None), Some(1));
    }

    #[test]
    fn clipped_topmost_falls_through_to_shape_below() {
        let mut scene = MockScene::new();
        scene.push(1, MockShape::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
        scene.push(
            2,
            MockShape::new(Rect::ZERO).with_clip(Rect::new(0.0, 0.0, 10.0, 10.0)),
        );
        scene.push(
            3,
            MockShape::new(Rect::new(0.0, 0.0, 100.0, 100.0)).with_parent(2),
        );
        assert_eq!(find_hover(&scene, Point::new(5.0, 5.0), None), Some(3));
        assert_eq!(find_hover(&scene, Point::new(50.0, 50.0), None), Some(1));
    }

    #[test]
    fn offsets_accumulate() {
        let mut scene = MockScene::new();
        // Only reachable by the third step: (+10, 0) + (-20, 0) + (+10, +10) = (0, +10).
        scene.push(1, MockShape::new(Rect::new(-2.0, 8.0, 2.0, 12.0)));
        let offsets = crate::config::GestureConfig::default().touch_offsets;
        let probe = probe_with_offsets(&scene, Point::ZERO, None, &offsets);
        assert_eq!(probe.hit, Some(1));
        assert_eq!(probe.point, Point::new(0.0, 10.0));
    }

    #[test]
    fn first_offset_hit_corrects_point() {
        let mut scene = MockScene::new();
        scene.push(1, MockShape::new(Rect::new(105.0, 0.0, 200.0, 100.0)));
        let offsets = vec![TouchOffset::new(10.0, 0.0), TouchOffset::new(-20.0, 0.0)];
        let probe = probe_with_offsets(&scene, Point::new(100.0, 50.0), None, &offsets);
        assert_eq!(probe.hit, Some(1));
        assert_eq!(probe.point, Point::new(110.0, 50.0));
    }

    #[test]
    fn miss_restores_raw_point() {
        let scene = MockScene::new();
        let offsets = crate::config::GestureConfig::default().touch_offsets;
        let probe = probe_with_offsets(&scene, Point::new(3.0, 4.0), None, &offsets);
        assert_eq!(
            probe,
            Probe {
                hit: None,
                point: Point::new(3.0, 4.0)
            }
        );
    }
}
