// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory collaborators shared by unit tests.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::{Point, Rect, Vec2};

use crate::clock::ManualClock;
use crate::engine::Engine;
use crate::host::{DisplayList, InputSurface, Painter};
use crate::types::{Cursor, DeviceClass, EventKind, InputKind, PointerInput};

#[derive(Clone, Debug)]
pub(crate) struct MockShape {
    pub(crate) rect: Rect,
    pub(crate) parent: Option<u32>,
    pub(crate) clip: Option<Rect>,
    pub(crate) silent: bool,
    pub(crate) draggable: bool,
    pub(crate) dwell: Option<u64>,
}

impl MockShape {
    pub(crate) fn new(rect: Rect) -> Self {
        Self {
            rect,
            parent: None,
            clip: None,
            silent: false,
            draggable: false,
            dwell: None,
        }
    }

    pub(crate) fn with_parent(mut self, parent: u32) -> Self {
        self.parent = Some(parent);
        self
    }

    pub(crate) fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    pub(crate) fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub(crate) fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    pub(crate) fn with_dwell(mut self, ms: u64) -> Self {
        self.dwell = Some(ms);
        self
    }
}

/// Axis-aligned rectangles in scene space, painted in push order.
#[derive(Debug, Default)]
pub(crate) struct MockScene {
    shapes: BTreeMap<u32, MockShape>,
    order: Vec<u32>,
    pub(crate) dirty: Vec<u32>,
}

impl MockScene {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, id: u32, shape: MockShape) {
        self.shapes.insert(id, shape);
        self.order.push(id);
    }

    /// Drops the shape but leaves it in the paint order, like a scene between commits.
    pub(crate) fn remove(&mut self, id: u32) {
        self.shapes.remove(&id);
    }

    pub(crate) fn rect(&self, id: u32) -> Option<Rect> {
        self.shapes.get(&id).map(|s| s.rect)
    }
}

impl DisplayList for MockScene {
    type Key = u32;

    fn display_list(&self) -> &[u32] {
        &self.order
    }

    fn contains_point(&self, key: u32, pt: Point) -> bool {
        self.shapes.get(&key).is_some_and(|s| s.rect.contains(pt))
    }

    fn parent_of(&self, key: u32) -> Option<u32> {
        self.shapes.get(&key)?.parent
    }

    fn clip_excludes(&self, key: u32, pt: Point) -> bool {
        self.shapes
            .get(&key)
            .and_then(|s| s.clip)
            .is_some_and(|c| !c.contains(pt))
    }

    fn is_silent(&self, key: u32) -> bool {
        self.shapes.get(&key).is_none_or(|s| s.silent)
    }

    fn is_draggable(&self, key: u32) -> bool {
        self.shapes.get(&key).is_some_and(|s| s.draggable)
    }

    fn drag_dwell_ms(&self, key: u32) -> Option<u64> {
        self.shapes.get(&key)?.dwell
    }

    fn translate(&mut self, key: u32, delta: Vec2) {
        if let Some(s) = self.shapes.get_mut(&key) {
            s.rect = s.rect + delta;
        }
    }

    fn mark_dirty(&mut self, key: u32) {
        self.dirty.push(key);
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingPainter {
    pub(crate) refreshes: usize,
    pub(crate) hover_clears: usize,
}

impl Painter for RecordingPainter {
    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn clear_hover(&mut self) {
        self.hover_clears += 1;
    }
}

#[derive(Debug)]
pub(crate) struct RecordingSurface {
    pub(crate) class: DeviceClass,
    pub(crate) cursor: Rc<Cell<Cursor>>,
}

impl InputSurface for RecordingSurface {
    fn device_class(&self) -> DeviceClass {
        self.class
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor.set(cursor);
    }
}

pub(crate) type TestEngine<'c> = Engine<MockScene, RecordingPainter, &'c ManualClock>;

pub(crate) type Log = Rc<RefCell<Vec<(EventKind, Option<u32>)>>>;

/// Engine attached to a surface of `class`, plus the surface's cursor cell.
pub(crate) fn attached(
    scene: MockScene,
    clock: &ManualClock,
    class: DeviceClass,
) -> (TestEngine<'_>, Rc<Cell<Cursor>>) {
    let mut engine = Engine::new(scene, RecordingPainter::default(), clock);
    let cursor = Rc::new(Cell::new(Cursor::Default));
    engine
        .attach(Box::new(RecordingSurface {
            class,
            cursor: cursor.clone(),
        }))
        .unwrap();
    (engine, cursor)
}

/// Record `(kind, target)` for every event that reaches the engine bus.
pub(crate) fn record_engine_bus(engine: &mut TestEngine<'_>) -> Log {
    let log: Log = Rc::default();
    for kind in EventKind::ALL {
        let log = log.clone();
        engine.on(kind, move |p| log.borrow_mut().push((p.kind, p.target)));
    }
    log
}

/// Events of the listed kinds only.
pub(crate) fn only(log: &Log, kinds: &[EventKind]) -> Vec<(EventKind, Option<u32>)> {
    log.borrow()
        .iter()
        .copied()
        .filter(|(k, _)| kinds.contains(k))
        .collect()
}

pub(crate) fn input(kind: InputKind, x: f64, y: f64) -> PointerInput {
    PointerInput::new(kind, (x, y))
}
