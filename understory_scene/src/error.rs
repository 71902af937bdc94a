// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by structural scene operations.

use crate::types::ShapeId;

/// Errors from [`Scene`](crate::Scene) operations that change structure.
///
/// Plain setters on stale ids are silent no-ops; only operations whose result
/// would otherwise be ambiguous report an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The id does not refer to a live shape.
    #[error("shape {0:?} is not alive")]
    StaleShape(ShapeId),
    /// Reparenting would make a shape its own ancestor.
    #[error("cannot parent {shape:?} under {parent:?}: it is the shape itself or one of its descendants")]
    Cycle {
        /// Shape being moved.
        shape: ShapeId,
        /// Requested parent.
        parent: ShapeId,
    },
}
