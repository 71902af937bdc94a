// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape geometry and containment.

use kurbo::{BezPath, Circle, Ellipse, Point, Rect, RoundedRect, Shape};

/// Geometry of a shape or clip, in local coordinates.
///
/// Containment follows Kurbo's [`Shape::contains`]. Paths use the non-zero winding rule.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Geometry {
    /// No area. Useful for group shapes that only carry a transform or a clip.
    #[default]
    Empty,
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Rectangle with rounded corners.
    RoundedRect(RoundedRect),
    /// Circle.
    Circle(Circle),
    /// Ellipse.
    Ellipse(Ellipse),
    /// Arbitrary closed path.
    Path(BezPath),
}

impl Geometry {
    /// Returns true if `pt` lies inside the geometry.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Empty => false,
            Self::Rect(r) => r.contains(pt),
            Self::RoundedRect(r) => r.contains(pt),
            Self::Circle(c) => c.contains(pt),
            Self::Ellipse(e) => e.contains(pt),
            Self::Path(p) => p.contains(pt),
        }
    }

    /// Conservative local-space bounding box. [`Geometry::Empty`] reports [`Rect::ZERO`].
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Empty => Rect::ZERO,
            Self::Rect(r) => *r,
            Self::RoundedRect(r) => r.rect(),
            Self::Circle(c) => c.bounding_box(),
            Self::Ellipse(e) => e.bounding_box(),
            Self::Path(p) => p.bounding_box(),
        }
    }

    /// Returns true for [`Geometry::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Rect> for Geometry {
    fn from(r: Rect) -> Self {
        Self::Rect(r)
    }
}

impl From<RoundedRect> for Geometry {
    fn from(r: RoundedRect) -> Self {
        Self::RoundedRect(r)
    }
}

impl From<Circle> for Geometry {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Ellipse> for Geometry {
    fn from(e: Ellipse) -> Self {
        Self::Ellipse(e)
    }
}

impl From<BezPath> for Geometry {
    fn from(p: BezPath) -> Self {
        Self::Path(p)
    }
}
