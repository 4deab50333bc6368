//! Axis-aligned collision geometry
//!
//! Rectangles are built transiently from a position and a size for each
//! collision query; entities never store one. Both predicates are
//! boundary-inclusive: touching edges count.

use serde::{Deserialize, Serialize};

use super::vector::Position;

/// An immutable bounding size, captured from the stage collaborator
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// `true` iff `val` lies within `[min, max]`, bounds included
#[inline]
fn within(min: f32, val: f32, max: f32) -> bool {
    val >= min && val <= max
}

/// An axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    position: Position,
    size: Size,
}

impl Rect {
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x() + self.size.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y() + self.size.height
    }

    /// Overlap test: on each axis, one of `self`'s edges must fall inside
    /// `other`'s span; both axes must overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        let lateral = within(other.left(), self.left(), other.right())
            || within(other.left(), self.right(), other.right());
        let vertical = within(other.top(), self.top(), other.bottom())
            || within(other.top(), self.bottom(), other.bottom());
        lateral && vertical
    }

    /// Full containment: both of `other`'s edges inside `self`'s span on
    /// each axis. Not commutative.
    pub fn contains(&self, other: &Rect) -> bool {
        within(self.left(), other.left(), self.right())
            && within(self.left(), other.right(), self.right())
            && within(self.top(), other.top(), self.bottom())
            && within(self.top(), other.bottom(), self.bottom())
    }
}
