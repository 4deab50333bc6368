//! Kinematic value types: position and clamped velocity
//!
//! `Position` is an immutable value; every motion step produces a new one.
//! `Velocity` is the only mutable piece of the kinematic model and enforces
//! its per-axis speed cap on every change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::SetupError;

/// An immutable point in playfield space (pixels, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// New position translated by an offset
    pub fn shift(&self, dx: f32, dy: f32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// New position after moving at `velocity` for `duration_ms`
    pub fn advance(&self, velocity: &Velocity, duration_ms: f32) -> Position {
        let delta = velocity.displacement(duration_ms);
        self.shift(delta.x, delta.y)
    }
}

/// Velocity in pixels per second, clamped per axis to `±max`
///
/// Each axis is limited independently; the clamp is never jointly
/// normalized, so diagonal motion can reach `max * sqrt(2)` overall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    v: Vec2,
    max: f32,
}

impl Velocity {
    /// A fresh velocity is (1, 0): bodies drift slightly right until steered.
    pub fn new(max: f32) -> Result<Self, SetupError> {
        if max <= 0.0 {
            return Err(SetupError::Configuration(max));
        }
        Ok(Self {
            v: Vec2::new(1.0, 0.0),
            max,
        })
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.v.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.v.y
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Zero both axes
    pub fn stop(&mut self) {
        self.v = Vec2::ZERO;
    }

    pub fn is_stopped(&self) -> bool {
        self.v.x == 0.0 && self.v.y == 0.0
    }

    /// Accelerate (positive delta) or brake (negative delta), then clamp
    /// each axis to `±max`
    pub fn adjust(&mut self, dx: f32, dy: f32) {
        self.v.x = (self.v.x + dx).clamp(-self.max, self.max);
        self.v.y = (self.v.y + dy).clamp(-self.max, self.max);
    }

    /// Kill horizontal motion only (wall stick)
    pub fn zero_x(&mut self) {
        self.v.x = 0.0;
    }

    /// Kill vertical motion only (wall stick)
    pub fn zero_y(&mut self) {
        self.v.y = 0.0;
    }

    /// Displacement covered in `duration_ms` at this velocity
    pub fn displacement(&self, duration_ms: f32) -> Vec2 {
        self.v * duration_ms / 1000.0
    }
}
