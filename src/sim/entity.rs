//! Base entity mechanics shared by every moving body
//!
//! A `Body` is a positioned, sized, moving thing bounded to the playfield.
//! The behavioral state machines (raider descent, hunter pursuit) sit on
//! top of it in their own modules; the rover is a bare `Body`.

use serde::{Deserialize, Serialize};

use super::rect::{Rect, Size};
use super::vector::{Position, Velocity};
use super::SetupError;
use crate::consts::RESPAWN_DELAY_TICKS;
use crate::stage::Stage;

/// How the playfield bounds apply on the Y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsPolicy {
    /// Fully contained: y clamps to `[0, playfield.height - height]`
    Contained,
    /// Allowed past the bottom edge: y clamps to `[0, playfield.height]`
    MayExitBottom,
}

/// Clamp `val` into `[min, max]`, tolerating an inverted range (min wins)
#[inline]
fn limit(min: f32, val: f32, max: f32) -> f32 {
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// A simulated body: identity, position, velocity, size, hit bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    id: String,
    pos: Position,
    vel: Velocity,
    size: Size,
    policy: BoundsPolicy,
    /// Player feel: landing exactly on a wall kills that axis's momentum
    wall_stick: bool,
    touched: bool,
    ticks_until_respawn: u32,
}

impl Body {
    /// Measure the body's bounding size from the stage and attach its
    /// visual proxy. Fails if the stage has no element for `id` or the
    /// speed cap is invalid.
    pub fn new<S: Stage + ?Sized>(
        id: &str,
        stage: &mut S,
        policy: BoundsPolicy,
        wall_stick: bool,
        max_speed: f32,
    ) -> Result<Self, SetupError> {
        let size = stage
            .measure(id)
            .ok_or_else(|| SetupError::MissingCollaborator(id.to_string()))?;
        stage.attach(id);
        Ok(Self {
            id: id.to_string(),
            pos: Position::default(),
            vel: Velocity::new(max_speed)?,
            size,
            policy,
            wall_stick,
            touched: false,
            ticks_until_respawn: 0,
        })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn pos(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn velocity(&self) -> &Velocity {
        &self.vel
    }

    #[inline]
    pub fn touched(&self) -> bool {
        self.touched
    }

    #[inline]
    pub fn ticks_until_respawn(&self) -> u32 {
        self.ticks_until_respawn
    }

    /// The only write path for stored position: clamps into the playfield
    /// per the bounds policy, then applies the wall-stick rule. The wall
    /// test is exact equality against the computed bound, not a tolerance.
    pub fn set_position(&mut self, p: Position, playfield: Size) {
        let max_x = playfield.width - self.size.width;
        let max_y = match self.policy {
            BoundsPolicy::Contained => playfield.height - self.size.height,
            BoundsPolicy::MayExitBottom => playfield.height,
        };
        self.pos = Position::new(limit(0.0, p.x(), max_x), limit(0.0, p.y(), max_y));
        if self.wall_stick {
            if self.pos.x() == max_x || self.pos.x() == 0.0 {
                self.vel.zero_x();
            }
            if self.pos.y() == max_y || self.pos.y() == 0.0 {
                self.vel.zero_y();
            }
        }
    }

    /// Spawn placement bypassing the playfield clamp: launch points sit
    /// above the visible area, outside `set_position`'s range
    pub(crate) fn spawn_at(&mut self, p: Position) {
        self.pos = p;
    }

    /// Default positional update: advance by velocity over `dt` and route
    /// the result through `set_position`
    pub fn update(&mut self, dt: f32, playfield: Size) {
        let next = self.pos.advance(&self.vel, dt);
        self.set_position(next, playfield);
    }

    /// Hitbox at the current position
    pub fn hitbox(&self) -> Rect {
        self.hitbox_at(self.pos)
    }

    /// Hitbox at a hypothetical position, without mutating state
    pub fn hitbox_at(&self, pos: Position) -> Rect {
        Rect::new(pos, self.size)
    }

    pub fn adjust_speed(&mut self, dx: f32, dy: f32) {
        self.vel.adjust(dx, dy);
    }

    pub fn stop(&mut self) {
        self.vel.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.vel.is_stopped()
    }

    /// Flag the body as hit and arm its respawn counter. Idempotent:
    /// returns `false` if it was already touched. Scoring and pursuit
    /// side effects belong to the match state, not the body.
    pub(crate) fn mark_touched(&mut self) -> bool {
        if self.touched {
            return false;
        }
        self.touched = true;
        self.ticks_until_respawn = RESPAWN_DELAY_TICKS;
        true
    }

    pub(crate) fn tick_respawn(&mut self) {
        self.ticks_until_respawn = self.ticks_until_respawn.saturating_sub(1);
    }

    #[cfg(test)]
    pub(crate) fn set_respawn_ticks(&mut self, ticks: u32) {
        self.ticks_until_respawn = ticks;
    }

    /// Base respawn: re-measure the bounding size, re-attach the visual
    /// proxy and clear the touched flag. A stage that lost the element
    /// keeps the previous size.
    pub(crate) fn respawn<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        if let Some(size) = stage.measure(&self.id) {
            self.size = size;
        }
        stage.attach(&self.id);
        self.touched = false;
    }
}
