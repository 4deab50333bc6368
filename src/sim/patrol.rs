//! Raider state machine: descend, pause at the bottom, relaunch
//!
//! A raider launches from above the visible area at a random X, falls with
//! a slight rightward drift, and on reaching the bottom edge waits a fixed
//! time before launching again. Contact with the rover is checked every
//! frame from the match loop, even while paused - a raider sitting at the
//! bottom can still be destroyed.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Body, BoundsPolicy};
use super::rect::Size;
use super::vector::Position;
use super::SetupError;
use crate::consts::{RAIDER_DRIFT_X, RAIDER_FALL_Y, RAIDER_MAX_SPEED, RAIDER_PAUSE};
use crate::stage::Stage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Raider {
    pub body: Body,
    /// Remaining pause at the bottom edge before relaunch (dt units)
    wait_time: f32,
}

impl Raider {
    pub fn new<S: Stage + ?Sized>(id: &str, stage: &mut S) -> Result<Self, SetupError> {
        Ok(Self {
            body: Body::new(id, stage, BoundsPolicy::MayExitBottom, false, RAIDER_MAX_SPEED)?,
            wait_time: 0.0,
        })
    }

    #[inline]
    pub fn wait_time(&self) -> f32 {
        self.wait_time
    }

    /// Launch from the top: uniform-random x in `[0, width)`, y at
    /// `-height` (fully above the visible area), velocity reset to the
    /// descent vector.
    pub fn launch(&mut self, playfield: Size, rng: &mut Pcg32) {
        let x = rng.random_range(0.0..playfield.width);
        self.body.spawn_at(Position::new(x, -self.body.size().height));
        self.body.stop();
        self.body.adjust_speed(RAIDER_DRIFT_X, RAIDER_FALL_Y);
        log::debug!("raider {} launched at x={x:.1}", self.body.id());
    }

    /// True once the body has reached the bottom of the playfield
    fn is_at_bottom(&self, playfield: Size) -> bool {
        self.body.pos().y() >= playfield.height
    }

    /// Per-frame behavior: fall, pause at the bottom, relaunch after the
    /// wait runs out. Runs even while touched; the respawn queue handles
    /// the visual side separately.
    pub fn update(&mut self, dt: f32, playfield: Size, rng: &mut Pcg32) {
        self.body.update(dt, playfield);

        if self.is_at_bottom(playfield) && !self.body.is_stopped() {
            self.body.stop();
            self.wait_time = RAIDER_PAUSE;
            log::debug!("raider {} paused at bottom", self.body.id());
        }

        // Freshly paused raiders start burning wait time this same frame
        if self.body.is_stopped() {
            self.wait_time -= dt;
            if self.wait_time <= 0.0 {
                self.wait_time = 0.0;
                self.launch(playfield, rng);
            }
        }
    }

    /// Respawn after destruction: re-measure and re-attach, then launch
    /// immediately (no bottom pause)
    pub(crate) fn respawn<S: Stage + ?Sized>(
        &mut self,
        stage: &mut S,
        playfield: Size,
        rng: &mut Pcg32,
    ) {
        self.body.respawn(stage);
        self.launch(playfield, rng);
    }
}
