//! Hunter state machine: dormant or pursuing, with a penalty cooldown
//!
//! While pursuing, the hunter steers by feeding the raw position deltas
//! toward the rover straight into its velocity as adjustments. The deltas
//! are unnormalized; the per-axis velocity clamp is the only speed bound,
//! so the clamp value is effectively the pursuit top speed.

use serde::{Deserialize, Serialize};

use super::entity::{Body, BoundsPolicy};
use super::rect::Size;
use super::vector::Position;
use super::SetupError;
use crate::consts::{
    HUNTER_MAX_SPEED, PENALTY_BIG, PENALTY_BIG_THRESHOLD, PENALTY_COOLDOWN_TICKS, PENALTY_SMALL,
    PENALTY_THRESHOLD,
};
use crate::stage::Stage;

/// Whether the hunter is tracking the rover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PursuitMode {
    /// Fully inert: no movement, no collision checks
    Dormant,
    /// Tracking the rover's current position every frame
    Pursuing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hunter {
    pub body: Body,
    mode: PursuitMode,
    /// Frame ticks until the next penalty may apply (not dt-based)
    penalty_cooldown: u32,
    cooling: bool,
}

impl Hunter {
    pub fn new<S: Stage + ?Sized>(id: &str, stage: &mut S) -> Result<Self, SetupError> {
        Ok(Self {
            body: Body::new(id, stage, BoundsPolicy::Contained, false, HUNTER_MAX_SPEED)?,
            mode: PursuitMode::Dormant,
            penalty_cooldown: 0,
            cooling: false,
        })
    }

    #[inline]
    pub fn mode(&self) -> PursuitMode {
        self.mode
    }

    #[inline]
    pub fn is_cooling(&self) -> bool {
        self.cooling
    }

    #[inline]
    pub fn penalty_cooldown(&self) -> u32 {
        self.penalty_cooldown
    }

    pub fn engage(&mut self) {
        self.mode = PursuitMode::Pursuing;
    }

    /// Destroying a raider resets the antagonist
    pub fn disengage(&mut self) {
        if self.mode == PursuitMode::Pursuing {
            log::debug!("hunter disengaged");
        }
        self.mode = PursuitMode::Dormant;
    }

    /// Per-frame behavior. Dormant: inert. Pursuing: steer toward the
    /// rover, move, apply the penalty on contact, then burn one cooldown
    /// tick. The score is mutated in place; the literal thresholds carry
    /// no non-negative clamp.
    pub fn update(&mut self, dt: f32, playfield: Size, rover: &Body, score: &mut i64) {
        if self.mode == PursuitMode::Dormant {
            return;
        }

        let target = rover.pos();
        let dx = target.x() - self.body.pos().x();
        let dy = target.y() - self.body.pos().y();
        self.body.adjust_speed(dx, dy);
        self.body.update(dt, playfield);

        if rover.hitbox().intersects(&self.body.hitbox()) {
            self.assess_penalty(score);
        }

        if self.cooling {
            self.penalty_cooldown -= 1;
            if self.penalty_cooldown == 0 {
                self.cooling = false;
            }
        }
    }

    /// Contact penalty: only at score >= 49 and with the cooldown spent.
    /// Deducts 200 at score >= 199, else 50, then opens the 200-tick
    /// cooling window.
    fn assess_penalty(&mut self, score: &mut i64) {
        if *score >= PENALTY_THRESHOLD && self.penalty_cooldown == 0 {
            let deduction = if *score >= PENALTY_BIG_THRESHOLD {
                PENALTY_BIG
            } else {
                PENALTY_SMALL
            };
            *score -= deduction;
            self.cooling = true;
            self.penalty_cooldown = PENALTY_COOLDOWN_TICKS;
            log::debug!("hunter contact: -{deduction}, score now {score}");
        }
    }

    /// Reset to the start corner (top-right aligned) and full-stop
    pub fn check_pos(&mut self, playfield: Size) {
        let x = playfield.width - self.body.size().width;
        self.body.set_position(Position::new(x, 0.0), playfield);
        self.body.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::HeadlessStage;

    const PF: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    fn setup() -> (Hunter, Body) {
        let mut s = HeadlessStage::new(PF);
        s.insert("hunter", Size::new(40.0, 40.0));
        s.insert("rover", Size::new(32.0, 32.0));
        let hunter = Hunter::new("hunter", &mut s).unwrap();
        let mut rover = Body::new("rover", &mut s, BoundsPolicy::Contained, true, 502.0).unwrap();
        rover.stop();
        (hunter, rover)
    }

    #[test]
    fn test_dormant_is_fully_inert() {
        let (mut hunter, mut rover) = setup();
        hunter.check_pos(PF);
        rover.set_position(Position::new(300.0, 300.0), PF);
        let before = hunter.body.pos();

        let mut score = 500;
        for _ in 0..50 {
            hunter.update(16.0, PF, &rover, &mut score);
        }
        assert_eq!(hunter.body.pos(), before);
        assert_eq!(score, 500);
    }

    #[test]
    fn test_pursuing_closes_on_rover() {
        let (mut hunter, mut rover) = setup();
        hunter.check_pos(PF);
        rover.set_position(Position::new(100.0, 400.0), PF);
        hunter.engage();

        let start_gap = (hunter.body.pos().x() - rover.pos().x()).abs()
            + (hunter.body.pos().y() - rover.pos().y()).abs();
        let mut score = 0;
        for _ in 0..60 {
            hunter.update(16.0, PF, &rover, &mut score);
        }
        let end_gap = (hunter.body.pos().x() - rover.pos().x()).abs()
            + (hunter.body.pos().y() - rover.pos().y()).abs();
        assert!(end_gap < start_gap);
    }

    #[test]
    fn test_speed_is_bounded_by_axis_clamp() {
        let (mut hunter, mut rover) = setup();
        hunter.check_pos(PF);
        rover.set_position(Position::new(0.0, 560.0), PF);
        hunter.engage();

        let mut score = 0;
        hunter.update(16.0, PF, &rover, &mut score);
        // Raw deltas are huge, but the clamp caps each axis
        assert!(hunter.body.velocity().x().abs() <= HUNTER_MAX_SPEED);
        assert!(hunter.body.velocity().y().abs() <= HUNTER_MAX_SPEED);
    }

    fn contact(hunter: &mut Hunter, rover: &mut Body) {
        // Overlap both bodies so the frame registers a contact
        rover.set_position(Position::new(200.0, 200.0), PF);
        hunter.body.set_position(Position::new(200.0, 200.0), PF);
    }

    #[test]
    fn test_no_penalty_below_threshold() {
        let (mut hunter, mut rover) = setup();
        hunter.engage();
        contact(&mut hunter, &mut rover);

        let mut score = 48;
        hunter.update(16.0, PF, &rover, &mut score);
        assert_eq!(score, 48);
        assert!(!hunter.is_cooling());
    }

    #[test]
    fn test_penalty_at_threshold_goes_literal() {
        let (mut hunter, mut rover) = setup();
        hunter.engage();
        contact(&mut hunter, &mut rover);

        // 49 - 50 = -1: the thresholds are literal, no zero clamp
        let mut score = 49;
        hunter.update(16.0, PF, &rover, &mut score);
        assert_eq!(score, -1);
        assert!(hunter.is_cooling());
        // The contact frame already burned one cooldown tick
        assert_eq!(hunter.penalty_cooldown(), PENALTY_COOLDOWN_TICKS - 1);
    }

    #[test]
    fn test_big_penalty_at_upper_threshold() {
        let (mut hunter, mut rover) = setup();
        hunter.engage();
        contact(&mut hunter, &mut rover);

        let mut score = 199;
        hunter.update(16.0, PF, &rover, &mut score);
        assert_eq!(score, -1);

        let (mut hunter, mut rover) = setup();
        hunter.engage();
        contact(&mut hunter, &mut rover);
        let mut score = 198;
        hunter.update(16.0, PF, &rover, &mut score);
        assert_eq!(score, 148);
    }

    #[test]
    fn test_cooling_suppresses_second_contact() {
        let (mut hunter, mut rover) = setup();
        hunter.engage();
        contact(&mut hunter, &mut rover);

        let mut score = 300;
        hunter.update(16.0, PF, &rover, &mut score);
        assert_eq!(score, 100);

        // Stay in contact: no further deduction while cooling
        for _ in 0..(PENALTY_COOLDOWN_TICKS - 1) {
            contact(&mut hunter, &mut rover);
            hunter.update(16.0, PF, &rover, &mut score);
            assert_eq!(score, 100);
        }
        assert!(!hunter.is_cooling());

        // Cooldown spent: the next contact deducts again
        contact(&mut hunter, &mut rover);
        hunter.update(16.0, PF, &rover, &mut score);
        assert_eq!(score, 50);
    }

    #[test]
    fn test_check_pos_top_right_and_stopped() {
        let (mut hunter, _) = setup();
        hunter.check_pos(PF);
        assert_eq!(hunter.body.pos(), Position::new(800.0 - 40.0, 0.0));
        assert!(hunter.body.is_stopped());
    }
}
