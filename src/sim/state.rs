//! Match state: entities, score, clock bookkeeping and lifecycle
//!
//! One explicit state struct owns every entity and all match-scoped
//! bookkeeping; there are no ambient globals. The per-frame advance lives
//! in [`tick`](super::tick).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Body, BoundsPolicy};
use super::patrol::Raider;
use super::pursuit::{Hunter, PursuitMode};
use super::rect::Size;
use super::vector::Position;
use super::SetupError;
use crate::consts::{KEY_SPEED_DELTA, MATCH_SECONDS, RAIDER_REWARD, ROVER_MAX_SPEED};
use crate::stage::{Scoreboard, Stage};

/// Entity ids a match is built from, matched against the stage's elements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub rover: String,
    pub hunter: String,
    pub raiders: Vec<String>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            rover: "rover".to_string(),
            hunter: "hunter".to_string(),
            raiders: (1..=4).map(|i| format!("raider-{i}")).collect(),
        }
    }
}

/// Complete match state. Entities are created once at setup; replays
/// reposition them through [`MatchState::reinit`] instead of recreating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Run flag, checked once per frame and once per countdown tick
    pub running: bool,
    /// Cumulative score; signed, the penalty rule carries no zero clamp
    pub score: i64,
    /// Timestamp of the previous frame (ms)
    pub(crate) t_frame_last: f32,
    /// Countdown seconds remaining
    pub countdown: u32,
    /// Indices of touched raiders awaiting respawn, in insertion order
    pub(crate) pending_respawn: Vec<usize>,
    /// Match seed for reproducible raider launches
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub playfield: Size,
    pub rover: Body,
    pub hunter: Hunter,
    pub raiders: Vec<Raider>,
}

impl MatchState {
    /// Build every entity from the stage. Fails if the stage is missing an
    /// element or a speed cap is invalid; all later conditions are
    /// non-erroring.
    pub fn new<S: Stage + ?Sized>(
        stage: &mut S,
        seed: u64,
        roster: &Roster,
    ) -> Result<Self, SetupError> {
        let playfield = stage.playfield();
        let rover = Body::new(
            &roster.rover,
            stage,
            BoundsPolicy::Contained,
            true,
            ROVER_MAX_SPEED,
        )?;
        let hunter = Hunter::new(&roster.hunter, stage)?;
        let raiders = roster
            .raiders
            .iter()
            .map(|id| Raider::new(id, stage))
            .collect::<Result<Vec<_>, _>>()?;

        let mut state = Self {
            running: false,
            score: 0,
            t_frame_last: 0.0,
            countdown: MATCH_SECONDS,
            pending_respawn: Vec::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            playfield,
            rover,
            hunter,
            raiders,
        };
        state.rover.set_position(Position::new(0.0, 0.0), playfield);
        state.hunter.check_pos(playfield);
        Ok(state)
    }

    /// (Re)launch the match: reposition the rover and hunter, show every
    /// visual, reset the clock, set the hunter dormant, raise the run flag
    /// and launch all raiders. Used for both first launch and replay.
    pub fn reinit<S: Stage + ?Sized, B: Scoreboard + ?Sized>(
        &mut self,
        stage: &mut S,
        board: &mut B,
    ) {
        stage.set_visible(self.rover.id(), true);
        stage.set_visible(self.hunter.body.id(), true);
        for raider in &self.raiders {
            stage.set_visible(raider.body.id(), true);
        }

        let playfield = self.playfield;
        self.rover.set_position(Position::new(0.0, 0.0), playfield);
        self.hunter.check_pos(playfield);
        self.hunter.disengage();
        self.t_frame_last = 0.0;
        self.countdown = MATCH_SECONDS;
        board.show_time(&self.format_time());
        self.running = true;
        self.start();
        log::info!("match started (seed {})", self.seed);
    }

    /// Launch every raider from the top
    pub fn start(&mut self) {
        let playfield = self.playfield;
        for raider in &mut self.raiders {
            raider.launch(playfield, &mut self.rng);
        }
    }

    /// Halt the match: lower the run flag, hide every entity, publish the
    /// final score, then zero the score.
    pub fn stop<S: Stage + ?Sized, B: Scoreboard + ?Sized>(
        &mut self,
        stage: &mut S,
        board: &mut B,
    ) {
        self.running = false;
        stage.set_visible(self.rover.id(), false);
        stage.set_visible(self.hunter.body.id(), false);
        for raider in &self.raiders {
            stage.set_visible(raider.body.id(), false);
        }
        board.show_final_score(self.score);
        log::info!("match over, final score {}", self.score);
        self.score = 0;
    }

    /// Edge-triggered key handling between frames. Arrows nudge the
    /// rover's velocity; `s` lowers the run flag; anything else drops.
    pub fn on_key(&mut self, key: &str) {
        match key {
            "ArrowLeft" => self.rover.adjust_speed(-KEY_SPEED_DELTA, 0.0),
            "ArrowUp" => self.rover.adjust_speed(0.0, -KEY_SPEED_DELTA),
            "ArrowRight" => self.rover.adjust_speed(KEY_SPEED_DELTA, 0.0),
            "ArrowDown" => self.rover.adjust_speed(0.0, KEY_SPEED_DELTA),
            "s" => self.running = false,
            _ => {}
        }
    }

    /// One-shot effect of the rover touching a raider: detach its visual,
    /// award the reward, queue it for respawn, and reset a pursuing hunter
    /// to dormant.
    pub(crate) fn mark_raider_touched<S: Stage + ?Sized>(&mut self, idx: usize, stage: &mut S) {
        if !self.raiders[idx].body.mark_touched() {
            return;
        }
        stage.detach(self.raiders[idx].body.id());
        self.score += RAIDER_REWARD;
        if self.running && self.hunter.mode() == PursuitMode::Pursuing {
            self.hunter.disengage();
        }
        self.pending_respawn.push(idx);
        log::debug!(
            "raider {} destroyed, score {}",
            self.raiders[idx].body.id(),
            self.score
        );
    }

    /// Remaining time as `"<minutes> : <SS>"`, seconds zero-padded
    pub fn format_time(&self) -> String {
        format!("{} : {:02}", self.countdown / 60, self.countdown % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{HeadlessStage, LogScoreboard};

    fn stage_for(roster: &Roster) -> HeadlessStage {
        let mut s = HeadlessStage::new(Size::new(800.0, 600.0));
        s.insert(&roster.rover, Size::new(32.0, 32.0));
        s.insert(&roster.hunter, Size::new(40.0, 40.0));
        for id in &roster.raiders {
            s.insert(id, Size::new(48.0, 24.0));
        }
        s
    }

    #[test]
    fn test_setup_fails_without_stage_elements() {
        let roster = Roster::default();
        let mut s = HeadlessStage::new(Size::new(800.0, 600.0));
        assert!(matches!(
            MatchState::new(&mut s, 1, &roster),
            Err(SetupError::MissingCollaborator(_))
        ));
    }

    #[test]
    fn test_new_places_start_corners() {
        let roster = Roster::default();
        let mut s = stage_for(&roster);
        let state = MatchState::new(&mut s, 1, &roster).unwrap();

        assert_eq!(state.rover.pos(), Position::new(0.0, 0.0));
        assert_eq!(state.hunter.body.pos(), Position::new(760.0, 0.0));
        assert!(!state.running);
        assert_eq!(state.countdown, 120);
    }

    #[test]
    fn test_key_mapping() {
        let roster = Roster::default();
        let mut s = stage_for(&roster);
        let mut state = MatchState::new(&mut s, 1, &roster).unwrap();
        state.running = true;

        // The start corner zeroed both axes via wall stick
        state.on_key("ArrowRight");
        state.on_key("ArrowRight");
        state.on_key("ArrowDown");
        assert_eq!(state.rover.velocity().x(), 20.0);
        assert_eq!(state.rover.velocity().y(), 10.0);

        state.on_key("ArrowLeft");
        state.on_key("ArrowUp");
        assert_eq!(state.rover.velocity().x(), 10.0);
        assert_eq!(state.rover.velocity().y(), 0.0);

        // Unknown keys are no-ops
        state.on_key("Enter");
        state.on_key("");
        assert_eq!(state.rover.velocity().x(), 10.0);

        state.on_key("s");
        assert!(!state.running);
    }

    #[test]
    fn test_format_time() {
        let roster = Roster::default();
        let mut s = stage_for(&roster);
        let mut state = MatchState::new(&mut s, 1, &roster).unwrap();

        assert_eq!(state.format_time(), "2 : 00");
        state.countdown = 61;
        assert_eq!(state.format_time(), "1 : 01");
        state.countdown = 59;
        assert_eq!(state.format_time(), "0 : 59");
        state.countdown = 0;
        assert_eq!(state.format_time(), "0 : 00");
    }

    #[test]
    fn test_mark_raider_touched_rewards_and_queues() {
        let roster = Roster::default();
        let mut s = stage_for(&roster);
        let mut state = MatchState::new(&mut s, 1, &roster).unwrap();
        state.running = true;
        state.hunter.engage();

        state.mark_raider_touched(2, &mut s);
        assert_eq!(state.score, 100);
        assert!(state.raiders[2].body.touched());
        assert_eq!(state.raiders[2].body.ticks_until_respawn(), 450);
        assert_eq!(state.pending_respawn, vec![2]);
        assert!(!s.is_attached("raider-3"));
        // Destroying a raider resets the antagonist
        assert_eq!(state.hunter.mode(), PursuitMode::Dormant);

        // Second touch is a no-op
        state.mark_raider_touched(2, &mut s);
        assert_eq!(state.score, 100);
        assert_eq!(state.pending_respawn, vec![2]);
    }

    #[test]
    fn test_touch_leaves_dormant_hunter_alone() {
        let roster = Roster::default();
        let mut s = stage_for(&roster);
        let mut state = MatchState::new(&mut s, 1, &roster).unwrap();
        state.running = true;

        state.mark_raider_touched(0, &mut s);
        assert_eq!(state.hunter.mode(), PursuitMode::Dormant);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_reinit_and_stop_lifecycle() {
        let roster = Roster::default();
        let mut s = stage_for(&roster);
        let mut board = LogScoreboard::default();
        let mut state = MatchState::new(&mut s, 9, &roster).unwrap();

        state.reinit(&mut s, &mut board);
        assert!(state.running);
        assert_eq!(state.countdown, 120);
        assert_eq!(board.last_time, "2 : 00");
        assert_eq!(state.hunter.mode(), PursuitMode::Dormant);
        // Raiders launched above the visible area
        for raider in &state.raiders {
            assert_eq!(raider.body.pos().y(), -24.0);
            assert!(!raider.body.is_stopped());
        }

        state.score = 300;
        state.stop(&mut s, &mut board);
        assert!(!state.running);
        assert_eq!(board.last_score, 300);
        assert_eq!(state.score, 0);
        assert!(!s.is_attached("rover"));
        assert!(!s.is_attached("hunter"));
        assert!(!s.is_attached("raider-1"));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let roster = Roster::default();
        let mut s = stage_for(&roster);
        let mut board = LogScoreboard::default();
        let mut state = MatchState::new(&mut s, 77, &roster).unwrap();
        state.reinit(&mut s, &mut board);

        let json = serde_json::to_string(&state).unwrap();
        let restored: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.score, state.score);
        assert_eq!(restored.rover.pos(), state.rover.pos());
        assert_eq!(restored.raiders.len(), state.raiders.len());
    }
}
