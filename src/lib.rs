//! Sky Chase - a frame-driven arcade dodge/pursuit simulation
//!
//! A player-controlled rover dodges or intercepts descending raiders while a
//! hunter tracks it, under a 120-second clock and a scoring rule.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, state machines,
//!   the per-frame loop)
//! - `stage`: Collaborator traits for rendering and score/time display, plus
//!   headless implementations for tests and the native driver
//!
//! Rendering, asset loading and event wiring live outside this crate; the
//! core only consumes entity/playfield bounding sizes, raw frame timestamps
//! and raw key identifiers, and exposes positions, sizes, score and time.

pub mod sim;
pub mod stage;

pub use sim::{MatchState, Roster, SetupError};
pub use stage::{HeadlessStage, Scoreboard, Stage};

/// Game configuration constants
pub mod consts {
    /// Per-axis speed cap for the player-controlled rover (px/s)
    pub const ROVER_MAX_SPEED: f32 = 502.0;
    /// Per-axis speed cap for the hunter - this clamp is the only bound on
    /// its raw-delta steering, so it doubles as the pursuit top speed
    pub const HUNTER_MAX_SPEED: f32 = 100.0;
    /// Per-axis speed cap for raiders, sized so the descent vector fits
    pub const RAIDER_MAX_SPEED: f32 = 203.0;

    /// Raider descent vector (px/s): slight rightward drift, fast fall
    pub const RAIDER_DRIFT_X: f32 = 3.0;
    pub const RAIDER_FALL_Y: f32 = 203.0;
    /// Wait at the bottom edge before relaunching (same unit as frame dt)
    pub const RAIDER_PAUSE: f32 = 60.0;

    /// Score reward per raider destroyed
    pub const RAIDER_REWARD: i64 = 100;
    /// Frames a destroyed raider stays down before respawning
    pub const RESPAWN_DELAY_TICKS: u32 = 450;

    /// Minimum score for a hunter contact to cost anything
    pub const PENALTY_THRESHOLD: i64 = 49;
    /// At or above this score the big deduction applies
    pub const PENALTY_BIG_THRESHOLD: i64 = 199;
    pub const PENALTY_SMALL: i64 = 50;
    pub const PENALTY_BIG: i64 = 200;
    /// Frames between hunter penalties (tick-based, not dt-based)
    pub const PENALTY_COOLDOWN_TICKS: u32 = 200;

    /// Match length in seconds
    pub const MATCH_SECONDS: u32 = 120;
    /// Velocity change per arrow-key event (px/s)
    pub const KEY_SPEED_DELTA: f32 = 10.0;
}
