//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable delta-time integration driven by caller-supplied timestamps
//! - Seeded RNG only (raider launch positions)
//! - Fixed entity update order (rover, hunter, raiders)
//! - No rendering or platform dependencies beyond the collaborator traits

pub mod entity;
pub mod patrol;
pub mod pursuit;
pub mod rect;
pub mod state;
pub mod tick;
pub mod vector;

pub use entity::{Body, BoundsPolicy};
pub use patrol::Raider;
pub use pursuit::{Hunter, PursuitMode};
pub use rect::{Rect, Size};
pub use state::{MatchState, Roster};
pub use tick::{countdown_tick, frame};
pub use vector::{Position, Velocity};

use thiserror::Error;

/// Fatal setup-time conditions. Everything past construction is
/// non-erroring: positions clamp, unknown keys drop, counters saturate.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A velocity was configured with a non-positive speed cap
    #[error("maximum speed must be positive (got {0})")]
    Configuration(f32),
    /// The rendering collaborator has no bounding size for an entity id
    #[error("no stage element found for entity {0:?}")]
    MissingCollaborator(String),
}
