//! Collaborator traits for the world outside the simulation
//!
//! The sim never touches a screen: it asks a [`Stage`] for bounding sizes
//! and visual attach/detach, and pushes numbers at a [`Scoreboard`]. The
//! headless implementations here back the native driver and the tests.

use std::collections::HashMap;

use crate::sim::{Position, Size};

/// Rendering collaborator: supplies bounding boxes and owns visual proxies,
/// keyed by entity id. The playfield size is assumed static after startup.
pub trait Stage {
    /// Playfield bounding size
    fn playfield(&self) -> Size;

    /// Initial/current bounding size of the element backing `id`, if any
    fn measure(&self, id: &str) -> Option<Size>;

    /// Create and show a visual proxy for `id`
    fn attach(&mut self, id: &str);

    /// Remove the visual proxy for `id` (destroyed raider awaiting respawn)
    fn detach(&mut self, id: &str);

    /// Toggle visibility without attaching/detaching
    fn set_visible(&mut self, id: &str, visible: bool);

    /// Move the visual proxy for `id` to `pos`
    fn place(&mut self, id: &str, pos: Position);
}

/// Display collaborator: score each frame, time each countdown tick.
pub trait Scoreboard {
    fn show_score(&mut self, score: i64);

    /// `time` is preformatted as `"<minutes> : <SS>"`
    fn show_time(&mut self, time: &str);

    /// Final score, published once when the match stops
    fn show_final_score(&mut self, score: i64);
}

/// A stage with no screen behind it. Sizes are registered up front;
/// attach/detach and placement only update bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct HeadlessStage {
    playfield: Size,
    sizes: HashMap<String, Size>,
    attached: HashMap<String, bool>,
    placements: HashMap<String, Position>,
}

impl HeadlessStage {
    pub fn new(playfield: Size) -> Self {
        Self {
            playfield,
            ..Default::default()
        }
    }

    /// Register the bounding size the stage reports for `id`
    pub fn insert(&mut self, id: &str, size: Size) {
        self.sizes.insert(id.to_string(), size);
    }

    pub fn is_attached(&self, id: &str) -> bool {
        self.attached.get(id).copied().unwrap_or(false)
    }

    pub fn placement(&self, id: &str) -> Option<Position> {
        self.placements.get(id).copied()
    }
}

impl Stage for HeadlessStage {
    fn playfield(&self) -> Size {
        self.playfield
    }

    fn measure(&self, id: &str) -> Option<Size> {
        self.sizes.get(id).copied()
    }

    fn attach(&mut self, id: &str) {
        self.attached.insert(id.to_string(), true);
    }

    fn detach(&mut self, id: &str) {
        self.attached.insert(id.to_string(), false);
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        self.attached.insert(id.to_string(), visible);
    }

    fn place(&mut self, id: &str, pos: Position) {
        self.placements.insert(id.to_string(), pos);
    }
}

/// Scoreboard that forwards everything to the logger
#[derive(Debug, Default)]
pub struct LogScoreboard {
    pub last_score: i64,
    pub last_time: String,
}

impl Scoreboard for LogScoreboard {
    fn show_score(&mut self, score: i64) {
        self.last_score = score;
    }

    fn show_time(&mut self, time: &str) {
        self.last_time = time.to_string();
        log::debug!("time {time}");
    }

    fn show_final_score(&mut self, score: i64) {
        self.last_score = score;
        log::info!("final score: {score}");
    }
}
