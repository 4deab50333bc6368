//! The per-frame advance and the one-second countdown tick
//!
//! Two unsynchronized timers drive a match on the same cooperative thread:
//! the frame loop (caller-supplied monotonic timestamps, variable dt) and
//! an independent one-second countdown. The countdown may land between two
//! frames; the design tolerates that ordering interleave.

use super::state::MatchState;
use crate::stage::{Scoreboard, Stage};

/// Advance the match to the frame stamped `t_frame` (milliseconds).
///
/// Update order is fixed: rover, hunter, raiders. Collision checks against
/// the rover therefore see this frame's rover position, not last frame's.
pub fn frame<S, B>(state: &mut MatchState, stage: &mut S, board: &mut B, t_frame: f32)
where
    S: Stage + ?Sized,
    B: Scoreboard + ?Sized,
{
    if !state.running {
        return;
    }
    if state.countdown == 0 {
        state.stop(stage, board);
        return;
    }

    // Re-arm the hunter for as long as the score sits at zero - checked
    // every frame, not only on a zero-crossing
    if state.score == 0 {
        state.hunter.engage();
    }

    let dt = t_frame - state.t_frame_last;
    state.t_frame_last = t_frame;
    let playfield = state.playfield;

    state.rover.update(dt, playfield);
    state
        .hunter
        .update(dt, playfield, &state.rover, &mut state.score);

    for i in 0..state.raiders.len() {
        state.raiders[i].update(dt, playfield, &mut state.rng);
        if state
            .rover
            .hitbox()
            .intersects(&state.raiders[i].body.hitbox())
        {
            state.mark_raider_touched(i, stage);
        }
    }

    // Respawn sweep, in insertion order. Removal advances past the entry
    // that shifts into the vacated slot, so a second respawn completing in
    // the same frame waits for the next one (kept from the source).
    let mut k = 0;
    while k < state.pending_respawn.len() {
        let idx = state.pending_respawn[k];
        if state.raiders[idx].body.ticks_until_respawn() == 0 {
            state.raiders[idx].respawn(stage, playfield, &mut state.rng);
            state.pending_respawn.remove(k);
        } else {
            state.raiders[idx].body.tick_respawn();
        }
        k += 1;
    }

    board.show_score(state.score);

    // Expose placements to the rendering collaborator
    stage.place(state.rover.id(), state.rover.pos());
    stage.place(state.hunter.body.id(), state.hunter.body.pos());
    for raider in &state.raiders {
        stage.place(raider.body.id(), raider.body.pos());
    }
}

/// One tick of the independent one-second countdown: decrement unless
/// already at zero, then republish the time display. Never goes negative.
pub fn countdown_tick<B>(state: &mut MatchState, board: &mut B)
where
    B: Scoreboard + ?Sized,
{
    if !state.running {
        return;
    }
    if state.countdown != 0 {
        state.countdown -= 1;
        board.show_time(&state.format_time());
    }
}
