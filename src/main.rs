//! Sky Chase native driver
//!
//! Runs a headless demo match: a scheduling loop feeds synthetic frame
//! timestamps to the sim, interleaves the one-second countdown, and replays
//! a small key script. Rendering is someone else's job; this binary stands
//! in for the external driver that would own a real animation loop.

use sky_chase::consts::MATCH_SECONDS;
use sky_chase::sim::{countdown_tick, frame, MatchState, Roster, Size};
use sky_chase::stage::{HeadlessStage, LogScoreboard};

/// Frame period of the synthetic animation loop (ms)
const FRAME_MS: f32 = 16.0;

fn build_stage(roster: &Roster) -> HeadlessStage {
    let mut stage = HeadlessStage::new(Size::new(800.0, 600.0));
    stage.insert(&roster.rover, Size::new(32.0, 32.0));
    stage.insert(&roster.hunter, Size::new(40.0, 40.0));
    for id in &roster.raiders {
        stage.insert(id, Size::new(48.0, 24.0));
    }
    stage
}

fn main() {
    env_logger::init();
    log::info!("Sky Chase (headless) starting...");

    let roster = Roster::default();
    let mut stage = build_stage(&roster);
    let mut board = LogScoreboard::default();

    let seed = 0xC0FFEE;
    let mut state =
        MatchState::new(&mut stage, seed, &roster).expect("stage is missing a roster element");
    state.reinit(&mut stage, &mut board);

    // Scripted input: drift right and down, then hold
    let script: &[(u32, &str)] = &[
        (10, "ArrowRight"),
        (20, "ArrowRight"),
        (30, "ArrowDown"),
        (200, "ArrowLeft"),
        (201, "ArrowUp"),
    ];

    let mut t = 0.0_f32;
    let mut since_countdown = 0.0_f32;
    let mut frames: u32 = 0;
    while state.running {
        t += FRAME_MS;
        frames += 1;

        for &(at, key) in script {
            if at == frames {
                state.on_key(key);
            }
        }

        frame(&mut state, &mut stage, &mut board, t);

        // The countdown runs on its own one-second cadence
        since_countdown += FRAME_MS;
        if since_countdown >= 1000.0 {
            since_countdown -= 1000.0;
            countdown_tick(&mut state, &mut board);
        }

        if frames % 600 == 0 {
            log::info!(
                "t={:.1}s score={} time=\"{}\" rover=({:.0}, {:.0})",
                t / 1000.0,
                state.score,
                state.format_time(),
                state.rover.pos().x(),
                state.rover.pos().y()
            );
        }

        // Safety valve: a match is at most MATCH_SECONDS of sim time plus
        // one frame for the stop to land
        if frames > (MATCH_SECONDS + 2) * 1000 / FRAME_MS as u32 * 2 {
            log::warn!("frame budget exhausted without a stop");
            break;
        }
    }

    log::info!("driver done after {frames} frames, score shown: {}", board.last_score);

    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => log::debug!("final snapshot:\n{json}"),
            Err(e) => log::warn!("snapshot serialization failed: {e}"),
        }
    }
}
