//! Arena Swarm entry point
//!
//! Runs the simulation headlessly with a scripted input feed. A renderer
//! would sit on top of the same `tick`/`handle_event`/state API, drawing the
//! snapshot after each tick; here the progression is logged instead.

use std::time::{SystemTime, UNIX_EPOCH};

use arena_swarm::sim::{GameEvent, GamePhase, GameState, TickInput, handle_event, tick};

/// One minute of simulated time at the nominal tick rate
const DEMO_TICKS: u64 = 60 * arena_swarm::consts::TICKS_PER_SECOND as u64;

fn main() {
    env_logger::init();

    // Seed from the first CLI argument for a reproducible run, else from the
    // clock.
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    log::info!("Arena Swarm starting with seed {seed}");
    let mut state = GameState::new(seed);

    for i in 0..DEMO_TICKS {
        match state.phase {
            // The script always takes the first upgrade on offer
            GamePhase::LevelUp => handle_event(&mut state, GameEvent::SelectUpgrade(0)),
            GamePhase::GameOver => break,
            _ => {}
        }

        // Sweep movement through up/right/down/left every two seconds while
        // firing at whatever is closest
        let leg = (i / 120) % 4;
        let input = TickInput {
            up: leg == 0,
            right: leg == 1,
            down: leg == 2,
            left: leg == 3,
            fire: true,
        };
        tick(&mut state, &input);

        if state.time_ticks % 600 == 0 {
            log::info!(
                "tick {}: level {}, {} hp, {} xp ({} to next), {} enemies, {} coins",
                state.time_ticks,
                state.player.level,
                state.player.health,
                state.player.xp,
                state.xp_to_next_level(),
                state.enemies.len(),
                state.coins.len()
            );
        }
    }

    if state.is_game_over() {
        log::info!(
            "Game over after {} ticks: reached level {} with {} xp",
            state.time_ticks,
            state.player.level,
            state.player.xp
        );
    } else {
        log::info!(
            "Demo finished: level {}, {} hp, {} xp, {} enemies alive",
            state.player.level,
            state.player.health,
            state.player.xp,
            state.enemies.len()
        );
    }
}
