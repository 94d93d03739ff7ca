//! Vector Shooter entry point
//!
//! Headless native runner: plays a seeded session with a simple autopilot
//! and prints the final summary as JSON.
//!
//! Usage: `vector-shooter [seed] [max_ticks] [tuning.json]`

use vector_shooter::Tuning;
use vector_shooter::audio::{AudioManager, NullAudio};
use vector_shooter::renderer::build_draw_list;
use vector_shooter::sim::{GameState, Heading, TickInput, tick};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let max_ticks: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(60 * 60 * 5);
    let tuning = args.get(2).map(|path| load_tuning(path)).unwrap_or_default();

    log::info!("Vector Shooter (native) starting, seed {}", seed);

    let mut state = GameState::with_tuning(tuning, seed);
    let mut audio = AudioManager::new(NullAudio);

    while !state.is_game_over() && state.time_ticks < max_ticks {
        // Sweep up and down the field, firing continuously
        let sweep = (state.time_ticks / 120) % 2;
        let input = TickInput {
            heading: if sweep == 0 { Heading::Up } else { Heading::Down },
            fire: true,
            focused: true,
        };
        tick(&mut state, &input);
        audio.handle_events(&state.events);
    }

    let frame = build_draw_list(&state);
    if frame.is_empty() {
        log::warn!("final frame has nothing to draw");
    }
    log::info!(
        "final frame: {} fill vertices, {} outline vertices",
        frame.fills.len(),
        frame.outlines.len()
    );

    log::info!("replay with seed {}", state.rng.seed());
    match serde_json::to_string_pretty(&state.summary()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("could not serialize summary: {}", e),
    }
}

/// Read a tuning file, falling back to defaults on any failure
fn load_tuning(path: &str) -> Tuning {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("unreadable tuning file {}: {}; using defaults", path, e);
            Tuning::default()
        }
    }
}
