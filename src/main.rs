//! Asteroids 2K entry point
//!
//! Runs a headless session: silent audio, no canvas, attract mode followed by
//! one autopiloted run. Useful as a soak test of the simulation.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use asteroids_2k::audio::NullAudio;
use asteroids_2k::game::NoPrompt;
use asteroids_2k::renderer::NullCanvas;
use asteroids_2k::{Game, InputSnapshot, Settings};

/// Ticks of attract mode before the autopilot presses restart
const ATTRACT_TICKS: u64 = 120;
/// Default run length when the settings give none
const DEFAULT_MAX_TICKS: u64 = 60 * 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Asteroids 2K (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));

    match run(&settings_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings_path: &std::path::Path) -> asteroids_2k::Result<()> {
    let settings = Settings::load(settings_path)?;
    let mut game = Game::setup(&settings, Box::new(NullAudio))?;
    let mut canvas = NullCanvas;
    let mut prompt = NoPrompt;

    let frame = Duration::from_secs_f64(1.0 / settings.fps as f64);
    let max_ticks = settings.max_ticks.unwrap_or(DEFAULT_MAX_TICKS);

    for t in 0..max_ticks {
        let started = Instant::now();
        let input = autopilot(t);
        game.step(&input, &mut canvas, &mut prompt);
        if !game.is_running() {
            break;
        }
        if let Some(rest) = frame.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    let state = game.state();
    log::info!(
        "Finished after {} ticks: level {}, score {}, lives {}",
        state.time_ticks,
        state.level,
        state.score,
        state.lives
    );
    Ok(())
}

/// Scripted input: restart once, then spin and shoot
fn autopilot(t: u64) -> InputSnapshot {
    InputSnapshot {
        restart: t == ATTRACT_TICKS,
        rotate_left: t % 40 < 10,
        fire: t % 8 == 0,
        thrust: t % 120 < 5,
        shield: t % 300 == 0,
        ..Default::default()
    }
}
