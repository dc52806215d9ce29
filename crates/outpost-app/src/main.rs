//! Headless OUTPOST runner: plays the game on autopilot and logs the outcome.
//!
//! `OUTPOST_CONFIG` names an optional JSON config. `OUTPOST_RUN_SECS` bounds the
//! run (default 60). Set `RUST_LOG=debug` to follow the action.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use outpost_app::state::{load_config, AppState, GameLoopCommand, CONFIG_ENV};
use outpost_app::core::enums::GamePhase;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() {
    env_logger::init();

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = load_config(config_path.as_deref());
    let run_secs = std::env::var("OUTPOST_RUN_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60);

    let state = AppState::new();
    if let Err(err) = state.start(config) {
        log::error!("failed to start game loop: {err}");
        std::process::exit(1);
    }

    let deadline = Instant::now() + Duration::from_secs(run_secs);
    let mut started = false;
    while Instant::now() < deadline {
        std::thread::sleep(POLL_INTERVAL);
        let Some(snapshot) = state.snapshot() else {
            continue;
        };
        match snapshot.phase {
            GamePhase::SplashScreen if !started => {
                started = true;
                state.send(GameLoopCommand::PrimaryInput);
            }
            GamePhase::ReadyToStartWave => {
                state.send(GameLoopCommand::PrimaryInput);
            }
            GamePhase::GameOver => {
                log::info!(
                    "final score {} at wave {} ({} funds)",
                    snapshot.score,
                    snapshot.wave,
                    snapshot.funds
                );
                break;
            }
            _ => {}
        }
    }

    if let Some(snapshot) = state.snapshot() {
        log::info!(
            "stopped in {:?}: wave {}, score {}, health {:.0}%",
            snapshot.phase,
            snapshot.wave,
            snapshot.score,
            snapshot.player_health_fraction() * 100.0
        );
    }
    state.shutdown();
}
