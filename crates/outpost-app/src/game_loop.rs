//! Game loop thread — runs the simulation engine at the tick rate and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands arrive via `mpsc` channel. Snapshots are stored in shared
//! state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use outpost_core::config::GameConfig;
use outpost_core::constants::TICK_RATE;
use outpost_core::state::GameStateSnapshot;
use outpost_sim::SimulationEngine;

use crate::host::host_services;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the host to use.
pub fn spawn_game_loop(
    config: GameConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("outpost-game-loop".into())
        .spawn(move || {
            let services = host_services(config.seed);
            let engine = SimulationEngine::new(config, services);
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// Apply every pending command. Returns false when the loop should stop.
pub fn drain_commands(
    engine: &mut SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::PrimaryInput) => engine.on_primary_input(),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let started = Instant::now();
    let mut next_tick_time = started;
    log::info!("game loop started at {TICK_RATE} Hz");

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            log::info!("game loop stopping");
            return;
        }

        // 2. Advance to the current host time
        let snapshot = engine.on_tick(started.elapsed().as_secs_f64());

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outpost_core::commands::PlayerCommand;
    use outpost_core::enums::{Difficulty, GamePhase};

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PrimaryInput).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::SetDifficulty {
            difficulty: Difficulty::Easy,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], GameLoopCommand::PrimaryInput));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::SetDifficulty { .. })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_drain_applies_commands_in_order() {
        let mut engine = SimulationEngine::headless(GameConfig::default());
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::SetDifficulty {
            difficulty: Difficulty::Extreme,
        }))
        .unwrap();
        tx.send(GameLoopCommand::PrimaryInput).unwrap();

        assert!(drain_commands(&mut engine, &rx));
        let snap = engine.on_tick(0.0);
        assert_eq!(snap.phase, GamePhase::GameRunning);
        assert_eq!(snap.difficulty, Difficulty::Extreme);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&mut engine, &rx));
        drop(tx);
        assert!(!drain_commands(&mut engine, &rx));
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::headless(GameConfig::default());
        engine.on_primary_input();

        for i in 0..120 {
            engine.on_tick(i as f64 / 60.0);
        }

        let snapshot = engine.on_tick(2.0);
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_game_loop_publishes_snapshots() {
        let latest = Arc::new(Mutex::new(None));
        let tx = spawn_game_loop(GameConfig::default(), Arc::clone(&latest)).unwrap();
        tx.send(GameLoopCommand::PrimaryInput).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        let mut phase = None;
        while Instant::now() < deadline {
            phase = latest.lock().unwrap().as_ref().map(|s| s.phase);
            if phase == Some(GamePhase::GameRunning) {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert_eq!(phase, Some(GamePhase::GameRunning));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
