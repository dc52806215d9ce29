//! Application state shared between the host's main thread and the game loop thread.

use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use outpost_core::commands::PlayerCommand;
use outpost_core::config::GameConfig;
use outpost_core::state::GameStateSnapshot;

use crate::game_loop::spawn_game_loop;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "OUTPOST_CONFIG";

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// A tap, forwarded as the engine's primary input.
    PrimaryInput,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared host state.
pub struct AppState {
    /// `None` until `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop. A second call while running is ignored.
    pub fn start(&self, config: GameConfig) -> std::io::Result<()> {
        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        if *running {
            log::debug!("game loop already running");
            return Ok(());
        }
        let tx = spawn_game_loop(config, Arc::clone(&self.latest_snapshot))?;
        *self.command_tx.lock().unwrap_or_else(|e| e.into_inner()) = Some(tx);
        *running = true;
        Ok(())
    }

    /// Forward a command. Returns false when the loop is not running.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        let guard = self.command_tx.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(tx) => tx.send(command).is_ok(),
            None => false,
        }
    }

    /// Clone of the most recent snapshot.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    /// Ask the loop to stop and forget the sender.
    pub fn shutdown(&self) {
        self.send(GameLoopCommand::Shutdown);
        *self.command_tx.lock().unwrap_or_else(|e| e.into_inner()) = None;
        *self.running.lock().unwrap_or_else(|e| e.into_inner()) = false;
    }
}

/// Read the config at `path`, falling back to defaults with a warning.
pub fn load_config(path: Option<&Path>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("cannot read {}: {err}; using default config", path.display());
            return GameConfig::default();
        }
    };
    match GameConfig::from_json(&text) {
        Ok(config) => {
            log::info!("loaded config from {}", path.display());
            config
        }
        Err(err) => {
            log::warn!("invalid config {}: {err}; using defaults", path.display());
            GameConfig::default()
        }
    }
}
