//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the game phase, processes
//! queued commands at the tick boundary, runs all systems in a fixed order and
//! produces `GameStateSnapshot`s. Collaborators are reached only through the
//! injected [`Services`], and only at the end of a tick.

use std::collections::{BTreeSet, VecDeque};

use glam::Vec2;
use hecs::{Entity, World};

use outpost_core::commands::PlayerCommand;
use outpost_core::components::PlayerShip;
use outpost_core::config::GameConfig;
use outpost_core::constants::{ENEMY_MOVE_INTERVAL, PLAYER_RETURN_SPEED, TRANSITION_STEP_INTERVAL};
use outpost_core::enums::{BonusEndReason, Difficulty, GamePhase, GovernorStream, SoundCue};
use outpost_core::events::GameEvent;
use outpost_core::services::Services;
use outpost_core::state::GameStateSnapshot;
use outpost_core::types::{EntityId, Playfield, SimTime};

use crate::governor::Governor;
use crate::scoring::ScoreState;
use crate::systems;
use crate::systems::bonus::BonusState;
use crate::systems::collision::{CollisionContext, ContactTracker};
use crate::systems::snapshot::SnapshotContext;
use crate::systems::Feedback;
use crate::wave_composer::WaveComposer;
use crate::weapons::{loadout_for_wave, PlayerWeaponScheduler};
use crate::world_setup;

/// A wave banner waiting for its delay to pass.
#[derive(Debug, Clone)]
struct PendingAnnouncement {
    text: String,
    at: f64,
}

/// The simulation engine. Owns the ECS world and all game state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    services: Services,
    playfield: Playfield,
    time: SimTime,
    phase: GamePhase,
    difficulty: Difficulty,
    wave: u32,
    composer: WaveComposer,
    governor: Governor,
    weapons: PlayerWeaponScheduler,
    bonus: Option<BonusState>,
    score: ScoreState,
    contacts: ContactTracker,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    feedback: Feedback,
    rendered: BTreeSet<EntityId>,
    announcements: Vec<PendingAnnouncement>,
    transition_started_at: f64,
}

impl SimulationEngine {
    /// Create an engine at the splash screen.
    pub fn new(config: GameConfig, services: Services) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid game config ({err}), using defaults");
                GameConfig::default()
            }
        };
        Self {
            world: World::new(),
            playfield: config.playfield(),
            time: SimTime::default(),
            phase: GamePhase::SplashScreen,
            difficulty: config.difficulty,
            wave: config.starting_wave,
            composer: WaveComposer::new(&config),
            governor: Governor::new(config.difficulty),
            weapons: PlayerWeaponScheduler::new(config.base_bullets_per_second),
            bonus: None,
            score: ScoreState::default(),
            contacts: ContactTracker::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            feedback: Feedback::default(),
            rendered: BTreeSet::new(),
            announcements: Vec::new(),
            transition_started_at: 0.0,
            services,
            config,
        }
    }

    /// Engine with null collaborators and the config's seed.
    pub fn headless(config: GameConfig) -> Self {
        let services = Services::headless(config.seed);
        Self::new(config, services)
    }

    /// Reset to the splash screen with a new screen size and difficulty.
    pub fn initialize(&mut self, playfield: Playfield, difficulty: Difficulty) {
        self.playfield = playfield;
        self.difficulty = difficulty;
        self.governor = Governor::new(difficulty);
        self.world.clear();
        self.command_queue.clear();
        self.announcements.clear();
        self.contacts.clear();
        self.bonus = None;
        self.score = ScoreState::default();
        self.wave = self.config.starting_wave;
        self.composer.reset();
        self.set_phase(GamePhase::SplashScreen);
        log::info!(
            "initialized {}x{} playfield at {:?}",
            playfield.width,
            playfield.height,
            difficulty
        );
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Tap. Applied at the next tick boundary.
    pub fn on_primary_input(&mut self) {
        self.queue_command(PlayerCommand::PrimaryInput);
    }

    /// Advance the simulation to host time `now` and return the resulting snapshot.
    pub fn on_tick(&mut self, now: f64) -> GameStateSnapshot {
        self.time.advance(now);
        self.process_commands();
        let drag = self.services.input.drag_delta();

        match self.phase {
            GamePhase::GameRunning => self.run_wave(drag),
            GamePhase::WaveComplete => self.begin_transition(),
            GamePhase::Transitioning => self.run_transition(),
            GamePhase::SplashScreen | GamePhase::ReadyToStartWave | GamePhase::GameOver => {}
        }

        self.dispatch()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    pub fn current_score(&self) -> u64 {
        self.score.score
    }

    pub fn current_funds(&self) -> u64 {
        self.score.funds
    }

    pub fn current_wave(&self) -> u32 {
        self.wave
    }

    pub fn current_player_health_fraction(&self) -> f32 {
        systems::player::player_health(&self.world).map_or(0.0, |h| h.fraction())
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tests that stage contacts directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn bonus(&self) -> Option<BonusState> {
        self.bonus
    }

    #[cfg(test)]
    pub fn set_player_health(&mut self, current: f32) {
        for (_entity, (_ship, health)) in self
            .world
            .query_mut::<(&PlayerShip, &mut outpost_core::types::Health)>()
        {
            health.current = current;
        }
    }

    /// Remove every enemy and bullet, as if the wave had been cleared.
    #[cfg(test)]
    pub fn clear_enemies(&mut self) {
        systems::cleanup::clear_wave(&mut self.world, &mut self.despawn_buffer);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::PrimaryInput => match self.phase {
                GamePhase::SplashScreen | GamePhase::GameOver => self.new_game(),
                GamePhase::ReadyToStartWave => {
                    self.wave += 1;
                    self.start_wave();
                }
                other => log::debug!("primary input ignored during {other:?}"),
            },
            PlayerCommand::SetDifficulty { difficulty } => {
                self.difficulty = difficulty;
                self.governor.set_difficulty(difficulty);
                log::info!("difficulty set to {difficulty:?}");
            }
        }
    }

    fn set_phase(&mut self, to: GamePhase) {
        if self.phase == to {
            return;
        }
        let from = self.phase;
        self.phase = to;
        log::info!("phase {from:?} -> {to:?}");
        self.feedback.event(GameEvent::PhaseChanged { from, to });
    }

    /// Full reset: fresh world, score and composer, then the starting wave.
    fn new_game(&mut self) {
        self.world.clear();
        self.score = ScoreState::default();
        self.composer.reset();
        self.bonus = None;
        self.wave = self.config.starting_wave;
        world_setup::spawn_player(
            &mut self.world,
            &self.playfield,
            self.config.player_max_health,
            loadout_for_wave(self.wave),
        );
        log::info!("new game at wave {} ({:?})", self.wave, self.difficulty);
        self.start_wave();
    }

    /// Compose the current wave, place its enemies and upgrade the ship.
    fn start_wave(&mut self) {
        let now = self.time.now;
        let composed = self.composer.compose(&mut self.wave, self.difficulty);

        self.announcements.clear();
        for squad in &composed.squads {
            world_setup::spawn_squad(
                &mut self.world,
                squad,
                &self.playfield,
                self.difficulty,
                now,
                self.services.random.as_mut(),
            );
            if let Some(text) = &squad.title {
                self.announcements.push(PendingAnnouncement {
                    text: text.clone(),
                    at: now + squad.title_delay,
                });
            }
        }

        self.weapons.arm(composed.wave);
        let loadout = self.weapons.loadout();
        for (_entity, ship) in self.world.query_mut::<&mut PlayerShip>() {
            ship.loadout = loadout;
        }

        let max_health =
            systems::player::player_health(&self.world).map_or(self.config.player_max_health, |h| h.max);
        self.bonus = composed
            .bonus_secs
            .map(|secs| BonusState::new(secs, max_health, self.config.bonus_regen_fraction));

        self.governor.reset();
        self.contacts.clear();

        let enemies = composed.enemy_count();
        log::info!(
            "wave {} composed: {} squads, {} enemies{}",
            composed.wave,
            composed.squads.len(),
            enemies,
            if composed.is_bonus() { " (bonus)" } else { "" }
        );
        self.feedback.event(GameEvent::WaveStarted {
            wave: composed.wave,
            bonus: composed.is_bonus(),
            enemies,
        });
        self.set_phase(GamePhase::GameRunning);
    }

    /// Per-tick systems while a wave is in progress.
    fn run_wave(&mut self, drag: Vec2) {
        let now = self.time.now;
        let dt = self.time.dt;

        // 1. Player movement
        systems::player::run_movement(&mut self.world, drag, self.playfield.playable());

        // 2. Bonus countdown / regeneration
        let bonus_expired = match self.bonus.as_mut() {
            Some(bonus) => systems::bonus::run(
                bonus,
                &mut self.world,
                dt,
                self.config.distress_fraction,
                &mut self.feedback,
            ),
            None => false,
        };

        // 3. Spawn-delay activation
        systems::enemy_ai::activate_spawns(&mut self.world, now);

        // 4. Enemy steering
        let player_pos = systems::player::find_player(&self.world).map(|(_, pos)| pos);
        if self.governor.should_fire(GovernorStream::EnemyMovement, now) {
            systems::enemy_ai::run_steering(&mut self.world, ENEMY_MOVE_INTERVAL as f32, player_pos);
        }

        // 5. Player fire
        let requests = self.weapons.tick(now);
        systems::player::fire(&mut self.world, &requests, &mut self.feedback);

        // 6. Enemy fire
        if self.governor.should_fire(GovernorStream::EnemyBullets, now) {
            if let Some(target) = player_pos {
                systems::enemy_fire::run(
                    &mut self.world,
                    now,
                    target,
                    self.services.random.as_mut(),
                    &mut self.feedback,
                );
            }
        }

        // 7. Bullet motion + out-of-bounds removal
        systems::bullets::run(
            &mut self.world,
            dt as f32,
            self.playfield.screen(),
            &mut self.despawn_buffer,
        );

        // 8. Collision resolution
        let report = {
            let mut ctx = CollisionContext {
                now,
                playfield: &self.playfield,
                distress_fraction: self.config.distress_fraction,
                rng: self.services.random.as_mut(),
                score: &mut self.score,
                feedback: &mut self.feedback,
            };
            systems::collision::run(&mut self.world, &mut self.contacts, &mut ctx)
        };
        if report.player_hits > 0 {
            if let Some(bonus) = self.bonus.as_mut() {
                bonus.end_regen(BonusEndReason::PlayerHit, &mut self.feedback);
            }
        }

        // 9. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 10. Phase checks
        let player_alive = systems::player::player_health(&self.world)
            .map_or(false, |h| !h.is_depleted());
        if !player_alive {
            self.game_over();
            return;
        }
        if bonus_expired || systems::enemy_ai::remaining(&self.world) == 0 {
            log::info!("wave {} complete", self.wave);
            self.set_phase(GamePhase::WaveComplete);
        }

        // 11. Due announcements
        self.fire_announcements(now);
    }

    fn fire_announcements(&mut self, now: f64) {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.announcements)
            .into_iter()
            .partition(|a| now >= a.at);
        self.announcements = pending;
        for announcement in due {
            log::info!("announcement: {}", announcement.text);
            self.feedback.event(GameEvent::Announcement {
                text: announcement.text,
            });
        }
    }

    fn game_over(&mut self) {
        log::info!(
            "game over at wave {} with score {}",
            self.wave,
            self.score.score
        );
        self.bonus = None;
        self.announcements.clear();
        self.feedback.sound(SoundCue::GameOver);
        self.feedback.event(GameEvent::GameOver {
            score: self.score.score,
            wave: self.wave,
        });
        self.set_phase(GamePhase::GameOver);
    }

    /// The tick after a wave ends: clear the field and start the return trip.
    fn begin_transition(&mut self) {
        systems::cleanup::clear_wave(&mut self.world, &mut self.despawn_buffer);
        self.contacts.clear();
        self.bonus = None;
        self.announcements.clear();
        self.feedback.sound(SoundCue::LevelComplete);
        self.transition_started_at = self.time.now;
        self.governor.reset_stream(GovernorStream::ScreenTransition);
        self.set_phase(GamePhase::Transitioning);
    }

    fn run_transition(&mut self) {
        let now = self.time.now;
        let start = self.playfield.start_point();
        if self.governor.should_fire(GovernorStream::ScreenTransition, now) {
            let step = PLAYER_RETURN_SPEED * TRANSITION_STEP_INTERVAL as f32;
            systems::player::step_toward_start(&mut self.world, start, step);
        }
        let waited = now - self.transition_started_at >= self.config.min_transition_secs;
        if waited && systems::player::at_start(&self.world, start) {
            self.set_phase(GamePhase::ReadyToStartWave);
        }
    }

    /// Hand the tick's feedback to the collaborators and build the snapshot.
    fn dispatch(&mut self) -> GameStateSnapshot {
        let (events, sounds) = self.feedback.take();
        for sound in &sounds {
            self.services.audio.play(sound.cue, sound.volume);
        }
        systems::render::sync(
            &self.world,
            &mut self.rendered,
            self.services.renderer.as_mut(),
        );

        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotContext {
                time: &self.time,
                phase: self.phase,
                difficulty: self.difficulty,
                wave: self.wave,
                score: &self.score,
                bonus: self.bonus.filter(|b| b.regenerating).map(|b| b.view()),
            },
            events,
            sounds,
        )
    }
}
