//! Simulation constants and tuning parameters.

/// Host frame rate (Hz) used by the headless game loop.
pub const TICK_RATE: u32 = 60;

/// Largest frame delta the simulation will integrate in one step (seconds).
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Playfield ---

/// Default screen size (portrait phone, points).
pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 768.0;
pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 1024.0;

/// Height of the HUD bar subtracted from the top of the playable area.
pub const HUD_HEIGHT: f32 = 90.0;

/// Border on each side of the playable area.
pub const PLAYFIELD_MARGIN: f32 = 20.0;

/// Bullets this far outside the playable area are removed.
pub const BULLET_OOB_MARGIN: f32 = 50.0;

// --- Governors ---

/// Enemy movement cadence before difficulty scaling (30 moves per second).
pub const ENEMY_MOVE_INTERVAL: f64 = 1.0 / 30.0;

/// Enemy gun evaluation cadence (60 checks per second).
pub const ENEMY_FIRE_CHECK_INTERVAL: f64 = 1.0 / 60.0;

/// Screen transition cadence while the player ship returns to start.
pub const TRANSITION_STEP_INTERVAL: f64 = 1.0 / 30.0;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Damage the player ship deals to whatever it rams.
pub const PLAYER_COLLISION_DAMAGE: i32 = 5;

/// Circle proxy radius (64x64 sprite).
pub const PLAYER_RADIUS: f32 = 32.0;

/// Start point height above the bottom edge.
pub const PLAYER_START_Y: f32 = 100.0;

/// Health fraction below which the ship vents plasma.
pub const PLAYER_DISTRESS_FRACTION: f32 = 0.3;

/// Return speed toward the start point between waves (px/s).
pub const PLAYER_RETURN_SPEED: f32 = 400.0;

/// Distance at which the returning ship snaps onto the start point.
pub const START_POINT_EPSILON: f32 = 2.0;

// --- Player weapons ---

pub const PLAYER_BASE_BULLETS_PER_SECOND: f64 = 4.0;

/// Waves at which the player gains one extra bullet per second.
pub const PLAYER_FIRE_RATE_THRESHOLDS: [u32; 4] = [3, 6, 9, 12];

pub const PLAYER_FIRE_RATE_STEP: f64 = 1.0;

pub const PLAYER_BULLET_SPEED: f32 = 700.0;

/// Mount offsets relative to the ship center.
pub const CENTER_MOUNT_OFFSET_Y: f32 = 32.0;
pub const WING_MOUNT_OFFSET_X: f32 = 20.0;
pub const WING_MOUNT_OFFSET_Y: f32 = 8.0;
pub const TAIL_MOUNT_OFFSET_Y: f32 = -28.0;

// --- Bullets ---

pub const BULLET_RADIUS: f32 = 5.0;

pub const ENEMY_BULLET_SPEED: f32 = 300.0;

pub const STATIC_BULLET_SPEED: f32 = 120.0;

pub const STATIC_BULLET_HEALTH: f32 = 5.0;

pub const STATIC_BULLET_DAMAGE: i32 = 25;

// --- Enemies ---

/// Spawn and respawn height above the playable area.
pub const ENEMY_SPAWN_HEIGHT: f32 = 100.0;

// --- Steering ---

/// Distance at which a waypoint counts as reached.
pub const WAYPOINT_EPSILON: f32 = 5.0;

/// Radius inside which seek slows down (arrival behaviour).
pub const ARRIVAL_RADIUS: f32 = 60.0;

// --- Waves ---

pub const DEFAULT_STARTING_WAVE: u32 = 1;

/// Every Nth wave is a bonus wave.
pub const BONUS_WAVE_INTERVAL: u32 = 10;

/// Survive timer for bonus waves (seconds).
pub const BONUS_TIME_SECS: f64 = 30.0;

/// Fraction of max health regenerated over a full bonus timer.
pub const BONUS_REGEN_FRACTION: f32 = 0.5;

pub const BONUS_SWARMER_BASE: u32 = 8;
pub const BONUS_SWARMER_PER_BONUS: u32 = 4;
pub const BONUS_SWARMER_MAX: u32 = 24;

/// Effectively unlimited respawns for bonus-wave swarmers.
pub const BONUS_ENEMY_LIVES: u32 = 9999;

/// Spawn jitter for bonus-wave swarmers (seconds).
pub const BONUS_SPAWN_JITTER: f64 = 3.0;

/// Minimum seconds spent in the transition phase.
pub const MIN_TRANSITION_SECS: f64 = 2.0;

// --- Effects ---

/// Screen flash durations keyed by damage 1..=4, plus the default.
pub const SCREEN_FLASH_SECS: [f64; 4] = [0.05, 0.10, 0.15, 0.20];
pub const SCREEN_FLASH_DEFAULT_SECS: f64 = 0.25;

pub const LASER_VOLUME: f32 = 0.4;
pub const EXPLODE_VOLUME: f32 = 0.8;
pub const CUE_VOLUME: f32 = 1.0;
