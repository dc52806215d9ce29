//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first tap.
    #[default]
    SplashScreen,
    /// A wave is in progress.
    GameRunning,
    /// The wave has just ended; entities are cleared on the next tick.
    WaveComplete,
    /// Player ship returning to the start point between waves.
    Transitioning,
    /// Waiting for input to launch the next wave.
    ReadyToStartWave,
    /// Player ship destroyed. Re-enterable: input starts a new game.
    GameOver,
}

/// Global difficulty. The multiplier stretches (> 1) or compresses (< 1)
/// enemy timing intervals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Extreme,
}

/// Collision category. Decides which response runs on contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    PlayerShip,
    EnemyShip,
    PlayerBullet,
    EnemyBullet,
}

/// Size class. Only scales effects (explosions, flashes), never gameplay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Tiny,
    Small,
    Medium,
    #[default]
    Normal,
    Large,
    VeryLarge,
    Huge,
}

/// Enemy archetype tag. Behaviour comes from the capability profile, not subtyping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyArchetype {
    Scout,
    Fighter,
    Swarmer,
    AdvancedSwarmer,
    AdvancedFighter,
    AdvancedBomber,
}

/// Enemy gun family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GunType {
    #[default]
    None,
    RailGun,
    StaticGun,
}

/// Enemy gun state machine phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GunPhase {
    /// Not yet spawned, or no gun fitted.
    #[default]
    Idle,
    /// Waiting for the next fresh burst.
    ArmedWaiting,
    /// Between shots of a burst.
    Firing,
}

/// Player cannon tier mounted at a hardpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CannonType {
    #[default]
    None,
    RailGun,
    ParticleLaser,
    ProtonLaser,
}

/// Player ship hardpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mount {
    Center,
    LeftWing,
    RightWing,
    Tail,
}

/// Bullet archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletArchetype {
    PlayerRailGun,
    PlayerParticleLaser,
    PlayerProtonLaser,
    EnemyRailGun,
    EnemyStatic,
}

/// Travel direction tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletDirection {
    Up,
    Down,
    /// Aimed along a vector toward a target.
    Aimed,
}

/// Independent governor streams. Player fire keeps its own gate inside the
/// weapon scheduler, since its interval changes with the loadout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GovernorStream {
    EnemyMovement,
    EnemyBullets,
    ScreenTransition,
}

/// What the renderer should draw for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderArchetype {
    PlayerShip,
    Enemy(EnemyArchetype),
    Bullet(BulletArchetype),
}

/// Named audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Laser,
    Explode,
    LevelComplete,
    GameOver,
}

/// Why a bonus encounter stopped regenerating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusEndReason {
    TimerExpired,
    PlayerHit,
}

impl Difficulty {
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.25,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.8,
            Difficulty::Extreme => 0.5,
        }
    }
}

impl SizeClass {
    /// Effect scale factor.
    pub fn scale(self) -> f32 {
        match self {
            SizeClass::Tiny => 0.1,
            SizeClass::Small => 0.25,
            SizeClass::Medium => 0.5,
            SizeClass::Normal => 1.0,
            SizeClass::Large => 1.5,
            SizeClass::VeryLarge => 2.0,
            SizeClass::Huge => 3.0,
        }
    }
}

impl CannonType {
    /// Bullet fired by this cannon, if any.
    pub fn bullet(self) -> Option<BulletArchetype> {
        match self {
            CannonType::None => None,
            CannonType::RailGun => Some(BulletArchetype::PlayerRailGun),
            CannonType::ParticleLaser => Some(BulletArchetype::PlayerParticleLaser),
            CannonType::ProtonLaser => Some(BulletArchetype::PlayerProtonLaser),
        }
    }
}

impl BulletArchetype {
    pub fn kind(self) -> EntityKind {
        match self {
            BulletArchetype::PlayerRailGun
            | BulletArchetype::PlayerParticleLaser
            | BulletArchetype::PlayerProtonLaser => EntityKind::PlayerBullet,
            BulletArchetype::EnemyRailGun | BulletArchetype::EnemyStatic => {
                EntityKind::EnemyBullet
            }
        }
    }
}

impl SoundCue {
    /// Asset name passed to the audio collaborator.
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Laser => "laser",
            SoundCue::Explode => "explode",
            SoundCue::LevelComplete => "levelComplete",
            SoundCue::GameOver => "gameOver",
        }
    }
}
