//! Game state snapshot — the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::components::Loadout;
use crate::enums::*;
use crate::events::{GameEvent, SoundEvent};
use crate::types::{EntityId, Position, SimTime, Velocity};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub wave: u32,
    pub score: u64,
    pub funds: u64,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub bonus: Option<BonusView>,
    pub events: Vec<GameEvent>,
    pub sounds: Vec<SoundEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: EntityId,
    pub position: Position,
    pub health: f32,
    pub max_health: f32,
    pub loadout: Loadout,
    pub distressed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub archetype: EnemyArchetype,
    pub position: Position,
    pub velocity: Velocity,
    pub health: f32,
    pub max_health: f32,
    pub lives: u32,
    /// False while still inside its spawn delay.
    pub spawned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub id: EntityId,
    pub archetype: BulletArchetype,
    pub position: Position,
    pub velocity: Velocity,
}

/// Bonus encounter HUD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusView {
    pub remaining_secs: f64,
    /// False once the player has been hit.
    pub regenerating: bool,
}

impl GameStateSnapshot {
    pub fn player_health_fraction(&self) -> f32 {
        match &self.player {
            Some(p) if p.max_health > 0.0 => (p.health / p.max_health).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}
