//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use outpost_core::components::*;
use outpost_core::enums::{Difficulty, GamePhase};
use outpost_core::events::{GameEvent, SoundEvent};
use outpost_core::state::*;
use outpost_core::types::{Health, Position, SimTime, Velocity};

use super::render::entity_id;
use crate::scoring::ScoreState;

/// Engine-level state that lives outside the world.
pub struct SnapshotContext<'a> {
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub wave: u32,
    pub score: &'a ScoreState,
    pub bonus: Option<BonusView>,
}

pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext<'_>,
    events: Vec<GameEvent>,
    sounds: Vec<SoundEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *ctx.time,
        phase: ctx.phase,
        difficulty: ctx.difficulty,
        wave: ctx.wave,
        score: ctx.score.score,
        funds: ctx.score.funds,
        player: build_player(world),
        enemies: build_enemies(world),
        bullets: build_bullets(world),
        bonus: ctx.bonus,
        events,
        sounds,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&PlayerShip, &Position, &Health)>()
        .iter()
        .next()
        .map(|(entity, (ship, pos, health))| PlayerView {
            id: entity_id(entity),
            position: *pos,
            health: health.current,
            max_health: health.max,
            loadout: ship.loadout,
            distressed: ship.distressed,
        })
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&EnemyState, &Position, &Velocity, &Health)>()
        .iter()
        .map(|(entity, (state, pos, vel, health))| EnemyView {
            id: entity_id(entity),
            archetype: state.archetype,
            position: *pos,
            velocity: *vel,
            health: health.current,
            max_health: health.max,
            lives: state.lives,
            spawned: state.spawn.spawned,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<BulletView> = world
        .query::<(&Bullet, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (bullet, pos, vel))| BulletView {
            id: entity_id(entity),
            archetype: bullet.archetype,
            position: *pos,
            velocity: *vel,
        })
        .collect();
    bullets.sort_by_key(|b| b.id);
    bullets
}
