//! Cleanup system: removes depleted entities and clears the field between waves.

use hecs::{Entity, World};

use outpost_core::components::{Bullet, EnemyState};
use outpost_core::types::Health;

/// Despawn enemies and bullets whose health is gone. The collision resolver
/// removes most of these itself; this catches anything it skipped.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (state, health)) in world.query_mut::<(&EnemyState, &Health)>() {
        if health.is_depleted() && state.lives == 0 {
            despawn_buffer.push(entity);
        }
    }
    for (entity, (_bullet, health)) in world.query_mut::<(&Bullet, &Health)>() {
        if health.is_depleted() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Remove every enemy and bullet, leaving the player ship.
pub fn clear_wave(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query::<&EnemyState>().iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query::<&Bullet>().iter().map(|(e, _)| e));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
