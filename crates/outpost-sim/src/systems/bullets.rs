//! Bullet motion: straight-line integration plus out-of-bounds removal.

use hecs::{Entity, World};

use outpost_core::components::Bullet;
use outpost_core::constants::BULLET_OOB_MARGIN;
use outpost_core::types::{Position, Rect, Velocity};

/// Move every bullet by `dt` seconds and despawn those that left `bounds`.
pub fn run(world: &mut World, dt: f32, bounds: Rect, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    let limit = bounds.expanded(BULLET_OOB_MARGIN);

    for (entity, (_bullet, pos, vel)) in
        world.query_mut::<(&Bullet, &mut Position, &Velocity)>()
    {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        if !limit.contains(*pos) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
