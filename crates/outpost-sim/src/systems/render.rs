//! Render sync: diffs live entities against what the renderer already shows.

use std::collections::BTreeSet;

use hecs::{Entity, World};

use outpost_core::components::{Bullet, RenderKey};
use outpost_core::services::Renderer;
use outpost_core::types::{EntityId, Health, Position, Tint, Transform, Velocity};

pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// Spawn newly live entities, despawn vanished ones, then push every
/// live entity's transform.
pub fn sync(world: &World, rendered: &mut BTreeSet<EntityId>, renderer: &mut dyn Renderer) {
    let mut live: Vec<(EntityId, RenderKey, Transform)> = world
        .query::<(
            &RenderKey,
            &Position,
            Option<&Velocity>,
            Option<&Health>,
            Option<&Bullet>,
        )>()
        .iter()
        .map(|(entity, (key, pos, vel, health, bullet))| {
            let tint = match (bullet, health) {
                (None, Some(h)) => Tint::from_health_fraction(h.fraction()),
                _ => Tint::WHITE,
            };
            let transform = Transform {
                position: *pos,
                rotation: vel.map_or(0.0, |v| v.heading()),
                tint,
            };
            (entity_id(entity), *key, transform)
        })
        .collect();
    live.sort_by_key(|(id, _, _)| *id);

    let live_ids: BTreeSet<EntityId> = live.iter().map(|(id, _, _)| *id).collect();
    for gone in rendered.difference(&live_ids) {
        renderer.despawn(*gone);
    }
    for (id, key, transform) in &live {
        if !rendered.contains(id) {
            renderer.spawn(*id, key.0, *transform);
        }
    }
    for (id, _, transform) in &live {
        renderer.update_transform(*id, transform.position, transform.rotation, transform.tint);
    }
    *rendered = live_ids;
}
