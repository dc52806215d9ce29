//! Enemy fire system: steps every enemy gun and spawns the aimed shots.

use hecs::World;

use outpost_ai::gunnery::{EnemyGun, GunShot};
use outpost_core::components::EnemyState;
use outpost_core::enums::{BulletDirection, SoundCue};
use outpost_core::services::RandomSource;
use outpost_core::types::Position;

use super::Feedback;
use crate::world_setup;

/// Returns the number of bullets fired.
pub fn run(
    world: &mut World,
    now: f64,
    target: Position,
    rng: &mut dyn RandomSource,
    feedback: &mut Feedback,
) -> usize {
    let mut shots: Vec<GunShot> = Vec::new();
    for (_entity, (state, pos, gun)) in
        world.query_mut::<(&EnemyState, &Position, &mut EnemyGun)>()
    {
        if let Some(shot) = gun.tick(now, state.spawn.spawned, *pos, target, rng) {
            shots.push(shot);
        }
    }

    for shot in &shots {
        world_setup::spawn_bullet(
            world,
            shot.bullet,
            shot.origin,
            shot.velocity,
            BulletDirection::Aimed,
        );
    }
    if !shots.is_empty() {
        feedback.sound_once(SoundCue::Laser);
    }
    shots.len()
}
