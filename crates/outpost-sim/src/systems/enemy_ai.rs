//! Enemy AI system: spawn-delay activation and steering.

use hecs::World;

use outpost_ai::steering::SteeringController;
use outpost_core::components::EnemyState;
use outpost_core::types::{Position, Velocity};

/// Activate enemies whose spawn delay has elapsed. Returns how many woke up.
pub fn activate_spawns(world: &mut World, now: f64) -> u32 {
    let mut activated = 0;
    for (_entity, state) in world.query_mut::<&mut EnemyState>() {
        if state.spawn.activate(now) {
            activated += 1;
        }
    }
    activated
}

/// Step every active enemy's steering controller by `step` seconds.
/// Enemies that reach their waypoint retarget the player's position.
pub fn run_steering(world: &mut World, step: f32, player: Option<Position>) {
    for (_entity, (state, pos, vel, steering)) in world.query_mut::<(
        &EnemyState,
        &mut Position,
        &mut Velocity,
        &mut SteeringController,
    )>() {
        if !state.spawn.spawned {
            continue;
        }
        *pos = steering.update(*pos, step);
        *vel = steering.current_velocity();
        if steering.is_arrived() {
            if let Some(target) = player {
                steering.update_waypoint(target);
            }
        }
    }
}

/// Number of enemies still in the world, spawned or not.
pub fn remaining(world: &World) -> usize {
    world.query::<&EnemyState>().iter().count()
}
