//! Player ship systems: drag movement, weapon fire, and the return to the
//! start point between waves.

use glam::Vec2;
use hecs::{Entity, World};

use outpost_core::components::PlayerShip;
use outpost_core::constants::{PLAYER_BULLET_SPEED, START_POINT_EPSILON};
use outpost_core::enums::{BulletDirection, SoundCue};
use outpost_core::types::{Health, Position, Rect, Velocity};

use super::Feedback;
use crate::weapons::FireRequest;
use crate::world_setup;

/// The player entity and its position, if one exists.
pub fn find_player(world: &World) -> Option<(Entity, Position)> {
    world
        .query::<(&PlayerShip, &Position)>()
        .iter()
        .next()
        .map(|(entity, (_, pos))| (entity, *pos))
}

/// The player's health pool.
pub fn player_health(world: &World) -> Option<Health> {
    world
        .query::<(&PlayerShip, &Health)>()
        .iter()
        .next()
        .map(|(_, (_, health))| *health)
}

/// Recompute the distress flag from current health.
/// Returns true when the ship has just entered distress.
pub fn update_distress(ship: &mut PlayerShip, health: &Health, distress_fraction: f32) -> bool {
    let distressed = health.fraction() < distress_fraction;
    let started = distressed && !ship.distressed;
    ship.distressed = distressed;
    started
}

/// Apply the drag delta, keeping the ship inside the playable area.
pub fn run_movement(world: &mut World, delta: Vec2, bounds: Rect) {
    for (_entity, (_ship, pos)) in world.query_mut::<(&PlayerShip, &mut Position)>() {
        let moved = Position::from(pos.to_vec2() + delta);
        *pos = bounds.clamp(moved);
    }
}

/// Spawn one bullet per fire request from the player's current position.
pub fn fire(world: &mut World, requests: &[FireRequest], feedback: &mut Feedback) {
    if requests.is_empty() {
        return;
    }
    let Some((_, origin)) = find_player(world) else {
        return;
    };

    for request in requests {
        let velocity = match request.direction {
            BulletDirection::Down => Velocity::new(0.0, -PLAYER_BULLET_SPEED),
            _ => Velocity::new(0.0, PLAYER_BULLET_SPEED),
        };
        world_setup::spawn_bullet(
            world,
            request.bullet,
            Position::from(origin.to_vec2() + request.offset),
            velocity,
            request.direction,
        );
    }
    feedback.sound_once(SoundCue::Laser);
}

/// Move the ship up to `max_step` toward `start`, snapping when close.
/// Returns true once the ship sits on the start point.
pub fn step_toward_start(world: &mut World, start: Position, max_step: f32) -> bool {
    let mut arrived = true;
    for (_entity, (_ship, pos)) in world.query_mut::<(&PlayerShip, &mut Position)>() {
        let offset = start.to_vec2() - pos.to_vec2();
        let distance = offset.length();
        if distance <= START_POINT_EPSILON {
            *pos = start;
            continue;
        }
        let step = offset / distance * max_step.min(distance);
        *pos = Position::from(pos.to_vec2() + step);
        if pos.distance_to(&start) <= START_POINT_EPSILON {
            *pos = start;
        } else {
            arrived = false;
        }
    }
    arrived
}

/// Whether the ship is already on the start point, without moving it.
pub fn at_start(world: &World, start: Position) -> bool {
    find_player(world).map_or(true, |(_, pos)| pos == start)
}
