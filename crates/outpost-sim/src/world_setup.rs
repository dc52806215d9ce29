//! Entity spawn factories.
//!
//! Creates the player ship, enemy squads and bullets with the component
//! bundles the systems expect.

use hecs::{Entity, World};

use outpost_core::components::*;
use outpost_core::config::EnemyWaveSpec;
use outpost_core::constants::{PLAYER_COLLISION_DAMAGE, PLAYER_RADIUS};
use outpost_core::enums::*;
use outpost_core::services::RandomSource;
use outpost_core::types::{Health, Playfield, Position, Velocity};

use outpost_ai::gunnery::EnemyGun;
use outpost_ai::profiles::{bullet_profile, get_profile};
use outpost_ai::steering::SteeringController;

/// Spawn the player ship at the start point.
pub fn spawn_player(
    world: &mut World,
    playfield: &Playfield,
    max_health: f32,
    loadout: Loadout,
) -> Entity {
    world.spawn((
        PlayerShip {
            loadout,
            distressed: false,
        },
        playfield.start_point(),
        Health::full(max_health),
        Collider {
            kind: EntityKind::PlayerShip,
            radius: PLAYER_RADIUS,
            damage: PLAYER_COLLISION_DAMAGE,
            size: SizeClass::Normal,
        },
        RenderKey(RenderArchetype::PlayerShip),
    ))
}

/// Random x across the playable width, at spawn altitude.
pub fn random_spawn_point(playfield: &Playfield, rng: &mut dyn RandomSource) -> Position {
    let area = playfield.playable();
    Position::new(
        rng.uniform(area.min_x as f64, area.max_x as f64) as f32,
        playfield.spawn_altitude(),
    )
}

/// Random point in the upper half of the playable area.
pub fn random_waypoint(playfield: &Playfield, rng: &mut dyn RandomSource) -> Position {
    let area = playfield.playable();
    let mid_y = (area.min_y + area.max_y) / 2.0;
    Position::new(
        rng.uniform(area.min_x as f64, area.max_x as f64) as f32,
        rng.uniform(mid_y as f64, area.max_y as f64) as f32,
    )
}

/// Spawn every enemy of a squad. Each gets its own spawn delay.
pub fn spawn_squad(
    world: &mut World,
    spec: &EnemyWaveSpec,
    playfield: &Playfield,
    difficulty: Difficulty,
    now: f64,
    rng: &mut dyn RandomSource,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(spec.count as usize);
    for _ in 0..spec.count {
        let delay = spec.min_spawn_delay + rng.uniform(0.0, spec.spawn_jitter);
        spawned.push(spawn_enemy(
            world, spec, playfield, difficulty, now, delay, rng,
        ));
    }
    spawned
}

pub fn spawn_enemy(
    world: &mut World,
    spec: &EnemyWaveSpec,
    playfield: &Playfield,
    difficulty: Difficulty,
    now: f64,
    delay: f64,
    rng: &mut dyn RandomSource,
) -> Entity {
    let profile = get_profile(spec.archetype);
    let position = random_spawn_point(playfield, rng);
    let waypoint = random_waypoint(playfield, rng);

    world.spawn((
        EnemyState {
            archetype: spec.archetype,
            score: profile.score,
            funds: profile.funds,
            lives: spec.lives,
            spawn: SpawnTimer::new(delay, now),
        },
        position,
        Velocity::default(),
        Health::full(spec.starting_hp),
        Collider {
            kind: EntityKind::EnemyShip,
            radius: profile.radius,
            damage: profile.collision_damage,
            size: profile.size,
        },
        SteeringController::new(waypoint, profile.max_speed, profile.max_force),
        EnemyGun::new(spec.gun, &profile.gun, difficulty),
        RenderKey(RenderArchetype::Enemy(spec.archetype)),
    ))
}

/// Spawn one bullet travelling at `velocity`.
pub fn spawn_bullet(
    world: &mut World,
    archetype: BulletArchetype,
    origin: Position,
    velocity: Velocity,
    direction: BulletDirection,
) -> Entity {
    let profile = bullet_profile(archetype);
    let absorbs_hits = archetype == BulletArchetype::EnemyStatic;
    world.spawn((
        Bullet {
            archetype,
            direction,
            absorbs_hits,
        },
        origin,
        velocity,
        Health::full(profile.health.unwrap_or(1.0)),
        Collider {
            kind: archetype.kind(),
            radius: profile.radius,
            damage: profile.damage,
            size: profile.size,
        },
        RenderKey(RenderArchetype::Bullet(archetype)),
    ))
}
