//! Collision resolution: circle-proxy contacts with symmetric damage.
//!
//! A contact is resolved once, on the tick it begins. Both sides take the
//! other's collision damage through their own response, always in the same
//! canonical order. Entities removed earlier in the tick are skipped, and
//! contacts with an enemy that is still inside its spawn delay are ignored.

use std::collections::HashSet;

use glam::Vec2;
use hecs::{Entity, World};

use outpost_ai::gunnery::EnemyGun;
use outpost_ai::steering::SteeringController;
use outpost_core::components::{Bullet, Collider, EnemyState, PlayerShip};
use outpost_core::enums::{EntityKind, SoundCue};
use outpost_core::events::{screen_flash_secs, GameEvent};
use outpost_core::services::RandomSource;
use outpost_core::types::{Health, Playfield, Position, Velocity};

use super::player::update_distress;
use super::Feedback;
use crate::scoring::ScoreState;
use crate::world_setup::{random_spawn_point, random_waypoint};

/// Pairs that were touching at the end of the previous tick.
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    touching: HashSet<(u64, u64)>,
}

impl ContactTracker {
    pub fn clear(&mut self) {
        self.touching.clear();
    }

    pub fn len(&self) -> usize {
        self.touching.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touching.is_empty()
    }
}

/// Shared state the responses write into.
pub struct CollisionContext<'a> {
    pub now: f64,
    pub playfield: &'a Playfield,
    pub distress_fraction: f32,
    pub rng: &'a mut dyn RandomSource,
    pub score: &'a mut ScoreState,
    pub feedback: &'a mut Feedback,
}

/// What happened during one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionReport {
    pub contacts: u32,
    pub player_hits: u32,
    pub enemies_destroyed: u32,
}

#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
    kind: EntityKind,
    position: Position,
    radius: f32,
    damage: i32,
    absorbs_hits: bool,
}

fn kind_rank(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::PlayerShip => 0,
        EntityKind::EnemyShip => 1,
        EntityKind::PlayerBullet => 2,
        EntityKind::EnemyBullet => 3,
    }
}

/// Only these pairings exchange damage.
fn interacts(a: &Body, b: &Body) -> bool {
    use EntityKind::*;
    match (a.kind, b.kind) {
        (PlayerShip, EnemyShip) | (EnemyShip, PlayerShip) => true,
        (PlayerShip, EnemyBullet) | (EnemyBullet, PlayerShip) => true,
        (EnemyShip, PlayerBullet) | (PlayerBullet, EnemyShip) => true,
        (PlayerBullet, EnemyBullet) => b.absorbs_hits,
        (EnemyBullet, PlayerBullet) => a.absorbs_hits,
        _ => false,
    }
}

/// Order a pair independently of argument order.
fn canonical(a: Body, b: Body) -> (Body, Body) {
    let key_a = (kind_rank(a.kind), a.entity.to_bits().get());
    let key_b = (kind_rank(b.kind), b.entity.to_bits().get());
    if key_a <= key_b {
        (a, b)
    } else {
        (b, a)
    }
}

fn pair_key(a: &Body, b: &Body) -> (u64, u64) {
    (a.entity.to_bits().get(), b.entity.to_bits().get())
}

fn gather(world: &World) -> Vec<Body> {
    world
        .query::<(&Collider, &Position, Option<&EnemyState>, Option<&Bullet>)>()
        .iter()
        .filter(|(_, (_, _, enemy, _))| enemy.map_or(true, |e| e.spawn.spawned))
        .map(|(entity, (collider, pos, _, bullet))| Body {
            entity,
            kind: collider.kind,
            position: *pos,
            radius: collider.radius,
            damage: collider.damage,
            absorbs_hits: bullet.map_or(false, |b| b.absorbs_hits),
        })
        .collect()
}

/// Detect new contacts and resolve each one.
pub fn run(
    world: &mut World,
    contacts: &mut ContactTracker,
    ctx: &mut CollisionContext<'_>,
) -> CollisionReport {
    let bodies = gather(world);
    let mut touching = HashSet::new();
    let mut begun = Vec::new();

    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            if !interacts(a, b) {
                continue;
            }
            let reach = a.radius + b.radius;
            if a.position.to_vec2().distance_squared(b.position.to_vec2()) >= reach * reach {
                continue;
            }
            let (first, second) = canonical(*a, *b);
            let key = pair_key(&first, &second);
            touching.insert(key);
            if !contacts.touching.contains(&key) {
                begun.push((first, second));
            }
        }
    }
    contacts.touching = touching;

    let mut report = CollisionReport::default();
    let mut removed: HashSet<Entity> = HashSet::new();
    for (a, b) in begun {
        resolve(world, a, b, &mut removed, ctx, &mut report);
    }
    for entity in removed {
        let _ = world.despawn(entity);
    }
    report
}

/// Both sides take the other's damage, `a` first.
fn resolve(
    world: &mut World,
    a: Body,
    b: Body,
    removed: &mut HashSet<Entity>,
    ctx: &mut CollisionContext<'_>,
    report: &mut CollisionReport,
) {
    if removed.contains(&a.entity) || removed.contains(&b.entity) {
        return;
    }
    // An enemy that respawned earlier this tick is inert again.
    if !is_active(world, a.entity) || !is_active(world, b.entity) {
        return;
    }
    report.contacts += 1;
    respond(world, a, b.damage, removed, ctx, report);
    respond(world, b, a.damage, removed, ctx, report);
}

fn is_active(world: &World, entity: Entity) -> bool {
    if !world.contains(entity) {
        return false;
    }
    match world.get::<&EnemyState>(entity) {
        Ok(state) => state.spawn.spawned,
        Err(_) => true,
    }
}

fn respond(
    world: &mut World,
    body: Body,
    damage: i32,
    removed: &mut HashSet<Entity>,
    ctx: &mut CollisionContext<'_>,
    report: &mut CollisionReport,
) {
    match body.kind {
        EntityKind::PlayerShip => player_hit(world, body.entity, damage, ctx, report),
        EntityKind::EnemyShip => enemy_hit(world, body.entity, damage, removed, ctx, report),
        EntityKind::PlayerBullet | EntityKind::EnemyBullet => {
            bullet_hit(world, body.entity, damage, removed)
        }
    }
}

/// Collision damage is never negative. A negative value is applied as zero.
fn checked_damage(damage: i32) -> f32 {
    debug_assert!(damage >= 0, "negative collision damage {damage}");
    if damage < 0 {
        log::warn!("negative collision damage {damage} clamped to 0");
        return 0.0;
    }
    damage as f32
}

fn player_hit(
    world: &mut World,
    entity: Entity,
    damage: i32,
    ctx: &mut CollisionContext<'_>,
    report: &mut CollisionReport,
) {
    let Ok((ship, health)) = world.query_one_mut::<(&mut PlayerShip, &mut Health)>(entity)
    else {
        return;
    };
    health.apply_damage(checked_damage(damage));
    report.player_hits += 1;

    ctx.feedback.event(GameEvent::PlayerHit {
        damage,
        health: health.current,
    });
    ctx.feedback.event(GameEvent::ScreenFlash {
        duration_secs: screen_flash_secs(damage),
    });
    ctx.feedback.sound(SoundCue::Explode);

    if update_distress(ship, health, ctx.distress_fraction) {
        ctx.feedback.event(GameEvent::DistressStarted);
    }
}

fn enemy_hit(
    world: &mut World,
    entity: Entity,
    damage: i32,
    removed: &mut HashSet<Entity>,
    ctx: &mut CollisionContext<'_>,
    report: &mut CollisionReport,
) {
    let Ok((state, health, pos, vel, steering, gun)) = world.query_one_mut::<(
        &mut EnemyState,
        &mut Health,
        &mut Position,
        &mut Velocity,
        &mut SteeringController,
        &mut EnemyGun,
    )>(entity) else {
        return;
    };
    if !health.apply_damage(checked_damage(damage)) {
        return;
    }

    ctx.score.award(state.score, state.funds);
    report.enemies_destroyed += 1;
    ctx.feedback.sound(SoundCue::Explode);

    let respawning = state.lives > 0;
    ctx.feedback.event(GameEvent::EnemyDestroyed {
        archetype: state.archetype,
        score: state.score,
        funds: state.funds,
        respawning,
    });

    if respawning {
        state.lives -= 1;
        state.spawn.rearm(ctx.now);
        health.restore();
        *pos = random_spawn_point(ctx.playfield, ctx.rng);
        *vel = Velocity::default();
        steering.velocity = Vec2::ZERO;
        steering.update_waypoint(random_waypoint(ctx.playfield, ctx.rng));
        gun.burst_progress = 0;
        log::debug!(
            "{:?} respawning, {} lives left",
            state.archetype,
            state.lives
        );
    } else {
        log::debug!("{:?} destroyed", state.archetype);
        removed.insert(entity);
    }
}

fn bullet_hit(world: &mut World, entity: Entity, damage: i32, removed: &mut HashSet<Entity>) {
    let Ok((bullet, health)) = world.query_one_mut::<(&Bullet, &mut Health)>(entity) else {
        return;
    };
    if bullet.absorbs_hits {
        health.apply_damage(checked_damage(damage));
        if health.is_depleted() {
            removed.insert(entity);
        }
    } else {
        removed.insert(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outpost_core::components::SpawnTimer;
    use outpost_core::config::EnemyWaveSpec;
    use outpost_core::enums::{
        BulletArchetype, BulletDirection, Difficulty, EnemyArchetype, GunType,
    };
    use outpost_ai::profiles::bullet_profile;
    use outpost_core::services::ChaChaRandom;
    use proptest::prelude::*;

    use crate::world_setup::{spawn_bullet, spawn_enemy, spawn_player};

    struct Harness {
        world: World,
        playfield: Playfield,
        rng: ChaChaRandom,
        score: ScoreState,
        feedback: Feedback,
        contacts: ContactTracker,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                world: World::new(),
                playfield: Playfield::new(768.0, 1024.0),
                rng: ChaChaRandom::new(3),
                score: ScoreState::default(),
                feedback: Feedback::default(),
                contacts: ContactTracker::default(),
            }
        }

        fn run(&mut self, now: f64) -> CollisionReport {
            let mut ctx = CollisionContext {
                now,
                playfield: &self.playfield,
                distress_fraction: 0.3,
                rng: &mut self.rng,
                score: &mut self.score,
                feedback: &mut self.feedback,
            };
            run(&mut self.world, &mut self.contacts, &mut ctx)
        }

        fn enemy_at(&mut self, archetype: EnemyArchetype, hp: f32, lives: u32, at: Position) -> Entity {
            let spec = EnemyWaveSpec {
                archetype,
                count: 1,
                starting_hp: hp,
                lives,
                min_spawn_delay: 0.0,
                spawn_jitter: 0.0,
                gun: GunType::None,
                title: None,
                title_delay: 0.0,
            };
            let e = spawn_enemy(
                &mut self.world,
                &spec,
                &self.playfield,
                Difficulty::Normal,
                0.0,
                0.0,
                &mut self.rng,
            );
            *self.world.get::<&mut Position>(e).unwrap() = at;
            self.world.get::<&mut EnemyState>(e).unwrap().spawn.spawned = true;
            e
        }

        fn bullet_at(&mut self, archetype: BulletArchetype, at: Position) -> Entity {
            spawn_bullet(
                &mut self.world,
                archetype,
                at,
                Velocity::default(),
                BulletDirection::Up,
            )
        }

        fn player_at(&mut self, at: Position) -> Entity {
            let e = spawn_player(&mut self.world, &self.playfield, 100.0, Default::default());
            *self.world.get::<&mut Position>(e).unwrap() = at;
            e
        }

        fn health(&self, e: Entity) -> f32 {
            self.world.get::<&Health>(e).unwrap().current
        }
    }

    #[test]
    fn test_player_bullet_damages_enemy() {
        let mut h = Harness::new();
        let enemy = h.enemy_at(EnemyArchetype::Fighter, 10.0, 0, Position::new(300.0, 500.0));
        let bullet = h.bullet_at(BulletArchetype::PlayerParticleLaser, Position::new(300.0, 490.0));
        let report = h.run(1.0);
        assert_eq!(report.contacts, 1);
        assert_eq!(h.health(enemy), 8.0);
        assert!(!h.world.contains(bullet));
    }

    #[test]
    fn test_lethal_hit_awards_and_removes() {
        let mut h = Harness::new();
        let enemy = h.enemy_at(EnemyArchetype::Scout, 1.0, 0, Position::new(300.0, 500.0));
        h.bullet_at(BulletArchetype::PlayerProtonLaser, Position::new(300.0, 500.0));
        let report = h.run(1.0);
        assert_eq!(report.enemies_destroyed, 1);
        assert!(!h.world.contains(enemy));
        assert_eq!(h.score.score, 100);
        assert_eq!(h.score.funds, 25);
    }

    #[test]
    fn test_lethal_hit_with_lives_respawns_inert() {
        let mut h = Harness::new();
        let enemy = h.enemy_at(EnemyArchetype::Swarmer, 1.0, 2, Position::new(300.0, 500.0));
        h.bullet_at(BulletArchetype::PlayerRailGun, Position::new(300.0, 500.0));
        h.run(4.0);
        assert!(h.world.contains(enemy));
        let state = *h.world.get::<&EnemyState>(enemy).unwrap();
        assert_eq!(state.lives, 1);
        assert!(!state.spawn.spawned);
        assert_eq!(state.spawn.spawn_time, 4.0);
        assert_eq!(h.health(enemy), 1.0);
        let pos = *h.world.get::<&Position>(enemy).unwrap();
        assert_eq!(pos.y, h.playfield.spawn_altitude());
        assert_eq!(h.score.score, 10, "score awarded on every death");
    }

    #[test]
    fn test_unspawned_enemy_ignored() {
        let mut h = Harness::new();
        let enemy = h.enemy_at(EnemyArchetype::Fighter, 10.0, 0, Position::new(300.0, 500.0));
        h.world.get::<&mut EnemyState>(enemy).unwrap().spawn = SpawnTimer::new(5.0, 0.0);
        let bullet = h.bullet_at(BulletArchetype::PlayerRailGun, Position::new(300.0, 500.0));
        let report = h.run(1.0);
        assert_eq!(report.contacts, 0);
        assert_eq!(h.health(enemy), 10.0);
        assert!(h.world.contains(bullet));
    }

    #[test]
    fn test_player_hit_flash_and_distress() {
        let mut h = Harness::new();
        let player = h.player_at(Position::new(100.0, 100.0));
        h.world.get::<&mut Health>(player).unwrap().current = 40.0;
        h.bullet_at(BulletArchetype::EnemyRailGun, Position::new(100.0, 110.0));
        let report = h.run(1.0);
        assert_eq!(report.player_hits, 1);
        assert_eq!(h.health(player), 39.0);
        assert!(h.feedback.events.contains(&GameEvent::ScreenFlash { duration_secs: 0.05 }));
        assert!(!h.feedback.events.contains(&GameEvent::DistressStarted));

        h.world.get::<&mut Health>(player).unwrap().current = 30.0;
        h.bullet_at(BulletArchetype::EnemyRailGun, Position::new(100.0, 110.0));
        h.run(1.1);
        assert!(h.feedback.events.contains(&GameEvent::DistressStarted));
        assert!(h.world.get::<&PlayerShip>(player).unwrap().distressed);
    }

    #[test]
    fn test_ramming_is_symmetric() {
        let mut h = Harness::new();
        let player = h.player_at(Position::new(200.0, 200.0));
        let enemy = h.enemy_at(EnemyArchetype::Fighter, 10.0, 0, Position::new(210.0, 210.0));
        h.run(1.0);
        assert_eq!(h.health(player), 95.0);
        assert_eq!(h.health(enemy), 5.0);

        // Still touching next tick: no second exchange.
        h.run(1.016);
        assert_eq!(h.health(player), 95.0);
        assert_eq!(h.health(enemy), 5.0);
    }

    #[test]
    fn test_static_bullet_absorbs_player_fire() {
        let mut h = Harness::new();
        let stat = h.bullet_at(BulletArchetype::EnemyStatic, Position::new(400.0, 400.0));
        let p1 = h.bullet_at(BulletArchetype::PlayerProtonLaser, Position::new(400.0, 405.0));
        h.run(1.0);
        assert!(!h.world.contains(p1));
        assert_eq!(h.health(stat), 2.0);

        h.bullet_at(BulletArchetype::PlayerParticleLaser, Position::new(400.0, 405.0));
        h.run(1.1);
        assert!(!h.world.contains(stat));
    }

    #[test]
    fn test_rail_bullets_pass_each_other() {
        let mut h = Harness::new();
        let enemy_bullet = h.bullet_at(BulletArchetype::EnemyRailGun, Position::new(400.0, 400.0));
        let player_bullet = h.bullet_at(BulletArchetype::PlayerRailGun, Position::new(400.0, 400.0));
        assert_eq!(h.run(1.0).contacts, 0);
        assert!(h.world.contains(enemy_bullet));
        assert!(h.world.contains(player_bullet));
    }

    #[test]
    fn test_removed_entity_skipped_later_in_tick() {
        let mut h = Harness::new();
        let enemy = h.enemy_at(EnemyArchetype::Scout, 1.0, 0, Position::new(300.0, 500.0));
        h.bullet_at(BulletArchetype::PlayerRailGun, Position::new(300.0, 500.0));
        h.bullet_at(BulletArchetype::PlayerRailGun, Position::new(300.0, 502.0));
        let report = h.run(1.0);
        assert_eq!(report.contacts, 1);
        assert_eq!(report.enemies_destroyed, 1);
        assert!(!h.world.contains(enemy));
        assert_eq!(h.score.score, 100, "awarded exactly once");
    }

    #[test]
    fn test_canonical_order_independent_of_arguments() {
        let mut world = World::new();
        let a = world.spawn((1u8,));
        let b = world.spawn((2u8,));
        let body = |entity, kind| Body {
            entity,
            kind,
            position: Position::default(),
            radius: 1.0,
            damage: 1,
            absorbs_hits: false,
        };
        let pa = body(a, EntityKind::PlayerBullet);
        let pb = body(b, EntityKind::EnemyShip);
        let (x1, y1) = canonical(pa, pb);
        let (x2, y2) = canonical(pb, pa);
        assert_eq!(x1.entity, x2.entity);
        assert_eq!(y1.entity, y2.entity);
        assert_eq!(x1.kind, EntityKind::EnemyShip);
    }
    #[test]
    fn test_distress_follows_health() {
        let mut h = Harness::new();
        let player = h.player_at(Position::new(100.0, 100.0));
        h.world.get::<&mut PlayerShip>(player).unwrap().distressed = true;
        h.world.get::<&mut Health>(player).unwrap().current = 80.0;
        h.bullet_at(BulletArchetype::EnemyRailGun, Position::new(100.0, 110.0));
        h.run(1.0);
        assert!(!h.world.get::<&PlayerShip>(player).unwrap().distressed);
        assert!(!h.feedback.events.contains(&GameEvent::DistressStarted));
    }

    #[test]
    fn test_contact_tracker_forgets_separated_pairs() {
        let mut h = Harness::new();
        h.player_at(Position::new(200.0, 200.0));
        let enemy = h.enemy_at(EnemyArchetype::Fighter, 10.0, 0, Position::new(210.0, 210.0));
        assert!(h.contacts.is_empty());
        h.run(1.0);
        assert_eq!(h.contacts.len(), 1);

        *h.world.get::<&mut Position>(enemy).unwrap() = Position::new(600.0, 600.0);
        h.run(1.1);
        assert!(h.contacts.is_empty());

        // Touching again is a new contact.
        *h.world.get::<&mut Position>(enemy).unwrap() = Position::new(210.0, 210.0);
        let report = h.run(1.2);
        assert_eq!(report.contacts, 1);
        assert_eq!(report.enemies_destroyed, 1);
        assert!(!h.world.contains(enemy));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "negative collision damage"))]
    fn test_negative_damage_applied_as_zero() {
        assert_eq!(checked_damage(-3), 0.0);
    }

    #[test]
    fn test_checked_damage_passes_valid_values() {
        assert_eq!(checked_damage(0), 0.0);
        assert_eq!(checked_damage(25), 25.0);
    }

    proptest! {
        #[test]
        fn prop_enemy_health_after_player_bullet(
            hp in 0.1f32..200.0,
            archetype in prop::sample::select(vec![
                EnemyArchetype::Scout,
                EnemyArchetype::Fighter,
                EnemyArchetype::Swarmer,
                EnemyArchetype::AdvancedSwarmer,
                EnemyArchetype::AdvancedFighter,
                EnemyArchetype::AdvancedBomber,
            ]),
            bullet in prop::sample::select(vec![
                BulletArchetype::PlayerRailGun,
                BulletArchetype::PlayerParticleLaser,
                BulletArchetype::PlayerProtonLaser,
            ]),
        ) {
            let mut h = Harness::new();
            let enemy = h.enemy_at(archetype, hp, 0, Position::new(300.0, 500.0));
            h.bullet_at(bullet, Position::new(300.0, 500.0));
            let expected = (hp - bullet_profile(bullet).damage as f32).max(0.0);

            let report = h.run(1.0);
            prop_assert_eq!(report.contacts, 1);
            if expected <= 0.0 {
                prop_assert_eq!(report.enemies_destroyed, 1);
                prop_assert!(!h.world.contains(enemy));
            } else {
                prop_assert_eq!(report.enemies_destroyed, 0);
                prop_assert_eq!(h.health(enemy), expected);
            }
        }
    }
}
