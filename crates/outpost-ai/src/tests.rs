#[cfg(test)]
mod tests {
    use glam::Vec2;
    use outpost_core::constants::*;
    use outpost_core::enums::{BulletArchetype, Difficulty, EnemyArchetype, GunPhase, GunType};
    use outpost_core::services::RandomSource;
    use outpost_core::types::Position;
    use proptest::prelude::*;

    use crate::gunnery::{aim, EnemyGun};
    use crate::profiles::{bullet_profile, get_profile, GunProfile};
    use crate::steering::{SteeringController, SteeringState};

    /// Always returns the low end of the range.
    struct ZeroRandom;

    impl RandomSource for ZeroRandom {
        fn uniform(&mut self, min: f64, _max: f64) -> f64 {
            min
        }
    }

    struct FixedRandom(f64);

    impl RandomSource for FixedRandom {
        fn uniform(&mut self, min: f64, max: f64) -> f64 {
            (min + self.0).min(max)
        }
    }

    fn gun(interval: f64, burst: u32, burst_gap: f64) -> EnemyGun {
        let profile = GunProfile {
            gun: GunType::RailGun,
            fire_interval: interval,
            burst_size: burst,
            burst_interval: burst_gap,
            scales_with_difficulty: false,
        };
        EnemyGun::new(GunType::RailGun, &profile, Difficulty::Normal)
    }

    fn fire(g: &mut EnemyGun, now: f64) -> bool {
        g.tick(
            now,
            true,
            Position::new(100.0, 500.0),
            Position::new(100.0, 100.0),
            &mut ZeroRandom,
        )
        .is_some()
    }

    // --- Profiles ---

    #[test]
    fn test_profile_table_values() {
        let scout = get_profile(EnemyArchetype::Scout);
        assert_eq!(scout.base_hp, 5.0);
        assert_eq!(scout.score, 100);
        assert_eq!(scout.gun.gun, GunType::None);

        let swarmer = get_profile(EnemyArchetype::Swarmer);
        assert_eq!(swarmer.gun.burst_size, 5);
        assert_eq!(swarmer.gun.burst_interval, 0.05);
        assert_eq!(swarmer.max_force, 22.5);

        let bomber = get_profile(EnemyArchetype::AdvancedBomber);
        assert_eq!(bomber.gun.gun, GunType::StaticGun);
        assert_eq!(bomber.collision_damage, 20);
    }

    #[test]
    fn test_heavy_fighter_interval_scales_with_difficulty() {
        let gun = get_profile(EnemyArchetype::AdvancedFighter).gun;
        assert_eq!(gun.effective_interval(Difficulty::Normal), 0.5);
        assert_eq!(gun.effective_interval(Difficulty::Extreme), 0.25);
        let fighter = get_profile(EnemyArchetype::Fighter).gun;
        assert_eq!(fighter.effective_interval(Difficulty::Extreme), 3.0);
    }

    #[test]
    fn test_bullet_profiles() {
        assert_eq!(bullet_profile(BulletArchetype::PlayerRailGun).damage, 1);
        assert_eq!(bullet_profile(BulletArchetype::PlayerParticleLaser).damage, 2);
        assert_eq!(bullet_profile(BulletArchetype::PlayerProtonLaser).damage, 3);
        let rail = bullet_profile(BulletArchetype::EnemyRailGun);
        assert_eq!((rail.damage, rail.health), (1, Some(1.0)));
        let stat = bullet_profile(BulletArchetype::EnemyStatic);
        assert_eq!(stat.damage, 25);
        assert_eq!(stat.health, Some(5.0));
        assert_eq!(stat.speed, STATIC_BULLET_SPEED);
    }

    // --- Gunnery ---

    #[test]
    fn test_gun_single_shot_schedule() {
        let mut g = gun(1.0, 1, 0.0);
        assert!(!fire(&mut g, 0.0), "first eligible tick only seeds");
        assert_eq!(g.phase, GunPhase::ArmedWaiting);
        assert!(!fire(&mut g, 0.5));
        assert!(fire(&mut g, 1.0));
        assert!(!fire(&mut g, 1.5));
        assert!(fire(&mut g, 2.0));
    }

    #[test]
    fn test_gun_first_shot_is_jittered() {
        let mut g = gun(1.0, 1, 0.0);
        g.tick(
            0.0,
            true,
            Position::default(),
            Position::new(0.0, -10.0),
            &mut FixedRandom(0.4),
        );
        assert_eq!(g.last_fire, 0.4);
        assert!(!fire(&mut g, 1.3));
        assert!(fire(&mut g, 1.45));
    }

    #[test]
    fn test_gun_burst_sequence() {
        let mut g = gun(5.0, 3, 0.05);
        fire(&mut g, 0.0);
        assert!(fire(&mut g, 5.0));
        assert_eq!(g.phase, GunPhase::Firing);
        assert_eq!(g.burst_progress, 1);
        assert!(!fire(&mut g, 5.02));
        assert!(fire(&mut g, 5.06));
        assert!(fire(&mut g, 5.12));
        assert_eq!(g.burst_progress, 0, "burst completes and resets");
        assert_eq!(g.phase, GunPhase::ArmedWaiting);
        assert!(!fire(&mut g, 5.20));
        assert!(fire(&mut g, 10.2));
    }

    #[test]
    fn test_gun_idle_while_inactive() {
        let mut g = gun(1.0, 1, 0.0);
        let shot = g.tick(
            10.0,
            false,
            Position::default(),
            Position::default(),
            &mut ZeroRandom,
        );
        assert!(shot.is_none());
        assert_eq!(g.phase, GunPhase::Idle);
    }

    #[test]
    fn test_gunless_never_fires() {
        let profile = get_profile(EnemyArchetype::Scout).gun;
        let mut g = EnemyGun::new(GunType::None, &profile, Difficulty::Normal);
        for i in 0..100 {
            assert!(!fire(&mut g, i as f64 * 0.1));
        }
        assert_eq!(g.phase, GunPhase::Idle);
    }

    #[test]
    fn test_shot_aimed_at_target() {
        let mut g = gun(1.0, 1, 0.0);
        fire(&mut g, 0.0);
        let shot = g
            .tick(
                1.0,
                true,
                Position::new(0.0, 300.0),
                Position::new(300.0, 300.0),
                &mut ZeroRandom,
            )
            .unwrap();
        assert_eq!(shot.bullet, BulletArchetype::EnemyRailGun);
        assert!((shot.velocity.x - ENEMY_BULLET_SPEED).abs() < 1e-3);
        assert!(shot.velocity.y.abs() < 1e-3);
    }

    #[test]
    fn test_aim_at_own_position_fires_down() {
        let v = aim(Position::new(5.0, 5.0), Position::new(5.0, 5.0), 120.0);
        assert_eq!((v.x, v.y), (0.0, -120.0));
    }

    // --- Steering ---

    #[test]
    fn test_steering_moves_toward_waypoint() {
        let mut s = SteeringController::new(Position::new(0.0, 0.0), 300.0, 6.0);
        let start = Position::new(0.0, 400.0);
        let next = s.update(start, 1.0 / 30.0);
        assert!(next.y < start.y);
        assert_eq!(next.x, 0.0);
        assert_eq!(s.state, SteeringState::Seeking);
    }

    #[test]
    fn test_steering_force_is_limited() {
        let mut s = SteeringController::new(Position::new(1000.0, 0.0), 300.0, 6.0);
        s.update(Position::new(0.0, 0.0), 1.0 / 30.0);
        assert!((s.velocity.length() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_steering_zero_direction_is_noop() {
        let mut s = SteeringController::new(Position::new(50.0, 50.0), 300.0, 6.0);
        s.velocity = Vec2::new(3.0, 0.0);
        let p = s.update(Position::new(50.0, 50.0), 1.0 / 30.0);
        assert_eq!(p, Position::new(50.0, 50.0));
        assert_eq!(s.velocity, Vec2::new(3.0, 0.0));
        assert!(s.is_arrived());
    }

    #[test]
    fn test_steering_arrives_and_retargets() {
        let mut s = SteeringController::new(Position::new(0.0, 0.0), 300.0, 50.0);
        let mut p = Position::new(0.0, 200.0);
        for _ in 0..600 {
            p = s.update(p, 1.0 / 30.0);
            if s.is_arrived() {
                break;
            }
        }
        assert!(s.is_arrived(), "never arrived, ended at {p:?}");
        assert!(s.waypoint_reached(p));

        s.update_waypoint(Position::new(100.0, 100.0));
        assert_eq!(s.state, SteeringState::Seeking);
    }

    proptest! {
        #[test]
        fn prop_steering_speed_never_exceeds_max(
            wx in -500.0f32..500.0,
            wy in -500.0f32..500.0,
            px in -500.0f32..500.0,
            py in -500.0f32..500.0,
            max_speed in 10.0f32..700.0,
            max_force in 0.5f32..50.0,
            steps in 1usize..120,
        ) {
            let mut s = SteeringController::new(Position::new(wx, wy), max_speed, max_force);
            let mut p = Position::new(px, py);
            for _ in 0..steps {
                p = s.update(p, 1.0 / 30.0);
                prop_assert!(s.velocity.length() <= max_speed * 1.0001);
            }
        }

        #[test]
        fn prop_gun_never_fires_twice_at_same_time(
            interval in 0.1f64..5.0,
            burst in 1u32..10,
            t in 0.0f64..100.0,
        ) {
            let mut g = gun(interval, burst, 0.05);
            fire(&mut g, 0.0);
            let first = fire(&mut g, t);
            let second = fire(&mut g, t);
            prop_assert!(!(first && second));
        }
    }
}
