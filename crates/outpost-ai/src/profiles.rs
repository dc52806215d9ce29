//! Archetype capability profiles.
//!
//! One table replaces per-archetype subclassing: every enemy is the same record,
//! parameterised by its archetype's row here.

use outpost_core::constants::*;
use outpost_core::enums::{BulletArchetype, Difficulty, EnemyArchetype, GunType, SizeClass};

/// Gun timing for an archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GunProfile {
    pub gun: GunType,
    /// Seconds between fresh bursts.
    pub fire_interval: f64,
    /// Shots per burst.
    pub burst_size: u32,
    /// Seconds between shots inside a burst.
    pub burst_interval: f64,
    /// Fire interval is multiplied by the difficulty multiplier.
    pub scales_with_difficulty: bool,
}

/// Behavioural profile for an enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub base_hp: f32,
    pub score: u32,
    pub funds: u32,
    pub collision_damage: i32,
    pub size: SizeClass,
    /// Circle proxy radius (px).
    pub radius: f32,
    pub gun: GunProfile,
    /// Steering limits (px/s).
    pub max_speed: f32,
    pub max_force: f32,
}

/// Per-bullet parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletProfile {
    pub damage: i32,
    /// Own health pool, for bullets that absorb hits.
    pub health: Option<f32>,
    pub size: SizeClass,
    /// Travel speed (px/s).
    pub speed: f32,
    pub radius: f32,
}

impl GunProfile {
    const NONE: GunProfile = GunProfile {
        gun: GunType::None,
        fire_interval: 1.0,
        burst_size: 0,
        burst_interval: 0.0,
        scales_with_difficulty: false,
    };

    /// Fire interval after difficulty scaling.
    pub fn effective_interval(&self, difficulty: Difficulty) -> f64 {
        if self.scales_with_difficulty {
            self.fire_interval * difficulty.multiplier()
        } else {
            self.fire_interval
        }
    }
}

/// Get the capability profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> EnemyProfile {
    match archetype {
        EnemyArchetype::Scout => EnemyProfile {
            base_hp: 5.0,
            score: 100,
            funds: 25,
            collision_damage: 4,
            size: SizeClass::Medium,
            radius: 20.0,
            gun: GunProfile::NONE,
            max_speed: 300.0,
            max_force: 6.0,
        },
        EnemyArchetype::Fighter => EnemyProfile {
            base_hp: 10.0,
            score: 250,
            funds: 50,
            collision_damage: 5,
            size: SizeClass::Normal,
            radius: 24.0,
            gun: GunProfile {
                gun: GunType::RailGun,
                fire_interval: 3.0,
                burst_size: 1,
                burst_interval: 0.0,
                scales_with_difficulty: false,
            },
            max_speed: 480.0,
            max_force: 12.0,
        },
        EnemyArchetype::Swarmer => EnemyProfile {
            base_hp: 3.0,
            score: 10,
            funds: 10,
            collision_damage: 3,
            size: SizeClass::Normal,
            radius: 16.0,
            gun: GunProfile {
                gun: GunType::RailGun,
                fire_interval: 5.0,
                burst_size: 5,
                burst_interval: 0.05,
                scales_with_difficulty: false,
            },
            max_speed: 600.0,
            max_force: 22.5,
        },
        EnemyArchetype::AdvancedSwarmer => EnemyProfile {
            base_hp: 6.0,
            score: 50,
            funds: 25,
            collision_damage: 4,
            size: SizeClass::Normal,
            radius: 18.0,
            gun: GunProfile {
                gun: GunType::RailGun,
                fire_interval: 4.0,
                burst_size: 8,
                burst_interval: 0.05,
                scales_with_difficulty: false,
            },
            max_speed: 630.0,
            max_force: 24.0,
        },
        EnemyArchetype::AdvancedFighter => EnemyProfile {
            base_hp: 60.0,
            score: 750,
            funds: 500,
            collision_damage: 20,
            size: SizeClass::Large,
            radius: 40.0,
            gun: GunProfile {
                gun: GunType::RailGun,
                fire_interval: 0.5,
                burst_size: 1,
                burst_interval: 0.0,
                scales_with_difficulty: true,
            },
            max_speed: 360.0,
            max_force: 6.0,
        },
        EnemyArchetype::AdvancedBomber => EnemyProfile {
            base_hp: 80.0,
            score: 500,
            funds: 250,
            collision_damage: 20,
            size: SizeClass::Large,
            radius: 48.0,
            gun: GunProfile {
                gun: GunType::StaticGun,
                fire_interval: 1.0,
                burst_size: 1,
                burst_interval: 0.0,
                scales_with_difficulty: false,
            },
            max_speed: 270.0,
            max_force: 4.5,
        },
    }
}

/// Get the parameters for a bullet archetype.
pub fn bullet_profile(archetype: BulletArchetype) -> BulletProfile {
    match archetype {
        BulletArchetype::PlayerRailGun => BulletProfile {
            damage: 1,
            health: None,
            size: SizeClass::Tiny,
            speed: PLAYER_BULLET_SPEED,
            radius: BULLET_RADIUS,
        },
        BulletArchetype::PlayerParticleLaser => BulletProfile {
            damage: 2,
            health: None,
            size: SizeClass::Small,
            speed: PLAYER_BULLET_SPEED,
            radius: BULLET_RADIUS,
        },
        BulletArchetype::PlayerProtonLaser => BulletProfile {
            damage: 3,
            health: None,
            size: SizeClass::Small,
            speed: PLAYER_BULLET_SPEED,
            radius: BULLET_RADIUS,
        },
        BulletArchetype::EnemyRailGun => BulletProfile {
            damage: 1,
            health: Some(1.0),
            size: SizeClass::Tiny,
            speed: ENEMY_BULLET_SPEED,
            radius: BULLET_RADIUS,
        },
        BulletArchetype::EnemyStatic => BulletProfile {
            damage: STATIC_BULLET_DAMAGE,
            health: Some(STATIC_BULLET_HEALTH),
            size: SizeClass::Normal,
            speed: STATIC_BULLET_SPEED,
            radius: BULLET_RADIUS * 2.0,
        },
    }
}

/// Enemy bullet fired by a gun family.
pub fn gun_bullet(gun: GunType) -> Option<BulletArchetype> {
    match gun {
        GunType::None => None,
        GunType::RailGun => Some(BulletArchetype::EnemyRailGun),
        GunType::StaticGun => Some(BulletArchetype::EnemyStatic),
    }
}
