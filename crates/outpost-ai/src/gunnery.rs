//! Enemy gun state machine.
//!
//! Idle -> ArmedWaiting -> Firing -> ArmedWaiting. Each shot is aimed at the
//! target's position at fire time, with no lead.

use glam::Vec2;
use outpost_core::enums::{BulletArchetype, Difficulty, GunPhase, GunType};
use outpost_core::services::RandomSource;
use outpost_core::types::{Position, Velocity};

use crate::profiles::{bullet_profile, gun_bullet, GunProfile};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyGun {
    pub gun: GunType,
    pub fire_interval: f64,
    pub burst_size: u32,
    pub burst_interval: f64,
    pub phase: GunPhase,
    pub last_fire: f64,
    pub burst_progress: u32,
}

/// A bullet the gun wants spawned this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GunShot {
    pub bullet: BulletArchetype,
    pub origin: Position,
    pub velocity: Velocity,
}

impl EnemyGun {
    /// Build a gun of family `gun` with the archetype's timing.
    pub fn new(gun: GunType, profile: &GunProfile, difficulty: Difficulty) -> Self {
        Self {
            gun,
            fire_interval: profile.effective_interval(difficulty),
            burst_size: profile.burst_size.max(1),
            burst_interval: profile.burst_interval,
            phase: GunPhase::Idle,
            last_fire: 0.0,
            burst_progress: 0,
        }
    }

    /// Step the state machine. `active` is false while the owner is unspawned.
    pub fn tick(
        &mut self,
        now: f64,
        active: bool,
        origin: Position,
        target: Position,
        rng: &mut dyn RandomSource,
    ) -> Option<GunShot> {
        let bullet = gun_bullet(self.gun)?;
        if !active {
            self.phase = GunPhase::Idle;
            self.burst_progress = 0;
            return None;
        }

        let delta = now - self.last_fire;
        let ready = match self.phase {
            GunPhase::Idle => {
                // First eligible tick only seeds the schedule.
                self.last_fire = now + rng.uniform(0.0, self.fire_interval);
                self.phase = GunPhase::ArmedWaiting;
                false
            }
            GunPhase::ArmedWaiting => delta >= self.fire_interval,
            GunPhase::Firing => delta >= self.burst_interval,
        };
        if !ready {
            return None;
        }

        self.last_fire = now;
        self.burst_progress += 1;
        if self.burst_progress >= self.burst_size {
            self.burst_progress = 0;
            self.phase = GunPhase::ArmedWaiting;
        } else {
            self.phase = GunPhase::Firing;
        }

        Some(GunShot {
            bullet,
            origin,
            velocity: aim(origin, target, bullet_profile(bullet).speed),
        })
    }
}

/// Straight-line velocity from `origin` toward `target`. Fires straight down
/// when the two coincide.
pub fn aim(origin: Position, target: Position, speed: f32) -> Velocity {
    let dir = (target.to_vec2() - origin.to_vec2()).try_normalize();
    Velocity::from(dir.unwrap_or(Vec2::NEG_Y) * speed)
}
