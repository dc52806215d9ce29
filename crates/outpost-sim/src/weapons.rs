//! Player weapon scheduler — one global fire interval, one shot per armed mount.
//!
//! Cannon tiers are a pure function of the wave number. There is no burst
//! logic on the player side.

use glam::Vec2;

use outpost_core::components::Loadout;
use outpost_core::constants::*;
use outpost_core::enums::{BulletArchetype, BulletDirection, CannonType, Mount};

use crate::governor::Gate;

/// A bullet the player ship wants spawned this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRequest {
    pub mount: Mount,
    pub bullet: BulletArchetype,
    /// Offset from the ship center.
    pub offset: Vec2,
    pub direction: BulletDirection,
}

const MOUNTS: [Mount; 4] = [Mount::Center, Mount::LeftWing, Mount::RightWing, Mount::Tail];

/// Cannon tier fitted to `mount` on `wave`.
pub fn cannon_for_wave(mount: Mount, wave: u32) -> CannonType {
    let w = wave.max(1);
    match mount {
        Mount::Center => match w {
            1..=3 => CannonType::RailGun,
            4..=7 => CannonType::ParticleLaser,
            _ => CannonType::ProtonLaser,
        },
        Mount::LeftWing | Mount::RightWing => match w {
            1..=2 => CannonType::None,
            3..=6 => CannonType::RailGun,
            7..=10 => CannonType::ParticleLaser,
            _ => CannonType::ProtonLaser,
        },
        Mount::Tail => match w {
            1..=4 => CannonType::None,
            5..=8 => CannonType::RailGun,
            9..=12 => CannonType::ParticleLaser,
            _ => CannonType::ProtonLaser,
        },
    }
}

pub fn loadout_for_wave(wave: u32) -> Loadout {
    Loadout {
        center: cannon_for_wave(Mount::Center, wave),
        left_wing: cannon_for_wave(Mount::LeftWing, wave),
        right_wing: cannon_for_wave(Mount::RightWing, wave),
        tail: cannon_for_wave(Mount::Tail, wave),
    }
}

/// Base rate plus one step for every threshold wave reached.
pub fn bullets_per_second(base: f64, wave: u32) -> f64 {
    let steps = PLAYER_FIRE_RATE_THRESHOLDS
        .iter()
        .filter(|&&threshold| wave >= threshold)
        .count();
    base + steps as f64 * PLAYER_FIRE_RATE_STEP
}

fn mount_offset(mount: Mount) -> Vec2 {
    match mount {
        Mount::Center => Vec2::new(0.0, CENTER_MOUNT_OFFSET_Y),
        Mount::LeftWing => Vec2::new(-WING_MOUNT_OFFSET_X, WING_MOUNT_OFFSET_Y),
        Mount::RightWing => Vec2::new(WING_MOUNT_OFFSET_X, WING_MOUNT_OFFSET_Y),
        Mount::Tail => Vec2::new(0.0, TAIL_MOUNT_OFFSET_Y),
    }
}

#[derive(Debug, Clone)]
pub struct PlayerWeaponScheduler {
    gate: Gate,
    loadout: Loadout,
    base_bullets_per_second: f64,
}

impl PlayerWeaponScheduler {
    pub fn new(base_bullets_per_second: f64) -> Self {
        let mut scheduler = Self {
            gate: Gate::new(1.0),
            loadout: Loadout::default(),
            base_bullets_per_second,
        };
        scheduler.arm(1);
        scheduler
    }

    /// Fit the loadout and fire rate for `wave`. The next tick re-seeds the gate.
    pub fn arm(&mut self, wave: u32) {
        self.loadout = loadout_for_wave(wave);
        let bps = bullets_per_second(self.base_bullets_per_second, wave);
        self.gate.set_interval(if bps > 0.0 { 1.0 / bps } else { 0.0 });
        self.gate.reset();
    }

    pub fn loadout(&self) -> Loadout {
        self.loadout
    }

    pub fn interval(&self) -> f64 {
        self.gate.interval()
    }

    pub fn tick(&mut self, now: f64) -> Vec<FireRequest> {
        if !self.gate.should_fire(now) {
            return Vec::new();
        }
        MOUNTS
            .iter()
            .filter_map(|&mount| {
                let bullet = self.loadout.cannon(mount).bullet()?;
                Some(FireRequest {
                    mount,
                    bullet,
                    offset: mount_offset(mount),
                    direction: if mount == Mount::Tail {
                        BulletDirection::Down
                    } else {
                        BulletDirection::Up
                    },
                })
            })
            .collect()
    }
}
