//! ECS components for hecs entities.
//!
//! Components are plain data. Behaviour lives in systems and in `outpost-ai`.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Contact proxy shared by every collidable entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub kind: EntityKind,
    /// Circle radius (px).
    pub radius: f32,
    /// Damage dealt to whatever this entity touches.
    pub damage: i32,
    pub size: SizeClass,
}

/// Cannon fitted to each hardpoint. The center mount is always armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub center: CannonType,
    pub left_wing: CannonType,
    pub right_wing: CannonType,
    pub tail: CannonType,
}

/// Marker + state for the single player ship.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerShip {
    pub loadout: Loadout,
    /// Venting plasma below the distress threshold.
    pub distressed: bool,
}

/// Inert-until-delay spawn bookkeeping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Seconds after `spawn_time` before the enemy becomes active.
    pub delay: f64,
    pub spawn_time: f64,
    pub spawned: bool,
}

/// Per-enemy record. One record type for all archetypes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyState {
    pub archetype: EnemyArchetype,
    pub score: u32,
    pub funds: u32,
    /// Extra respawns remaining.
    pub lives: u32,
    pub spawn: SpawnTimer,
}

/// Bullet record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub archetype: BulletArchetype,
    pub direction: BulletDirection,
    /// Has its own health pool and survives hits until it runs out.
    pub absorbs_hits: bool,
}

/// Render archetype attached at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderKey(pub RenderArchetype);

impl Loadout {
    /// Cannon currently fitted to `mount`.
    pub fn cannon(&self, mount: Mount) -> CannonType {
        match mount {
            Mount::Center => self.center,
            Mount::LeftWing => self.left_wing,
            Mount::RightWing => self.right_wing,
            Mount::Tail => self.tail,
        }
    }
}

impl SpawnTimer {
    pub fn new(delay: f64, spawn_time: f64) -> Self {
        Self {
            delay: delay.max(0.0),
            spawn_time,
            spawned: false,
        }
    }

    /// Activate once the delay has elapsed. A zero delay activates immediately.
    /// Returns true on the tick the enemy becomes active.
    pub fn activate(&mut self, now: f64) -> bool {
        if self.spawned {
            return false;
        }
        if self.delay <= 0.0 || now - self.spawn_time > self.delay {
            self.spawned = true;
            return true;
        }
        false
    }

    /// Go inert again, re-running the same delay from `now`.
    pub fn rearm(&mut self, now: f64) {
        self.spawn_time = now;
        self.spawned = false;
    }
}
