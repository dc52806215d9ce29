//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in playfield space (pixels).
/// Origin is the bottom-left corner, y grows upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// 2D velocity in playfield space (px/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Stable identifier handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Simulation time tracking. `now` is the host's wall clock in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of `on_tick` calls processed.
    pub frame: u64,
    /// Timestamp of the current frame.
    pub now: f64,
    /// Seconds since the previous frame, clamped to `MAX_FRAME_DT`.
    pub dt: f64,
}

/// Health pool shared by ships and the static-gun bullet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// RGBA tint passed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Placement handed to the renderer when an entity first appears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Position,
    /// Radians, 0 = facing up.
    pub rotation: f32,
    pub tint: Tint,
}

/// Axis-aligned rectangle in playfield space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

/// Screen dimensions plus the derived playable area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Height reserved at the top for the HUD.
    pub hud_height: f32,
    /// Border kept clear on every side.
    pub margin: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f32 {
        self.to_vec2().distance(other.to_vec2())
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn speed(&self) -> f32 {
        self.to_vec2().length()
    }

    /// Heading in radians, 0 = straight up, clockwise positive.
    pub fn heading(&self) -> f32 {
        if self.x == 0.0 && self.y == 0.0 {
            return 0.0;
        }
        self.x.atan2(self.y)
    }
}

impl From<Vec2> for Velocity {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl SimTime {
    /// Advance to a new host timestamp. Time never runs backwards.
    pub fn advance(&mut self, now: f64) {
        let previous = if self.frame == 0 { now } else { self.now };
        self.dt = (now - previous).clamp(0.0, crate::constants::MAX_FRAME_DT);
        self.now = now.max(self.now);
        self.frame += 1;
    }
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtract damage, flooring at zero. Returns true if this hit depleted the pool.
    pub fn apply_damage(&mut self, damage: f32) -> bool {
        let damage = checked_amount(damage, "damage");
        let was_alive = !self.is_depleted();
        self.current = (self.current - damage).max(0.0);
        was_alive && self.is_depleted()
    }

    /// Add health, capped at `max`.
    pub fn heal(&mut self, amount: f32) {
        let amount = checked_amount(amount, "heal");
        self.current = (self.current + amount).min(self.max);
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

/// Health changes must be finite and non-negative. Anything else counts as zero.
fn checked_amount(amount: f32, kind: &str) -> f32 {
    let valid = amount.is_finite() && amount >= 0.0;
    debug_assert!(valid, "invalid {kind} amount {amount}");
    if !valid {
        log::warn!("invalid {kind} amount {amount}, treated as 0");
        return 0.0;
    }
    amount
}

impl Tint {
    pub const WHITE: Tint = Tint {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Green at full health fading through yellow to red.
    pub fn from_health_fraction(fraction: f32) -> Self {
        let f = fraction.clamp(0.0, 1.0);
        Self {
            r: (2.0 * (1.0 - f)).min(1.0),
            g: (2.0 * f).min(1.0),
            b: 0.0,
            a: 1.0,
        }
    }
}

impl Rect {
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Clamp a point into the rectangle.
    pub fn clamp(&self, p: Position) -> Position {
        Position::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y.clamp(self.min_y, self.max_y),
        )
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Rect {
        Rect {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            hud_height: crate::constants::HUD_HEIGHT,
            margin: crate::constants::PLAYFIELD_MARGIN,
        }
    }

    /// The area the player may occupy.
    pub fn playable(&self) -> Rect {
        let min_x = self.margin;
        let min_y = self.margin;
        let max_x = (self.width - self.margin).max(min_x);
        let max_y = (self.height - self.hud_height - self.margin).max(min_y);
        Rect {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The whole screen, HUD included.
    pub fn screen(&self) -> Rect {
        Rect {
            min_x: 0.0,
            min_y: 0.0,
            max_x: self.width,
            max_y: self.height,
        }
    }

    /// Where the player ship starts each wave.
    pub fn start_point(&self) -> Position {
        Position::new(self.width / 2.0, crate::constants::PLAYER_START_Y)
    }

    /// Altitude enemies spawn and respawn at, above the playable area.
    pub fn spawn_altitude(&self) -> f32 {
        self.playable().max_y + crate::constants::ENEMY_SPAWN_HEIGHT
    }
}
