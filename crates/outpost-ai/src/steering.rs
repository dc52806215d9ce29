//! Seek/arrival steering toward a waypoint.
//!
//! Plain data, no ECS dependency. The sim attaches one controller per enemy
//! and steps it on the enemy movement governor.

use glam::Vec2;
use outpost_core::constants::{ARRIVAL_RADIUS, WAYPOINT_EPSILON};
use outpost_core::types::{Position, Velocity};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SteeringState {
    #[default]
    Seeking,
    Arrived,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringController {
    pub state: SteeringState,
    pub waypoint: Position,
    /// Current velocity (px/s).
    pub velocity: Vec2,
    pub max_speed: f32,
    /// Largest velocity change per step.
    pub max_force: f32,
}

impl SteeringController {
    pub fn new(waypoint: Position, max_speed: f32, max_force: f32) -> Self {
        Self {
            state: SteeringState::Seeking,
            waypoint,
            velocity: Vec2::ZERO,
            max_speed,
            max_force,
        }
    }

    /// Advance one step of `delta` seconds and return the new position.
    pub fn update(&mut self, position: Position, delta: f32) -> Position {
        let offset = self.waypoint.to_vec2() - position.to_vec2();
        let distance = offset.length();
        if distance == 0.0 {
            self.state = SteeringState::Arrived;
            return position;
        }

        let mut desired_speed = self.max_speed;
        if distance < ARRIVAL_RADIUS {
            desired_speed *= distance / ARRIVAL_RADIUS;
        }
        let desired = offset / distance * desired_speed;
        let steering = (desired - self.velocity).clamp_length_max(self.max_force);
        self.velocity = (self.velocity + steering).clamp_length_max(self.max_speed);

        let next = Position::from(position.to_vec2() + self.velocity * delta);
        if self.waypoint_reached(next) {
            self.state = SteeringState::Arrived;
        }
        next
    }

    pub fn waypoint_reached(&self, position: Position) -> bool {
        position.distance_to(&self.waypoint) < WAYPOINT_EPSILON
    }

    /// Retarget and resume seeking.
    pub fn update_waypoint(&mut self, waypoint: Position) {
        self.waypoint = waypoint;
        self.state = SteeringState::Seeking;
    }

    pub fn is_arrived(&self) -> bool {
        self.state == SteeringState::Arrived
    }

    pub fn current_velocity(&self) -> Velocity {
        Velocity::from(self.velocity)
    }
}
