//! Bonus encounter: survive countdown with health regeneration.
//!
//! A player hit stops regeneration and hides the bonus display, but the
//! countdown keeps running so the wave still ends on time.

use hecs::World;

use outpost_core::components::PlayerShip;
use outpost_core::enums::BonusEndReason;
use outpost_core::events::GameEvent;
use outpost_core::state::BonusView;
use outpost_core::types::Health;

use super::player::update_distress;
use super::Feedback;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusState {
    pub remaining_secs: f64,
    pub regenerating: bool,
    /// Health restored per second while regenerating.
    pub regen_per_sec: f32,
}

impl BonusState {
    /// `fraction` of `max_health` is restored over the full `duration`.
    pub fn new(duration: f64, max_health: f32, fraction: f32) -> Self {
        let regen_per_sec = if duration > 0.0 {
            max_health * fraction / duration as f32
        } else {
            0.0
        };
        Self {
            remaining_secs: duration.max(0.0),
            regenerating: true,
            regen_per_sec,
        }
    }

    pub fn expired(&self) -> bool {
        self.remaining_secs <= 0.0
    }

    /// Stop regenerating. Emits `BonusEnded` the first time only.
    pub fn end_regen(&mut self, reason: BonusEndReason, feedback: &mut Feedback) {
        if !self.regenerating {
            return;
        }
        self.regenerating = false;
        log::debug!("bonus regeneration ended: {reason:?}");
        feedback.event(GameEvent::BonusEnded { reason });
    }

    pub fn view(&self) -> BonusView {
        BonusView {
            remaining_secs: self.remaining_secs,
            regenerating: self.regenerating,
        }
    }
}

/// Count down by `dt` and heal the player while regenerating.
/// Healing above `distress_fraction` clears the distress flag.
/// Returns true once the timer has run out.
pub fn run(
    bonus: &mut BonusState,
    world: &mut World,
    dt: f64,
    distress_fraction: f32,
    feedback: &mut Feedback,
) -> bool {
    bonus.remaining_secs = (bonus.remaining_secs - dt).max(0.0);

    if bonus.regenerating {
        let amount = bonus.regen_per_sec * dt as f32;
        for (_entity, (ship, health)) in world.query_mut::<(&mut PlayerShip, &mut Health)>() {
            health.heal(amount);
            update_distress(ship, health, distress_fraction);
        }
    }

    if bonus.expired() {
        bonus.end_regen(BonusEndReason::TimerExpired, feedback);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use outpost_core::types::Playfield;

    use crate::world_setup::spawn_player;

    #[test]
    fn test_regen_rate() {
        let bonus = BonusState::new(30.0, 100.0, 0.5);
        assert!((bonus.regen_per_sec - 100.0 * 0.5 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_countdown_heals_until_hit() {
        let mut world = World::new();
        let player = spawn_player(&mut world, &Playfield::new(768.0, 1024.0), 100.0, Default::default());
        world.get::<&mut Health>(player).unwrap().current = 50.0;
        let mut feedback = Feedback::default();
        let mut bonus = BonusState::new(30.0, 100.0, 0.5);

        for _ in 0..100 {
            assert!(!run(&mut bonus, &mut world, 0.1, 0.3, &mut feedback));
        }
        assert!((bonus.remaining_secs - 20.0).abs() < 1e-6);
        let healed = world.get::<&Health>(player).unwrap().current;
        assert!((healed - (50.0 + 10.0 * 100.0 * 0.5 / 30.0)).abs() < 1e-3);

        bonus.end_regen(BonusEndReason::PlayerHit, &mut feedback);
        run(&mut bonus, &mut world, 1.0, 0.3, &mut feedback);
        assert_eq!(world.get::<&Health>(player).unwrap().current, healed);
        assert!((bonus.remaining_secs - 19.0).abs() < 1e-6, "countdown continues");
        assert_eq!(
            feedback.events,
            vec![GameEvent::BonusEnded {
                reason: BonusEndReason::PlayerHit
            }]
        );
    }

    #[test]
    fn test_expiry() {
        let mut world = World::new();
        let mut feedback = Feedback::default();
        let mut bonus = BonusState::new(1.0, 100.0, 0.5);
        assert!(!run(&mut bonus, &mut world, 0.5, 0.3, &mut feedback));
        assert!(run(&mut bonus, &mut world, 0.6, 0.3, &mut feedback));
        assert_eq!(bonus.remaining_secs, 0.0);
        assert!(!bonus.regenerating);
    }
    #[test]
    fn test_regeneration_clears_distress() {
        let mut world = World::new();
        let player = spawn_player(&mut world, &Playfield::new(768.0, 1024.0), 100.0, Default::default());
        world.get::<&mut Health>(player).unwrap().current = 20.0;
        world.get::<&mut PlayerShip>(player).unwrap().distressed = true;
        let mut feedback = Feedback::default();
        let mut bonus = BonusState::new(30.0, 100.0, 0.5);

        for _ in 0..290 {
            run(&mut bonus, &mut world, 0.1, 0.3, &mut feedback);
        }
        let health = *world.get::<&Health>(player).unwrap();
        assert!(health.fraction() > 0.6);
        assert!(!world.get::<&PlayerShip>(player).unwrap().distressed);
    }
}
