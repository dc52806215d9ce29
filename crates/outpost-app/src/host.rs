//! Host-side collaborators: a renderer and audio service that only log, and an
//! autopilot that sweeps the ship across the screen.

use glam::Vec2;

use outpost_core::enums::{RenderArchetype, SoundCue};
use outpost_core::services::{
    AudioService, ChaChaRandom, InputSource, Renderer, Services,
};
use outpost_core::types::{EntityId, Position, Tint, Transform};

/// Logs every render call at `trace` level and counts live sprites.
#[derive(Debug, Default)]
pub struct LoggingRenderer {
    pub live: usize,
}

impl Renderer for LoggingRenderer {
    fn spawn(&mut self, id: EntityId, archetype: RenderArchetype, transform: Transform) {
        self.live += 1;
        log::trace!(
            "spawn {} {:?} at ({:.1}, {:.1})",
            id.0,
            archetype,
            transform.position.x,
            transform.position.y
        );
    }

    fn despawn(&mut self, id: EntityId) {
        self.live = self.live.saturating_sub(1);
        log::trace!("despawn {}", id.0);
    }

    fn update_transform(&mut self, id: EntityId, position: Position, rotation: f32, _tint: Tint) {
        log::trace!(
            "move {} to ({:.1}, {:.1}) rot {:.2}",
            id.0,
            position.x,
            position.y,
            rotation
        );
    }
}

#[derive(Debug, Default)]
pub struct LoggingAudio;

impl AudioService for LoggingAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("play {} at {:.1}", cue.name(), volume);
    }
}

/// Drags the ship back and forth at a constant speed.
#[derive(Debug)]
pub struct Autopilot {
    /// Pixels per call.
    pub step: f32,
    /// Calls before reversing.
    pub sweep: u32,
    calls: u32,
    direction: f32,
}

impl Autopilot {
    pub fn new(step: f32, sweep: u32) -> Self {
        Self {
            step,
            sweep: sweep.max(1),
            calls: 0,
            direction: 1.0,
        }
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(4.0, 90)
    }
}

impl InputSource for Autopilot {
    fn drag_delta(&mut self) -> Vec2 {
        if self.calls >= self.sweep {
            self.calls = 0;
            self.direction = -self.direction;
        }
        self.calls += 1;
        Vec2::new(self.direction * self.step, 0.0)
    }
}

/// Collaborators for the headless host.
pub fn host_services(seed: u64) -> Services {
    Services {
        renderer: Box::new(LoggingRenderer::default()),
        audio: Box::new(LoggingAudio),
        input: Box::new(Autopilot::default()),
        random: Box::new(ChaChaRandom::new(seed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autopilot_reverses() {
        let mut pilot = Autopilot::new(2.0, 3);
        let deltas: Vec<f32> = (0..7).map(|_| pilot.drag_delta().x).collect();
        assert_eq!(deltas, vec![2.0, 2.0, 2.0, -2.0, -2.0, -2.0, 2.0]);
    }

    #[test]
    fn test_autopilot_zero_sweep_still_moves() {
        let mut pilot = Autopilot::new(1.0, 0);
        assert_eq!(pilot.sweep, 1);
        assert_eq!(pilot.drag_delta().x, 1.0);
        assert_eq!(pilot.drag_delta().x, -1.0);
    }

    #[test]
    fn test_logging_renderer_counts() {
        let mut renderer = LoggingRenderer::default();
        let transform = Transform {
            position: Position::new(0.0, 0.0),
            rotation: 0.0,
            tint: Tint::WHITE,
        };
        renderer.spawn(EntityId(1), RenderArchetype::PlayerShip, transform);
        renderer.spawn(EntityId(2), RenderArchetype::PlayerShip, transform);
        renderer.despawn(EntityId(1));
        renderer.despawn(EntityId(9));
        renderer.despawn(EntityId(10));
        assert_eq!(renderer.live, 0);
    }
}
