//! Collaborator interfaces the simulation talks to.
//!
//! All calls are fire-and-forget. Implementations must not call back into the engine.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::enums::{RenderArchetype, SoundCue};
use crate::types::{EntityId, Position, Tint, Transform};

pub trait Renderer: Send {
    fn spawn(&mut self, id: EntityId, archetype: RenderArchetype, transform: Transform);
    fn despawn(&mut self, id: EntityId);
    fn update_transform(&mut self, id: EntityId, position: Position, rotation: f32, tint: Tint);
}

pub trait AudioService: Send {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

pub trait InputSource: Send {
    /// Drag movement accumulated since the last call (px).
    fn drag_delta(&mut self) -> Vec2;
}

pub trait RandomSource: Send {
    /// Uniform sample in `[min, max)`. Returns `min` when the range is empty.
    fn uniform(&mut self, min: f64, max: f64) -> f64;
}

/// The four collaborators, boxed for injection.
pub struct Services {
    pub renderer: Box<dyn Renderer>,
    pub audio: Box<dyn AudioService>,
    pub input: Box<dyn InputSource>,
    pub random: Box<dyn RandomSource>,
}

impl Services {
    /// No rendering, no audio, no input, seeded randomness.
    pub fn headless(seed: u64) -> Self {
        Self {
            renderer: Box::new(NullRenderer),
            audio: Box::new(NullAudio),
            input: Box::new(StillInput),
            random: Box::new(ChaChaRandom::new(seed)),
        }
    }
}

pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn spawn(&mut self, _id: EntityId, _archetype: RenderArchetype, _transform: Transform) {}
    fn despawn(&mut self, _id: EntityId) {}
    fn update_transform(&mut self, _id: EntityId, _position: Position, _rotation: f32, _tint: Tint) {
    }
}

pub struct NullAudio;

impl AudioService for NullAudio {
    fn play(&mut self, _cue: SoundCue, _volume: f32) {}
}

/// Input that never moves.
pub struct StillInput;

impl InputSource for StillInput {
    fn drag_delta(&mut self) -> Vec2 {
        Vec2::ZERO
    }
}

/// Deterministic random source over ChaCha8.
pub struct ChaChaRandom {
    rng: ChaCha8Rng,
}

impl ChaChaRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for ChaChaRandom {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if !(max > min) {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}
