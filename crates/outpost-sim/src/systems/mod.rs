//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They never call collaborators; feedback goes into a [`Feedback`] buffer the
//! engine drains at the end of the tick.

use outpost_core::enums::SoundCue;
use outpost_core::events::{GameEvent, SoundEvent};

pub mod bonus;
pub mod bullets;
pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod enemy_fire;
pub mod player;
pub mod render;
pub mod snapshot;

/// Events and sound cues produced during one tick.
#[derive(Debug, Default)]
pub struct Feedback {
    pub events: Vec<GameEvent>,
    pub sounds: Vec<SoundEvent>,
}

impl Feedback {
    pub fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, cue: SoundCue) {
        self.sounds.push(SoundEvent::new(cue));
    }

    /// Queue `cue` unless it is already queued this tick.
    pub fn sound_once(&mut self, cue: SoundCue) {
        if !self.sounds.iter().any(|s| s.cue == cue) {
            self.sound(cue);
        }
    }

    pub fn take(&mut self) -> (Vec<GameEvent>, Vec<SoundEvent>) {
        (
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.sounds),
        )
    }
}
