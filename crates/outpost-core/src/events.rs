//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Gameplay events drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// A wave was composed and its enemies placed.
    WaveStarted { wave: u32, bonus: bool, enemies: u32 },
    /// An enemy lost a life. `respawning` is false when it was its last.
    EnemyDestroyed {
        archetype: EnemyArchetype,
        score: u32,
        funds: u32,
        respawning: bool,
    },
    PlayerHit { damage: i32, health: f32 },
    /// White-out overlay; duration scales with damage.
    ScreenFlash { duration_secs: f64 },
    /// Player ship crossed below the distress threshold.
    DistressStarted,
    /// Banner text, shown once per wave.
    Announcement { text: String },
    BonusEnded { reason: BonusEndReason },
    GameOver { score: u64, wave: u32 },
}

/// A sound cue queued for the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundEvent {
    pub cue: SoundCue,
    pub volume: f32,
}

impl SoundEvent {
    pub fn new(cue: SoundCue) -> Self {
        use crate::constants::{CUE_VOLUME, EXPLODE_VOLUME, LASER_VOLUME};
        let volume = match cue {
            SoundCue::Laser => LASER_VOLUME,
            SoundCue::Explode => EXPLODE_VOLUME,
            SoundCue::LevelComplete | SoundCue::GameOver => CUE_VOLUME,
        };
        Self { cue, volume }
    }
}

/// Duration of the damage flash for a hit of `damage`.
pub fn screen_flash_secs(damage: i32) -> f64 {
    use crate::constants::{SCREEN_FLASH_DEFAULT_SECS, SCREEN_FLASH_SECS};
    match damage {
        1..=4 => SCREEN_FLASH_SECS[(damage - 1) as usize],
        _ => SCREEN_FLASH_DEFAULT_SECS,
    }
}
