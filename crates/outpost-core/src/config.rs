//! Game configuration, loadable from JSON.
//!
//! Every field has a default, so a partial document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Difficulty, EnemyArchetype, GunType};
use crate::error::{ConfigError, WaveEntryFault};
use crate::types::Playfield;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub hud_height: f32,
    pub margin: f32,
    pub difficulty: Difficulty,
    /// Wave the first game starts on.
    pub starting_wave: u32,
    pub bonus_wave_interval: u32,
    pub bonus_time_secs: f64,
    /// Fraction of max health restored over a full bonus timer.
    pub bonus_regen_fraction: f32,
    pub min_transition_secs: f64,
    pub player_max_health: f32,
    pub distress_fraction: f32,
    pub base_bullets_per_second: f64,
    /// Seed for the default random source.
    pub seed: u64,
    pub wave_table: WaveTable,
}

/// Declarative enemy composition rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveTable {
    pub entries: Vec<WaveTableEntry>,
}

/// One batch of one archetype. Several rows may share an archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveTableEntry {
    pub archetype: EnemyArchetype,
    pub first_appear_wave: u32,
    pub starting_count: u32,
    /// Waves between each extra enemy.
    pub levels_per_additional: u32,
    pub max_count: u32,
    /// Fractional HP growth per wave past `first_appear_wave`.
    pub hp_strength_multiplier: f32,
    /// Waves between each extra life.
    pub levels_per_life: u32,
    pub max_additional_lives: u32,
    /// No extra lives before this wave.
    pub lives_threshold_wave: u32,
    pub min_spawn_delay: f64,
    pub spawn_jitter: f64,
    pub gun: GunType,
    /// One-shot banner shown `title_delay` seconds into the wave.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_delay: f64,
}

/// One composed squad, ready to be spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyWaveSpec {
    pub archetype: EnemyArchetype,
    pub count: u32,
    pub starting_hp: f32,
    pub lives: u32,
    pub min_spawn_delay: f64,
    pub spawn_jitter: f64,
    pub gun: GunType,
    pub title: Option<String>,
    pub title_delay: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: DEFAULT_PLAYFIELD_WIDTH,
            playfield_height: DEFAULT_PLAYFIELD_HEIGHT,
            hud_height: HUD_HEIGHT,
            margin: PLAYFIELD_MARGIN,
            difficulty: Difficulty::Normal,
            starting_wave: DEFAULT_STARTING_WAVE,
            bonus_wave_interval: BONUS_WAVE_INTERVAL,
            bonus_time_secs: BONUS_TIME_SECS,
            bonus_regen_fraction: BONUS_REGEN_FRACTION,
            min_transition_secs: MIN_TRANSITION_SECS,
            player_max_health: PLAYER_MAX_HEALTH,
            distress_fraction: PLAYER_DISTRESS_FRACTION,
            base_bullets_per_second: PLAYER_BASE_BULLETS_PER_SECOND,
            seed: 0x5EED_0F_0B05,
            wave_table: WaveTable::default(),
        }
    }
}

impl Default for WaveTable {
    fn default() -> Self {
        use EnemyArchetype::*;
        Self {
            entries: vec![
                WaveTableEntry {
                    archetype: Scout,
                    first_appear_wave: 1,
                    starting_count: 5,
                    levels_per_additional: 1,
                    max_count: 15,
                    hp_strength_multiplier: 0.2,
                    levels_per_life: 5,
                    max_additional_lives: 2,
                    lives_threshold_wave: 6,
                    min_spawn_delay: 0.0,
                    spawn_jitter: 3.0,
                    gun: GunType::None,
                    title: None,
                    title_delay: 0.0,
                },
                WaveTableEntry {
                    archetype: Scout,
                    first_appear_wave: 3,
                    starting_count: 2,
                    levels_per_additional: 2,
                    max_count: 8,
                    hp_strength_multiplier: 0.2,
                    levels_per_life: 5,
                    max_additional_lives: 1,
                    lives_threshold_wave: 8,
                    min_spawn_delay: 8.0,
                    spawn_jitter: 4.0,
                    gun: GunType::None,
                    title: Some("SCOUTS INBOUND".to_string()),
                    title_delay: 8.0,
                },
                WaveTableEntry {
                    archetype: Fighter,
                    first_appear_wave: 2,
                    starting_count: 1,
                    levels_per_additional: 2,
                    max_count: 8,
                    hp_strength_multiplier: 0.25,
                    levels_per_life: 6,
                    max_additional_lives: 2,
                    lives_threshold_wave: 8,
                    min_spawn_delay: 2.0,
                    spawn_jitter: 6.0,
                    gun: GunType::RailGun,
                    title: None,
                    title_delay: 0.0,
                },
                WaveTableEntry {
                    archetype: Swarmer,
                    first_appear_wave: 4,
                    starting_count: 3,
                    levels_per_additional: 1,
                    max_count: 12,
                    hp_strength_multiplier: 0.15,
                    levels_per_life: 5,
                    max_additional_lives: 2,
                    lives_threshold_wave: 9,
                    min_spawn_delay: 5.0,
                    spawn_jitter: 5.0,
                    gun: GunType::RailGun,
                    title: Some("SWARM DETECTED".to_string()),
                    title_delay: 5.0,
                },
                WaveTableEntry {
                    archetype: AdvancedSwarmer,
                    first_appear_wave: 7,
                    starting_count: 2,
                    levels_per_additional: 2,
                    max_count: 8,
                    hp_strength_multiplier: 0.2,
                    levels_per_life: 6,
                    max_additional_lives: 2,
                    lives_threshold_wave: 12,
                    min_spawn_delay: 10.0,
                    spawn_jitter: 5.0,
                    gun: GunType::RailGun,
                    title: None,
                    title_delay: 0.0,
                },
                WaveTableEntry {
                    archetype: AdvancedFighter,
                    first_appear_wave: 11,
                    starting_count: 1,
                    levels_per_additional: 4,
                    max_count: 3,
                    hp_strength_multiplier: 0.3,
                    levels_per_life: 8,
                    max_additional_lives: 1,
                    lives_threshold_wave: 15,
                    min_spawn_delay: 15.0,
                    spawn_jitter: 5.0,
                    gun: GunType::RailGun,
                    title: Some("WARNING: HEAVY FIGHTER".to_string()),
                    title_delay: 15.0,
                },
                WaveTableEntry {
                    archetype: AdvancedBomber,
                    first_appear_wave: 13,
                    starting_count: 1,
                    levels_per_additional: 5,
                    max_count: 3,
                    hp_strength_multiplier: 0.3,
                    levels_per_life: 8,
                    max_additional_lives: 1,
                    lives_threshold_wave: 16,
                    min_spawn_delay: 20.0,
                    spawn_jitter: 5.0,
                    gun: GunType::StaticGun,
                    title: Some("WARNING: BOMBER".to_string()),
                    title_delay: 20.0,
                },
            ],
        }
    }
}

impl WaveTableEntry {
    /// A single enemy from wave 1 with no growth, no extra lives and no delay.
    pub fn base(archetype: EnemyArchetype) -> Self {
        Self {
            archetype,
            first_appear_wave: 1,
            starting_count: 1,
            levels_per_additional: 1,
            max_count: 1,
            hp_strength_multiplier: 0.0,
            levels_per_life: 1,
            max_additional_lives: 0,
            lives_threshold_wave: 1,
            min_spawn_delay: 0.0,
            spawn_jitter: 0.0,
            gun: GunType::None,
            title: None,
            title_delay: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), WaveEntryFault> {
        if self.first_appear_wave == 0 {
            return Err(WaveEntryFault::ZeroFirstAppearWave);
        }
        if self.levels_per_additional == 0 {
            return Err(WaveEntryFault::ZeroLevelsPerAdditional);
        }
        if self.levels_per_life == 0 {
            return Err(WaveEntryFault::ZeroLevelsPerLife);
        }
        if self.starting_count > self.max_count {
            return Err(WaveEntryFault::StartExceedsMax {
                starting: self.starting_count,
                max: self.max_count,
            });
        }
        for (field, value) in [
            ("min_spawn_delay", self.min_spawn_delay),
            ("spawn_jitter", self.spawn_jitter),
            ("title_delay", self.title_delay),
        ] {
            if !(value >= 0.0) {
                return Err(WaveEntryFault::NegativeDelay { field, value });
            }
        }
        if !(self.hp_strength_multiplier >= 0.0) {
            return Err(WaveEntryFault::NegativeMultiplier {
                value: self.hp_strength_multiplier as f64,
            });
        }
        Ok(())
    }
}

impl WaveTable {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, entry) in self.entries.iter().enumerate() {
            entry
                .validate()
                .map_err(|fault| ConfigError::InvalidWaveEntry { index, fault })?;
        }
        Ok(())
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let usable_w = self.playfield_width - 2.0 * self.margin;
        let usable_h = self.playfield_height - self.hud_height - 2.0 * self.margin;
        if !(usable_w > 0.0 && usable_h > 0.0) || self.margin < 0.0 || self.hud_height < 0.0 {
            return Err(ConfigError::InvalidPlayfield {
                width: self.playfield_width,
                height: self.playfield_height,
            });
        }

        for (field, value) in [
            ("starting_wave", self.starting_wave as f64),
            ("bonus_wave_interval", self.bonus_wave_interval as f64),
            ("bonus_time_secs", self.bonus_time_secs),
            ("player_max_health", self.player_max_health as f64),
            ("base_bullets_per_second", self.base_bullets_per_second),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value, min, max) in [
            ("bonus_regen_fraction", self.bonus_regen_fraction as f64, 0.0, 1.0),
            ("distress_fraction", self.distress_fraction as f64, 0.0, 1.0),
            ("min_transition_secs", self.min_transition_secs, 0.0, f64::MAX),
        ] {
            if !(value >= min && value <= max) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }

        self.wave_table.validate()
    }

    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.playfield_width,
            height: self.playfield_height,
            hud_height: self.hud_height,
            margin: self.margin,
        }
    }
}
