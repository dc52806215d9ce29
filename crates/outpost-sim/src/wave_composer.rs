//! Wave composer — turns the declarative wave table into squads for one wave.
//!
//! Every `bonus_wave_interval`-th wave is first played as a swarmer-only bonus
//! encounter. The bonus rewinds the wave counter by one, so the next advance
//! reaches the same numeric wave again and composes it normally.

use outpost_core::config::{EnemyWaveSpec, GameConfig, WaveTable, WaveTableEntry};
use outpost_core::constants::*;
use outpost_core::enums::{Difficulty, EnemyArchetype, GunType};

use outpost_ai::profiles::get_profile;

/// Everything needed to start one wave.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedWave {
    /// Numeric wave that was composed (before any rewind).
    pub wave: u32,
    pub squads: Vec<EnemyWaveSpec>,
    /// Survive timer for bonus encounters.
    pub bonus_secs: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct WaveComposer {
    table: WaveTable,
    bonus_interval: u32,
    bonus_secs: f64,
    /// Numeric wave whose bonus encounter has already been played.
    bonus_played: Option<u32>,
}

impl ComposedWave {
    pub fn is_bonus(&self) -> bool {
        self.bonus_secs.is_some()
    }

    pub fn enemy_count(&self) -> u32 {
        self.squads.iter().map(|s| s.count).sum()
    }
}

impl WaveComposer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            table: config.wave_table.clone(),
            bonus_interval: config.bonus_wave_interval,
            bonus_secs: config.bonus_time_secs,
            bonus_played: None,
        }
    }

    /// Forget played bonus waves (new game).
    pub fn reset(&mut self) {
        self.bonus_played = None;
    }

    pub fn is_bonus_wave(&self, wave: u32) -> bool {
        self.bonus_interval > 0 && wave > 0 && wave % self.bonus_interval == 0
    }

    /// Compose `wave`. A fresh bonus wave rewinds `wave` by one.
    pub fn compose(&mut self, wave: &mut u32, difficulty: Difficulty) -> ComposedWave {
        let numeric = *wave;
        if self.is_bonus_wave(numeric) && self.bonus_played != Some(numeric) {
            self.bonus_played = Some(numeric);
            *wave = numeric - 1;
            return ComposedWave {
                wave: numeric,
                squads: vec![self.bonus_squad(numeric, difficulty)],
                bonus_secs: Some(self.bonus_secs),
            };
        }

        ComposedWave {
            wave: numeric,
            squads: self.compose_normal(numeric, difficulty),
            bonus_secs: None,
        }
    }

    /// Apply the table to `wave`, skipping rows that have not appeared yet.
    pub fn compose_normal(&self, wave: u32, difficulty: Difficulty) -> Vec<EnemyWaveSpec> {
        self.table
            .entries
            .iter()
            .filter(|entry| wave >= entry.first_appear_wave)
            .map(|entry| squad_for(entry, wave, difficulty))
            .filter(|squad| squad.count > 0)
            .collect()
    }

    fn bonus_squad(&self, wave: u32, difficulty: Difficulty) -> EnemyWaveSpec {
        let bonus_index = wave / self.bonus_interval.max(1);
        let count = (BONUS_SWARMER_BASE + BONUS_SWARMER_PER_BONUS * bonus_index.saturating_sub(1))
            .min(BONUS_SWARMER_MAX);

        let base_hp = get_profile(EnemyArchetype::Swarmer).base_hp;
        let starting_hp = self
            .table
            .entries
            .iter()
            .find(|e| e.archetype == EnemyArchetype::Swarmer && wave >= e.first_appear_wave)
            .map_or(base_hp, |e| scaled_hp(base_hp, e, wave));

        let scale = difficulty.multiplier();
        EnemyWaveSpec {
            archetype: EnemyArchetype::Swarmer,
            count,
            starting_hp,
            lives: BONUS_ENEMY_LIVES,
            min_spawn_delay: 0.0,
            spawn_jitter: BONUS_SPAWN_JITTER * scale,
            gun: GunType::RailGun,
            title: Some("BONUS WAVE: SURVIVE".to_string()),
            title_delay: 0.0,
        }
    }
}

fn scaled_hp(base_hp: f32, entry: &WaveTableEntry, wave: u32) -> f32 {
    let waves_in = wave.saturating_sub(entry.first_appear_wave) as f32;
    let hp = base_hp * (1.0 + waves_in * entry.hp_strength_multiplier);
    debug_assert!(hp.is_finite() && hp > 0.0, "{:?} hp {hp} at wave {wave}", entry.archetype);
    if !(hp.is_finite() && hp > 0.0) {
        log::warn!("{:?} hp {hp} at wave {wave}, using base {base_hp}", entry.archetype);
        return base_hp;
    }
    hp
}

fn squad_for(entry: &WaveTableEntry, wave: u32, difficulty: Difficulty) -> EnemyWaveSpec {
    debug_assert!(entry.validate().is_ok(), "unvalidated wave table row {entry:?}");
    let waves_in = wave.saturating_sub(entry.first_appear_wave);
    let growth = waves_in / entry.levels_per_additional.max(1);
    let count = match entry.starting_count.checked_add(growth) {
        Some(count) => count.min(entry.max_count),
        None => {
            log::warn!(
                "{:?} count overflowed at wave {wave}, capped at {}",
                entry.archetype,
                entry.max_count
            );
            entry.max_count
        }
    };
    let lives = if wave >= entry.lives_threshold_wave {
        (waves_in / entry.levels_per_life.max(1)).min(entry.max_additional_lives)
    } else {
        0
    };
    let scale = difficulty.multiplier();

    EnemyWaveSpec {
        archetype: entry.archetype,
        count,
        starting_hp: scaled_hp(get_profile(entry.archetype).base_hp, entry, wave),
        lives,
        min_spawn_delay: entry.min_spawn_delay * scale,
        spawn_jitter: entry.spawn_jitter * scale,
        gun: entry.gun,
        title: entry.title.clone(),
        title_delay: entry.title_delay,
    }
}
