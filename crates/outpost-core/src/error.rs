//! Configuration errors.

use core::fmt;

/// What is wrong with a single wave table row.
#[derive(Clone, Debug, PartialEq)]
pub enum WaveEntryFault {
    ZeroFirstAppearWave,
    ZeroLevelsPerAdditional,
    ZeroLevelsPerLife,
    StartExceedsMax { starting: u32, max: u32 },
    NegativeDelay { field: &'static str, value: f64 },
    NegativeMultiplier { value: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse(String),
    /// The screen leaves no playable area once HUD and margins are removed.
    InvalidPlayfield { width: f32, height: f32 },
    /// A field that must be strictly positive is not.
    NonPositive { field: &'static str, value: f64 },
    /// A field lies outside its allowed range.
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    InvalidWaveEntry { index: usize, fault: WaveEntryFault },
}

impl fmt::Display for WaveEntryFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFirstAppearWave => write!(f, "first_appear_wave must be at least 1"),
            Self::ZeroLevelsPerAdditional => {
                write!(f, "levels_per_additional must be at least 1")
            }
            Self::ZeroLevelsPerLife => write!(f, "levels_per_life must be at least 1"),
            Self::StartExceedsMax { starting, max } => {
                write!(f, "starting_count {starting} exceeds max_count {max}")
            }
            Self::NegativeDelay { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            Self::NegativeMultiplier { value } => {
                write!(f, "hp_strength_multiplier must not be negative (got {value})")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::InvalidPlayfield { width, height } => {
                write!(f, "playfield {width}x{height} has no playable area")
            }
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be within {min}..={max} (got {value})"),
            Self::InvalidWaveEntry { index, fault } => {
                write!(f, "wave table entry {index}: {fault}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
