//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Difficulty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Tap. Starts a game or the next wave depending on the phase.
    PrimaryInput,
    /// Rescales enemy movement at once; spawn delays from the next composed wave.
    SetDifficulty { difficulty: Difficulty },
}
