//! Running score state tracked by the engine.

/// Score and funds for the current game. Reset on new game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreState {
    pub score: u64,
    pub funds: u64,
    pub enemies_destroyed: u32,
}

impl ScoreState {
    /// Credit one enemy death.
    pub fn award(&mut self, score: u32, funds: u32) {
        self.score += u64::from(score);
        self.funds += u64::from(funds);
        self.enemies_destroyed += 1;
    }
}
