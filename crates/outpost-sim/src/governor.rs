//! Frame governors — minimum-interval gates for independently timed streams.

use std::collections::HashMap;

use outpost_core::constants::{
    ENEMY_FIRE_CHECK_INTERVAL, ENEMY_MOVE_INTERVAL, TRANSITION_STEP_INTERVAL,
};
use outpost_core::enums::{Difficulty, GovernorStream};

/// One minimum-interval gate.
///
/// The first call after a reset only seeds the gate. An interval of zero
/// (or less) fires on every call, the first included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    interval: f64,
    last: Option<f64>,
}

impl Gate {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Change the interval without disturbing the last firing time.
    pub fn set_interval(&mut self, interval: f64) {
        self.interval = interval;
    }

    /// Forget the last firing time; the next call re-seeds.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn should_fire(&mut self, now: f64) -> bool {
        if self.interval <= 0.0 {
            self.last = Some(now);
            return true;
        }
        match self.last {
            None => {
                self.last = Some(now);
                false
            }
            Some(last) if now - last >= self.interval => {
                self.last = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}

/// Gates for every engine-level stream.
#[derive(Debug, Clone)]
pub struct Governor {
    gates: HashMap<GovernorStream, Gate>,
}

impl Governor {
    pub fn new(difficulty: Difficulty) -> Self {
        let mut gates = HashMap::new();
        gates.insert(
            GovernorStream::EnemyMovement,
            Gate::new(ENEMY_MOVE_INTERVAL * difficulty.multiplier()),
        );
        gates.insert(
            GovernorStream::EnemyBullets,
            Gate::new(ENEMY_FIRE_CHECK_INTERVAL),
        );
        gates.insert(
            GovernorStream::ScreenTransition,
            Gate::new(TRANSITION_STEP_INTERVAL),
        );
        Self { gates }
    }

    /// Rescale difficulty-dependent streams.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.set_interval(
            GovernorStream::EnemyMovement,
            ENEMY_MOVE_INTERVAL * difficulty.multiplier(),
        );
    }

    pub fn set_interval(&mut self, stream: GovernorStream, interval: f64) {
        self.gates
            .entry(stream)
            .or_insert_with(|| Gate::new(interval))
            .set_interval(interval);
    }

    pub fn interval(&self, stream: GovernorStream) -> f64 {
        self.gates.get(&stream).map_or(0.0, Gate::interval)
    }

    pub fn should_fire(&mut self, stream: GovernorStream, now: f64) -> bool {
        match self.gates.get_mut(&stream) {
            Some(gate) => gate.should_fire(now),
            None => true,
        }
    }

    pub fn reset_stream(&mut self, stream: GovernorStream) {
        if let Some(gate) = self.gates.get_mut(&stream) {
            gate.reset();
        }
    }

    /// Re-seed every stream.
    pub fn reset(&mut self) {
        for gate in self.gates.values_mut() {
            gate.reset();
        }
    }
}
