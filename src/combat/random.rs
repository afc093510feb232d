//! Random source threaded through every resolver
//!
//! Resolvers never reach for a thread-local RNG. Production code passes a
//! seeded `ChaCha8Rng`; tests pass [`ScriptedRolls`] to force exact outcomes.

use rand::{Rng, RngCore};

pub trait RandomSource {
    /// Next value in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[lo, hi)`
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of unit values, wrapping around when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRolls {
    /// Values are clamped into `[0, 1)`; an empty list behaves as `[0.5]`
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values: Vec<f64> = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        if values.is_empty() {
            values.push(0.5);
        }
        Self { values, cursor: 0 }
    }

    /// Attacker samples at the top of the range, defender at the bottom
    pub fn attacker_sweeps() -> Self {
        Self::new([0.99, 0.0])
    }

    /// Defender samples at the top of the range, attacker at the bottom
    pub fn defender_sweeps() -> Self {
        Self::new([0.0, 0.99])
    }

    /// Draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
