//! Injectable randomness for board generation and dice.
//!
//! The engine never reaches for a global generator. Callers hand in a
//! [`RandomSource`]: any `rand::Rng` works as-is, and [`ScriptedRandom`]
//! replays a fixed sequence for deterministic tests.

use std::collections::VecDeque;
use tracing::instrument;

/// Source of uniform random draws.
pub trait RandomSource {
    /// Returns a uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Returns a uniform integer in `[low, high]`.
    ///
    /// Callers guarantee `low <= high`.
    fn next_in_range(&mut self, low: usize, high: usize) -> usize;
}

impl<R: rand::Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        self.random_range(low..=high)
    }
}

/// One pre-recorded draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    /// Answer to [`RandomSource::next_unit`].
    Unit(f64),
    /// Answer to [`RandomSource::next_in_range`], clamped into the range.
    Int(usize),
}

/// Replays a recorded sequence of draws.
///
/// Unit draws are clamped into `[0, 1)` and integer draws into the requested
/// range, so a script can never push the engine outside its contracts. When
/// the script runs dry, unit draws return `0.99` (a normal cell at any
/// density below that) and integer draws return `low`. A draw of the wrong
/// kind is skipped over by the same fallback.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<Draw>,
}

impl ScriptedRandom {
    /// Creates a source that replays `draws` in order.
    #[instrument(skip(draws))]
    pub fn new(draws: impl IntoIterator<Item = Draw>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Appends a unit draw.
    pub fn push_unit(&mut self, value: f64) -> &mut Self {
        self.draws.push_back(Draw::Unit(value));
        self
    }

    /// Appends an integer draw.
    pub fn push_int(&mut self, value: usize) -> &mut Self {
        self.draws.push_back(Draw::Int(value));
        self
    }

    /// Number of draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

const EXHAUSTED_UNIT: f64 = 0.99;
const MAX_UNIT: f64 = 1.0 - f64::EPSILON;

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        match self.draws.pop_front() {
            Some(Draw::Unit(value)) if value.is_finite() => value.clamp(0.0, MAX_UNIT),
            _ => EXHAUSTED_UNIT,
        }
    }

    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        match self.draws.pop_front() {
            Some(Draw::Int(value)) => value.clamp(low, high),
            _ => low,
        }
    }
}
