//! The single randomness seam of the crate.
//!
//! Every randomized decision (size multiplier, cue choice, particle velocity, particle hue)
//! draws from a [`RandomSource`], so a session can be replayed from a seed or driven by a
//! fixed sequence in tests.

use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

/// Source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[lo, hi)`; returns `lo` when the range is empty.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_unit()
    }

    /// Uniform index in `0..len`; `len` must be > 0.
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let i = (self.next_unit() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }
}

/// Seeded pseudo-random source backed by `rand`'s `StdRng`.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Deterministic source that cycles through a fixed list of values.
///
/// Values are clamped into `[0, 1)`; an empty list always yields `0.0`.
#[derive(Clone, Debug)]
pub struct FixedSequence {
    values: Vec<f64>,
    pos: usize,
}

impl FixedSequence {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }

    /// Source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for FixedSequence {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos = self.pos.wrapping_add(1);
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
