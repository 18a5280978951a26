//! Injectable randomness
//!
//! The simulation never touches a global RNG. Every draw goes through a
//! [`RandomSource`] owned by the session, so a seed (or a scripted sample
//! list) fully determines a run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A stream of uniform samples in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform sample in `[lo, hi)`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform integer in `[lo, hi]`, returned as a float
    fn int_inclusive(&mut self, lo: f32, hi: f32) -> f32 {
        let span = (hi - lo).floor() + 1.0;
        (lo + (self.next_unit() * span).floor()).min(hi)
    }
}

/// Seeded PCG source (the default for real sessions)
#[derive(Debug, Clone)]
pub struct PcgSource {
    rng: Pcg32,
}

impl PcgSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for PcgSource {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    samples: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    /// Samples are clamped into `[0, 1)`; an empty list yields zeros
    pub fn new(samples: &[f32]) -> Self {
        let samples = samples
            .iter()
            .map(|s| s.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { samples, cursor: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}
