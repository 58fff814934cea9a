//! Random source for the simulation
//!
//! Every random decision (transport moves, fusion partners, reaction
//! selection) is drawn through `RandomSource`, so a run is reproducible from
//! its seed and tests can script the draws.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of the two kinds of draws the simulation makes
pub trait RandomSource {
    /// Uniform value in [0, 1)
    fn uniform(&mut self) -> f64;
    /// Fair coin flip
    fn coin(&mut self) -> bool;
}

/// PCG-backed source seeded from a single u64
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy; the chosen seed is still recorded
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// Replays fixed draws; falls back to 0.0 / false once a script runs out
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedRng {
    uniforms: std::collections::VecDeque<f64>,
    coins: std::collections::VecDeque<bool>,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(uniforms: &[f64], coins: &[bool]) -> Self {
        Self {
            uniforms: uniforms.iter().copied().collect(),
            coins: coins.iter().copied().collect(),
        }
    }

    pub(crate) fn uniforms(uniforms: &[f64]) -> Self {
        Self::new(uniforms, &[])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn uniform(&mut self) -> f64 {
        self.uniforms.pop_front().unwrap_or(0.0)
    }

    fn coin(&mut self) -> bool {
        self.coins.pop_front().unwrap_or(false)
    }
}
