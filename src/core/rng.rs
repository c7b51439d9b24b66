//! Randomness provider for combat rolls
//!
//! All random draws in the damage formulas and the enemy policy go through
//! the `Randomness` trait so battles can be replayed from a seed and tests
//! can script exact rolls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random values in `[0, 1)`
pub trait Randomness {
    fn uniform(&mut self) -> f64;

    /// Uniform value in `[lo, hi)`
    fn uniform_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.uniform() * (hi - lo)
    }
}

/// Deterministic ChaCha8-backed provider
pub struct SeededRng {
    rng: ChaCha8Rng,
}

impl SeededRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Provider seeded from OS entropy, for interactive play
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Randomness for SeededRng {
    fn uniform(&mut self) -> f64 {
        // gen::<f64>() is uniform in [0, 1)
        self.rng.gen::<f64>()
    }
}

/// Scripted provider that replays a fixed sequence of rolls, then repeats
/// the last one. Intended for tests that need exact damage numbers.
pub struct ScriptedRng {
    rolls: Vec<f64>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(rolls: Vec<f64>) -> Self {
        assert!(!rolls.is_empty(), "ScriptedRng needs at least one roll");
        Self { rolls, next: 0 }
    }

    /// Provider that always returns the same value
    pub fn constant(roll: f64) -> Self {
        Self::new(vec![roll])
    }
}

impl Randomness for ScriptedRng {
    fn uniform(&mut self) -> f64 {
        let roll = self.rolls[self.next.min(self.rolls.len() - 1)];
        self.next += 1;
        roll
    }
}
