//! Random draw sources
//!
//! Every synthetic value in `EcoSpace` is derived from uniform draws in
//! `[0, 1)`. Generators never reach for ambient randomness: the caller passes
//! a [`RandomSource`] in, so a fixed draw sequence always yields the same
//! output.

use crate::{EcoSpaceError, Result};
use rand::rngs::{StdRng, ThreadRng};
use rand::{RngExt, SeedableRng};

/// Provider of uniform draws in `[0, 1)`
pub trait RandomSource {
    /// Produce the next draw.
    ///
    /// Errors are propagated unchanged by every generator.
    fn next_draw(&mut self) -> Result<f64>;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_draw(&mut self) -> Result<f64> {
        (**self).next_draw()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_draw(&mut self) -> Result<f64> {
        (**self).next_draw()
    }
}

/// Pull one draw and reject values outside `[0, 1)`
pub(crate) fn checked_draw<S: RandomSource + ?Sized>(source: &mut S) -> Result<f64> {
    let value = source.next_draw()?;
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(EcoSpaceError::random_source(format!(
            "draw {value} is outside [0, 1)"
        )))
    }
}

/// Non-deterministic source backed by the thread-local generator
#[derive(Debug, Clone)]
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    #[must_use]
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_draw(&mut self) -> Result<f64> {
        Ok(self.rng.random::<f64>())
    }
}

/// Reproducible source backed by a seeded PRNG
#[derive(Debug)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_draw(&mut self) -> Result<f64> {
        Ok(self.rng.random::<f64>())
    }
}

/// Replays a fixed list of draws and fails once it runs out
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSource {
    draws: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    #[must_use]
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    /// Number of draws consumed so far
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.position
    }

    /// Number of draws still available
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draws.len() - self.position
    }
}

impl RandomSource for SequenceSource {
    fn next_draw(&mut self) -> Result<f64> {
        let value = self.draws.get(self.position).copied().ok_or_else(|| {
            EcoSpaceError::random_source(format!(
                "sequence exhausted after {} draws",
                self.draws.len()
            ))
        })?;
        self.position += 1;
        Ok(value)
    }
}

/// Returns the same draw forever
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource(pub f64);

impl RandomSource for ConstantSource {
    fn next_draw(&mut self) -> Result<f64> {
        Ok(self.0)
    }
}
