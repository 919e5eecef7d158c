//! Displacement sources for new vertices.
//!
//! [`HashNoise`] is a cheap deterministic hash of a direction vector. The same
//! direction always yields the same value, so repeated subdivision of the
//! same geometry reproduces the same surface across runs.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Resolution of the per-component hash (20 bits).
const HASH_RANGE: u32 = 0x10_0000;

/// Deterministic hash noise over 3D coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashNoise {
  pub seed: u32,
}

impl HashNoise {
  pub fn new(seed: u32) -> Self {
    Self { seed }
  }

  /// Scramble one coordinate into 20 bits.
  #[inline]
  fn fuzz(x: f32) -> u32 {
    let x = x as f64 * 7.0;
    let frac = x - x.floor();
    (frac * HASH_RANGE as f64) as u32 & (HASH_RANGE - 1)
  }

  /// Pseudorandom value in `[0, 1)`. The coordinates are the seed values.
  #[inline]
  pub fn sample(&self, p: Vec3) -> f32 {
    let bits = Self::fuzz(p.x) ^ Self::fuzz(p.y) ^ Self::fuzz(p.z) ^ (self.seed & (HASH_RANGE - 1));
    (bits as f64 / HASH_RANGE as f64) as f32
  }

  /// Pseudorandom value in `[-0.5, 0.5)`.
  #[inline]
  pub fn signed(&self, p: Vec3) -> f32 {
    self.sample(p) - 0.5
  }
}

/// Midpoint displacement strategy for free-form subdivision.
///
/// The midpoint moves along the interpolated normal by
/// `amount * edge_length * f`, with `f` in `[-0.5, 0.5]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Displacement {
  /// No displacement: midpoints stay on the parent edge.
  Flat,
  /// `f` is hashed from the direction of the undisplaced midpoint.
  /// Reproducible across runs and independent of evaluation order.
  HashNoise { amount: f32, seed: u32 },
  /// `f` is drawn from a seeded generator. Reproducible for one seed only
  /// while the order of midpoint requests stays the same.
  Jitter { amount: f32, seed: u64 },
}

impl Default for Displacement {
  fn default() -> Self {
    Displacement::HashNoise {
      amount: 0.3,
      seed: 0,
    }
  }
}

impl Displacement {
  pub fn amount(&self) -> f32 {
    match *self {
      Displacement::Flat => 0.0,
      Displacement::HashNoise { amount, .. } | Displacement::Jitter { amount, .. } => amount,
    }
  }
}

/// Stateful evaluator for a [`Displacement`] mode.
pub(crate) struct Displacer {
  mode: Displacement,
  noise: HashNoise,
  rng: Option<StdRng>,
}

impl Displacer {
  pub fn new(mode: Displacement) -> Self {
    let (noise, rng) = match mode {
      Displacement::Flat => (HashNoise::default(), None),
      Displacement::HashNoise { seed, .. } => (HashNoise::new(seed), None),
      Displacement::Jitter { seed, .. } => (HashNoise::default(), Some(StdRng::seed_from_u64(seed))),
    };
    Self { mode, noise, rng }
  }

  /// Signed factor in `[-0.5, 0.5]` scaled by the mode's amount.
  ///
  /// `key` is the undisplaced midpoint.
  pub fn factor(&mut self, key: Vec3) -> f32 {
    match self.mode {
      Displacement::Flat => 0.0,
      Displacement::HashNoise { amount, .. } => amount * self.noise.signed(key.normalize_or_zero()),
      Displacement::Jitter { amount, .. } => match self.rng.as_mut() {
        Some(rng) => amount * rng.random_range(-0.5f32..=0.5),
        None => 0.0,
      },
    }
  }
}

#[cfg(test)]
#[path = "noise_test.rs"]
mod noise_test;
