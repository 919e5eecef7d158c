//! PatchLodConfig - split/merge thresholds for the patch quadtree.

use crate::error::ConfigError;

/// Configuration for quadtree patch LOD.
///
/// Thresholds are angular sizes in radians per grid segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatchLodConfig {
  /// A leaf whose angular size exceeds this splits.
  pub split_threshold: f32,

  /// A split patch whose angular size is at or below this merges.
  pub merge_threshold: f32,

  /// Deepest level children may reach. Roots are depth 0.
  pub max_depth: u32,

  /// Seed of the hash noise added to new interior samples.
  pub noise_seed: u32,
}

impl PatchLodConfig {
  pub const DEFAULT: Self = Self {
    split_threshold: 0.06,
    merge_threshold: 0.04,
    max_depth: 5,
    noise_seed: 0,
  };

  pub fn new() -> Self {
    Self::DEFAULT
  }

  pub fn with_thresholds(mut self, split: f32, merge: f32) -> Self {
    self.split_threshold = split;
    self.merge_threshold = merge;
    self
  }

  pub fn with_max_depth(mut self, max_depth: u32) -> Self {
    self.max_depth = max_depth;
    self
  }

  pub fn with_noise_seed(mut self, seed: u32) -> Self {
    self.noise_seed = seed;
    self
  }

  /// Split must be strictly above merge, or patches near the boundary flip
  /// every frame.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let (split, merge) = (self.split_threshold, self.merge_threshold);
    if !(split > merge && merge > 0.0) {
      return Err(ConfigError::NoHysteresis { split, merge });
    }
    if self.max_depth == 0 {
      return Err(ConfigError::InvalidMaxDepth);
    }
    Ok(())
  }
}

impl Default for PatchLodConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
