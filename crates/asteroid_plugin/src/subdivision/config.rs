//! SubdivisionConfig - construction and flattening options for FractalMesh.

use crate::noise::Displacement;

/// Default quantization step for merging coincident input vertices.
pub const DEFAULT_MERGE_TOLERANCE: f32 = 0.001;

/// Configuration for free-form subdivision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubdivisionConfig {
  /// How new midpoints are displaced.
  pub displacement: Displacement,

  /// Input vertices whose positions quantize to the same cell of this size
  /// become one base vertex.
  pub merge_tolerance: f32,

  /// Recompute smooth normals from geometry when flattening.
  pub recompute_normals: bool,
}

impl Default for SubdivisionConfig {
  fn default() -> Self {
    Self {
      displacement: Displacement::default(),
      merge_tolerance: DEFAULT_MERGE_TOLERANCE,
      recompute_normals: true,
    }
  }
}

impl SubdivisionConfig {
  pub fn new() -> Self {
    Self::default()
  }

  /// Undisplaced subdivision: every child tiles its parent exactly.
  pub fn flat() -> Self {
    Self::default().with_displacement(Displacement::Flat)
  }

  pub fn with_displacement(mut self, displacement: Displacement) -> Self {
    self.displacement = displacement;
    self
  }

  pub fn with_merge_tolerance(mut self, tolerance: f32) -> Self {
    self.merge_tolerance = tolerance;
    self
  }

  pub fn with_recompute_normals(mut self, recompute: bool) -> Self {
    self.recompute_normals = recompute;
    self
  }
}
