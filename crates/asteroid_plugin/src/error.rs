//! Error taxonomy.
//!
//! - [`ConstructionError`]: malformed input mesh, surfaced before any work.
//! - [`ConsistencyError`]: broken edge topology; aborts the current pass.
//! - [`ConfigError`]: LOD thresholds that would oscillate or never split.
//!
//! Shrink-wrap rays that miss the target are not errors. They are recovered
//! with a sentinel radius and logged.

use thiserror::Error;

/// Malformed input mesh rejected by `FractalMesh::from_input`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
  #[error("input mesh has no triangle index; triangulate and index it first")]
  MissingIndex,

  #[error("index length {len} is not a multiple of 3")]
  IndexNotTriangulated { len: usize },

  #[error("{attribute} count {actual} does not match position count {expected}")]
  AttributeCountMismatch {
    attribute: &'static str,
    expected: usize,
    actual: usize,
  },

  #[error("index {index} out of range for {vertex_count} vertices")]
  IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Internal topology violation.
///
/// Only produced by an algorithm bug (a triangle whose corner is not an
/// endpoint of its own edge). Never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
  #[error("vertex {vertex} is not an endpoint of edge {edge}")]
  NotAnEndpoint { edge: u32, vertex: u32 },
}

/// Invalid patch LOD configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
  #[error("split threshold {split} must be greater than merge threshold {merge} (and merge > 0)")]
  NoHysteresis { split: f32, merge: f32 },

  #[error("max depth must be at least 1")]
  InvalidMaxDepth,
}
