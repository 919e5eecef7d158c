//! Patch - one node of a face quadtree.
//!
//! A patch covers the square `offset +/- width / 2` of its cube face (a whole
//! face has width 2) with a fixed 9x9 grid of samples. Positions are in the
//! cube's local space and are usually close to the unit sphere.

use glam::{Vec2, Vec3};

use super::face::CubeFace;
use super::grid::{
  grid_index, is_boundary, GridPositions, CENTER_INDEX, GRID_INDICES, SEGMENTS_PER_SIDE, VERTEX_COUNT,
  VERTICES_PER_SIDE,
};
use crate::noise::HashNoise;
use crate::types::{accumulate_normals, MeshOutput};

/// Slot index of a patch in its arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatchId(pub u32);

impl PatchId {
  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Quadtree state: a visible leaf, or hidden behind exactly four children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchState {
  Leaf,
  /// Children in quadrant order: `(-x, -y)`, `(+x, -y)`, `(-x, +y)`, `(+x, +y)`.
  Split { children: [PatchId; 4] },
}

/// Fixed-topology grid patch.
#[derive(Clone, Debug)]
pub struct Patch {
  face: CubeFace,
  offset: Vec2,
  width: f32,
  depth: u32,
  positions: GridPositions,
  normals: GridPositions,
  center: Vec3,
  state: PatchState,
}

impl Patch {
  pub fn new(face: CubeFace, offset: Vec2, width: f32, depth: u32) -> Self {
    Self {
      face,
      offset,
      width,
      depth,
      positions: [Vec3::ZERO; VERTEX_COUNT],
      normals: [Vec3::ZERO; VERTEX_COUNT],
      center: Vec3::ZERO,
      state: PatchState::Leaf,
    }
  }

  /// Reassign a recycled slot. Geometry is left stale until repopulated.
  pub fn reset(&mut self, face: CubeFace, offset: Vec2, width: f32, depth: u32) {
    self.face = face;
    self.offset = offset;
    self.width = width;
    self.depth = depth;
    self.center = Vec3::ZERO;
    self.state = PatchState::Leaf;
  }

  #[inline]
  pub fn face(&self) -> CubeFace {
    self.face
  }

  #[inline]
  pub fn offset(&self) -> Vec2 {
    self.offset
  }

  #[inline]
  pub fn width(&self) -> f32 {
    self.width
  }

  #[inline]
  pub fn depth(&self) -> u32 {
    self.depth
  }

  #[inline]
  pub fn state(&self) -> PatchState {
    self.state
  }

  pub(crate) fn set_state(&mut self, state: PatchState) {
    self.state = state;
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    matches!(self.state, PatchState::Leaf)
  }

  pub fn children(&self) -> Option<[PatchId; 4]> {
    match self.state {
      PatchState::Leaf => None,
      PatchState::Split { children } => Some(children),
    }
  }

  pub fn positions(&self) -> &GridPositions {
    &self.positions
  }

  pub(crate) fn positions_mut(&mut self) -> &mut GridPositions {
    &mut self.positions
  }

  pub fn normals(&self) -> &GridPositions {
    &self.normals
  }

  /// Cached center sample (local space).
  #[inline]
  pub fn center(&self) -> Vec3 {
    self.center
  }

  #[inline]
  pub fn position(&self, col: usize, row: usize) -> Vec3 {
    self.positions[grid_index(col, row)]
  }

  /// Face space coordinate of sample `(col, row)`.
  #[inline]
  pub fn grid_point(&self, col: usize, row: usize) -> Vec2 {
    let step = self.width / SEGMENTS_PER_SIDE as f32;
    let half = self.width * 0.5;
    self.offset + Vec2::new(col as f32 * step - half, row as f32 * step - half)
  }

  /// Place every sample on the unit sphere.
  pub fn project_to_sphere(&mut self) {
    for row in 0..VERTICES_PER_SIDE {
      for col in 0..VERTICES_PER_SIDE {
        let dir = self.face.direction(self.grid_point(col, row));
        self.positions[grid_index(col, row)] = dir;
      }
    }
  }

  /// Smooth normals from this patch's own triangles, then refresh the center.
  pub fn compute_normals(&mut self) {
    let normals = accumulate_normals(&self.positions, &GRID_INDICES);
    self.normals.copy_from_slice(&normals);
    self.center = self.positions[CENTER_INDEX];
  }

  /// Radial noise of one generation.
  ///
  /// Each perturbed sample moves along its own direction by
  /// `0.5 * width / 8 * n`, `n = (2 * noise(dir) - 1) / (depth + 1)`. Unless
  /// `all` is set, only interior samples on an odd row or column move, so
  /// the outer ring keeps the values shared with neighbours.
  pub fn apply_noise(&mut self, noise: &HashNoise, all: bool) {
    let step = 0.5 * self.width / SEGMENTS_PER_SIDE as f32;
    let falloff = 1.0 / (self.depth + 1) as f32;
    for row in 0..VERTICES_PER_SIDE {
      for col in 0..VERTICES_PER_SIDE {
        let odd = col % 2 == 1 || row % 2 == 1;
        if !all && (!odd || is_boundary(col, row)) {
          continue;
        }
        let p = &mut self.positions[grid_index(col, row)];
        let Some(dir) = p.try_normalize() else {
          continue;
        };
        let n = (2.0 * noise.sample(dir) - 1.0) * falloff;
        *p += dir * (step * n);
      }
    }
  }

  /// Render buffers for this patch. UVs span `[0, 1]` across the patch.
  pub fn to_output(&self) -> MeshOutput {
    let last = SEGMENTS_PER_SIDE as f32;
    let mut uvs = Vec::with_capacity(VERTEX_COUNT);
    for row in 0..VERTICES_PER_SIDE {
      for col in 0..VERTICES_PER_SIDE {
        uvs.push([col as f32 / last, row as f32 / last]);
      }
    }
    MeshOutput {
      positions: self.positions.iter().map(|p| p.to_array()).collect(),
      normals: self.normals.iter().map(|n| n.to_array()).collect(),
      uvs,
      indices: GRID_INDICES.to_vec(),
    }
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
