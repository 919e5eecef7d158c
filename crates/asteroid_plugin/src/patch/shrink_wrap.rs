//! Shrink-wrap: project patch samples onto an arbitrary target surface.
//!
//! Every sample direction of a patch is cast as a ray from the target's
//! center. The farthest hit, divided by the target's bounding radius, becomes
//! the sample's radius. Afterwards the patch describes the target as a
//! radius per direction, which is what later noise perturbs.

use rayon::prelude::*;

use super::grid::{grid_index, GridPositions, VERTICES_PER_SIDE};
use super::lod::LodUpdate;
use super::node::{Patch, PatchId};
use super::pool::PatchArena;
use crate::raycast::SurfaceTarget;

/// Radius used for samples whose ray missed the target.
pub const MISS_RADIUS: f32 = 1.0;

/// Totals of one shrink-wrap pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShrinkWrapReport {
  pub samples: usize,
  pub misses: usize,
  /// Merges that folded existing refinement back into the roots before
  /// wrapping. Apply them like any other LOD update.
  pub collapsed: LodUpdate,
}

/// `1 / bounding_radius`, or 1 for a target without extent.
pub fn normalization(target: &(impl SurfaceTarget + ?Sized)) -> f32 {
  let radius = target.bounding_radius();
  if radius > 0.0 && radius.is_finite() {
    1.0 / radius
  } else {
    1.0
  }
}

/// New positions for one patch and the number of rays that missed.
pub fn wrap_patch(patch: &Patch, target: &(impl SurfaceTarget + ?Sized), scale: f32) -> (GridPositions, usize) {
  let origin = target.center();
  let mut positions = *patch.positions();
  let mut misses = 0;
  for row in 0..VERTICES_PER_SIDE {
    for col in 0..VERTICES_PER_SIDE {
      let dir = patch.face().direction(patch.grid_point(col, row));
      let height = match target.farthest_hit(origin, dir) {
        Some(distance) => distance * scale,
        None => {
          misses += 1;
          MISS_RADIUS
        }
      };
      positions[grid_index(col, row)] = dir * height;
    }
  }
  (positions, misses)
}

/// Shrink-wrap `patches` in parallel, then refresh their normals.
///
/// The pass finishes before returning; only the ray casts run on the rayon
/// pool.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "patch::shrink_wrap"))]
pub fn shrink_wrap<T: SurfaceTarget + ?Sized>(arena: &mut PatchArena, patches: &[PatchId], target: &T) -> ShrinkWrapReport {
  let scale = normalization(target);
  let shared: &PatchArena = arena;
  let wrapped: Vec<(PatchId, GridPositions, usize)> = patches
    .par_iter()
    .map(|&id| {
      let (positions, misses) = wrap_patch(&shared[id], target, scale);
      (id, positions, misses)
    })
    .collect();

  let mut report = ShrinkWrapReport::default();
  for (id, positions, misses) in wrapped {
    let patch = &mut arena[id];
    *patch.positions_mut() = positions;
    patch.compute_normals();

    report.samples += positions.len();
    report.misses += misses;
    if misses > 0 {
      tracing::warn!(
        face = ?patch.face(),
        depth = patch.depth(),
        misses,
        "shrink-wrap rays missed the target, using unit radius"
      );
    }
  }
  report
}

#[cfg(test)]
#[path = "shrink_wrap_test.rs"]
mod shrink_wrap_test;
