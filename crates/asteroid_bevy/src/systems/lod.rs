//! LOD update system driven by LodViewer.

use asteroid_plugin::glam;
use bevy::prelude::*;

use crate::components::{AsteroidRoot, LodViewer};

/// Bevy and the core may link different glam versions; go through arrays.
pub fn to_core_affine(transform: &GlobalTransform) -> glam::Affine3A {
  glam::Affine3A::from_cols_array(&transform.affine().to_cols_array())
}

pub fn to_core_vec3(v: Vec3) -> glam::Vec3 {
  glam::Vec3::from_array(v.to_array())
}

/// Split and merge every asteroid's patches for the first viewer.
///
/// Root transforms are refreshed even without a viewer. Transitions are
/// queued on the root for `sync_patch_entities`.
pub fn update_asteroid_lod(
  viewers: Query<&GlobalTransform, With<LodViewer>>,
  mut roots: Query<(&GlobalTransform, &mut AsteroidRoot)>,
) {
  let viewer = viewers.iter().next().map(|t| to_core_vec3(t.translation()));

  for (transform, mut root) in &mut roots {
    root.cube.set_transform(to_core_affine(transform));
    let Some(viewer) = viewer else {
      continue;
    };
    let update = root.cube.update_resolution(viewer);
    if !update.is_empty() {
      debug!(
        "asteroid LOD: {} splits, {} merges",
        update.stats.splits, update.stats.merges
      );
      root.pending.extend(update.transitions);
    }
  }
}
