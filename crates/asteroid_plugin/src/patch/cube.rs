//! PatchCube - six face quadtrees forming one LOD body.
//!
//! The cube owns the patch arena and the six roots, a world transform, and an
//! optional baked mesh. Typical lifecycle:
//!
//! 1. [`PatchCube::new`] projects the roots onto the unit sphere.
//! 2. [`PatchCube::shrink_wrap`] (optional) conforms them to a target.
//! 3. [`PatchCube::update_resolution`] runs once per frame.
//! 4. [`PatchCube::bake`] (optional) freezes the frontier into one mesh.

use glam::{Affine3A, Vec2, Vec3};

use super::config::PatchLodConfig;
use super::face::CubeFace;
use super::lod::{self, frontier_under, LodUpdate, LodView};
use super::node::{Patch, PatchId};
use super::pool::PatchArena;
use super::shrink_wrap::{self, ShrinkWrapReport};
use crate::error::ConfigError;
use crate::noise::HashNoise;
use crate::raycast::SurfaceTarget;
use crate::types::{BodyBounds, MeshOutput};

/// Width of a root patch: a whole cube face.
pub const ROOT_WIDTH: f32 = 2.0;

pub struct PatchCube {
  config: PatchLodConfig,
  arena: PatchArena,
  roots: [PatchId; 6],
  transform: Affine3A,
  noise: HashNoise,
  baked: Option<MeshOutput>,
}

impl PatchCube {
  /// Six depth-0 roots on the unit sphere.
  pub fn new(config: PatchLodConfig) -> Result<Self, ConfigError> {
    config.validate()?;

    let mut arena = PatchArena::new();
    let roots = CubeFace::ALL.map(|face| {
      let (id, _) = arena.acquire(face, Vec2::ZERO, ROOT_WIDTH, 0);
      let patch = &mut arena[id];
      patch.project_to_sphere();
      patch.compute_normals();
      id
    });

    Ok(Self {
      noise: HashNoise::new(config.noise_seed),
      config,
      arena,
      roots,
      transform: Affine3A::IDENTITY,
      baked: None,
    })
  }

  pub fn config(&self) -> &PatchLodConfig {
    &self.config
  }

  /// Local to world placement used by the LOD test and bounds.
  pub fn set_transform(&mut self, transform: Affine3A) {
    self.transform = transform;
  }

  pub fn transform(&self) -> Affine3A {
    self.transform
  }

  pub fn roots(&self) -> &[PatchId; 6] {
    &self.roots
  }

  pub fn arena(&self) -> &PatchArena {
    &self.arena
  }

  pub fn patch(&self, id: PatchId) -> Option<&Patch> {
    self.arena.get(id)
  }

  /// Split and merge patches for a viewer at `viewer` (world space).
  ///
  /// Roots are visited in [`CubeFace::ALL`] order. A baked cube never
  /// changes.
  #[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "patch::update_resolution"))]
  pub fn update_resolution(&mut self, viewer: Vec3) -> LodUpdate {
    let mut update = LodUpdate::default();
    if self.baked.is_some() {
      return update;
    }

    let view = LodView::new(self.transform, viewer);
    for root in self.roots {
      lod::update_resolution(&mut self.arena, root, &view, &self.config, &self.noise, &mut update);
    }

    if !update.is_empty() {
      tracing::debug!(
        splits = update.stats.splits,
        merges = update.stats.merges,
        reused = update.stats.patches_reused,
        allocated = update.stats.patches_allocated,
        live = self.arena.live_count(),
        "patch LOD update"
      );
    }
    update
  }

  /// Current frontier: every visible leaf, root by root.
  pub fn leaves(&self) -> Vec<PatchId> {
    self
      .roots
      .iter()
      .flat_map(|&root| frontier_under(&self.arena, root))
      .collect()
  }

  /// Every patch reachable from the roots, parents before children.
  fn tree_nodes(&self) -> Vec<PatchId> {
    let mut nodes = Vec::with_capacity(self.arena.live_count());
    let mut stack: Vec<PatchId> = self.roots.iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
      nodes.push(id);
      if let Some(children) = self.arena[id].children() {
        stack.extend(children.into_iter().rev());
      }
    }
    nodes
  }

  /// Conform the roots to `target`.
  ///
  /// Meant to run before the first LOD update: existing refinement is
  /// discarded so children are later stitched from the wrapped roots. The
  /// merges doing so are returned in [`ShrinkWrapReport::collapsed`]. Root
  /// geometry changes in place either way.
  pub fn shrink_wrap<T: SurfaceTarget + ?Sized>(&mut self, target: &T) -> ShrinkWrapReport {
    let mut collapsed = LodUpdate::default();
    for root in self.roots {
      lod::merge(&mut self.arena, root, &mut collapsed);
    }
    if collapsed.stats.merges > 0 {
      tracing::debug!(merges = collapsed.stats.merges, "collapsed refinement before shrink-wrap");
    }

    let mut report = shrink_wrap::shrink_wrap(&mut self.arena, &self.roots, target);
    tracing::debug!(samples = report.samples, misses = report.misses, "shrink-wrap done");
    report.collapsed = collapsed;
    report
  }

  /// Perturb every sample of every patch in the tree.
  ///
  /// Noise is keyed by sample direction alone; depth and width only scale
  /// its amplitude, so patches of the same size agree on shared samples.
  pub fn noise_all(&mut self) {
    for id in self.tree_nodes() {
      let patch = &mut self.arena[id];
      patch.apply_noise(&self.noise, true);
      patch.compute_normals();
    }
  }

  /// Merge the frontier into one local-space mesh and freeze the tree.
  pub fn bake(&mut self) -> &MeshOutput {
    if self.baked.is_none() {
      let mut mesh = MeshOutput::new();
      for id in self.leaves() {
        mesh.append(&self.arena[id].to_output());
      }
      tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "baked patch cube"
      );
      self.baked = Some(mesh);
    }
    self.baked.get_or_insert_with(MeshOutput::new)
  }

  pub fn is_baked(&self) -> bool {
    self.baked.is_some()
  }

  pub fn baked_mesh(&self) -> Option<&MeshOutput> {
    self.baked.as_ref()
  }

  /// World bounding sphere for an external proximity index.
  pub fn body_bounds(&self) -> BodyBounds {
    let local_radius = self
      .tree_nodes()
      .iter()
      .flat_map(|&id| self.arena[id].positions().iter())
      .map(|p| p.length())
      .fold(0.0, f32::max);
    let scale = LodView::new(self.transform, Vec3::ZERO).scale();
    BodyBounds {
      center: Vec3::from(self.transform.translation),
      radius: local_radius * scale,
    }
  }
}

#[cfg(test)]
#[path = "cube_test.rs"]
mod cube_test;
