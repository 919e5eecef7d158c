//! Bevy components for asteroid rendering.

use asteroid_plugin::patch::{PatchCube, PatchId, ShrinkWrapReport, Transition};
use asteroid_plugin::raycast::SurfaceTarget;
use bevy::prelude::*;

/// One LOD body. The entity's `GlobalTransform` places the cube in the world.
///
/// Transitions produced by the LOD system queue up in `pending` until the
/// presentation sync applies them, in order. `rebuild` asks the sync to
/// respawn every patch entity, for edits that move samples in place.
#[derive(Component)]
pub struct AsteroidRoot {
  pub cube: PatchCube,
  pub pending: Vec<Transition>,
  pub rebuild: bool,
}

impl AsteroidRoot {
  pub fn new(cube: PatchCube) -> Self {
    Self {
      cube,
      pending: Vec::new(),
      rebuild: false,
    }
  }

  /// Shrink-wrap the cube and schedule a full respawn of its patches.
  pub fn shrink_wrap<T: SurfaceTarget + ?Sized>(&mut self, target: &T) -> ShrinkWrapReport {
    let report = self.cube.shrink_wrap(target);
    self.pending.clear();
    self.rebuild = true;
    report
  }

  /// Roughen every patch and schedule a full respawn.
  pub fn noise_all(&mut self) {
    self.cube.noise_all();
    self.pending.clear();
    self.rebuild = true;
  }
}

/// Single mesh entity shown once the cube is baked.
#[derive(Component, Default)]
pub struct AsteroidBakedMesh;

/// World placement of a new asteroid, sent once when it is first synced.
///
/// Feeds proximity indexes that only need a position and a radius.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct AsteroidBounds {
  pub root: Entity,
  pub center: Vec3,
  pub radius: f32,
}

/// Mesh entity for one visible patch, a child of its `AsteroidRoot`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AsteroidPatch {
  pub patch: PatchId,
  pub depth: u32,
}

/// Marker component for the entity that drives asteroid LOD.
///
/// # Example
/// ```ignore
/// commands.spawn((
///     Camera3d::default(),
///     Transform::from_xyz(0.0, 0.0, 10.0),
///     LodViewer,
/// ));
/// ```
#[derive(Component, Default)]
pub struct LodViewer;
