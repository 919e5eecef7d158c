//! Bevy presentation layer for asteroid_plugin.
//!
//! Bridges the engine-independent patch cube with Bevy: every frame the
//! viewer position drives each asteroid's LOD update, then one mesh entity is
//! kept per visible patch.

pub mod components;
pub mod resources;
pub mod systems;


use bevy::prelude::*;
pub use components::*;
pub use resources::*;

/// Bevy plugin for asteroid patch LOD rendering.
pub struct AsteroidLodPlugin;

impl Plugin for AsteroidLodPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<PatchEntityMap>()
      .add_event::<AsteroidBounds>()
      .add_systems(Startup, systems::entities::setup_patch_materials)
      .add_systems(
        Update,
        (
          systems::lod::update_asteroid_lod,
          systems::entities::sync_patch_entities,
          systems::entities::forget_despawned_roots,
        )
          .chain(),
      );
  }
}
