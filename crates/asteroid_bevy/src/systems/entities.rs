//! Entity management for asteroid patches.

use std::collections::HashMap;

use asteroid_plugin::patch::{Patch, PatchCube, PatchId, Transition};
use asteroid_plugin::MeshOutput;
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use crate::components::{AsteroidBakedMesh, AsteroidBounds, AsteroidPatch, AsteroidRoot};
use crate::resources::{PatchEntityMap, PatchMaterials, DEPTH_PALETTE};

/// Creates and destroys whatever represents a patch on screen.
pub trait PatchPresenter {
  type Handle: Copy;

  fn spawn(&mut self, patch: PatchId) -> Self::Handle;
  fn despawn(&mut self, handle: Self::Handle);
}

/// Replay transitions, in order, against the live patch handles of one root.
///
/// A slot retired by a merge may be handed out again by a later split, so
/// removals of a transition are applied before its additions.
pub fn apply_transitions<P: PatchPresenter>(
  live: &mut HashMap<PatchId, P::Handle>,
  transitions: &[Transition],
  presenter: &mut P,
) {
  for transition in transitions {
    for id in &transition.removed {
      if let Some(handle) = live.remove(id) {
        presenter.despawn(handle);
      }
    }
    for &id in &transition.added {
      let handle = presenter.spawn(id);
      if let Some(stale) = live.insert(id, handle) {
        presenter.despawn(stale);
      }
    }
  }
}

/// Spawns patch meshes as children of an asteroid root.
struct EntityPresenter<'a, 'w, 's> {
  commands: &'a mut Commands<'w, 's>,
  meshes: &'a mut Assets<Mesh>,
  materials: &'a PatchMaterials,
  cube: &'a PatchCube,
  root: Entity,
}

impl PatchPresenter for EntityPresenter<'_, '_, '_> {
  type Handle = Entity;

  fn spawn(&mut self, id: PatchId) -> Entity {
    let Some(patch) = self.cube.patch(id) else {
      warn!("patch {:?} is not live, spawning an empty entity", id);
      return self.commands.spawn(ChildOf(self.root)).id();
    };
    let mesh = self.meshes.add(patch_mesh(patch));
    self
      .commands
      .spawn((
        Mesh3d(mesh),
        MeshMaterial3d(self.materials.get(patch.depth())),
        Transform::IDENTITY,
        AsteroidPatch {
          patch: id,
          depth: patch.depth(),
        },
        ChildOf(self.root),
      ))
      .id()
  }

  fn despawn(&mut self, entity: Entity) {
    self.commands.entity(entity).despawn();
  }
}

/// Startup system: one material per palette entry.
pub fn setup_patch_materials(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
  let materials = DEPTH_PALETTE
    .iter()
    .map(|&[r, g, b]| {
      materials.add(StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        perceptual_roughness: 0.9,
        ..default()
      })
    })
    .collect();
  commands.insert_resource(PatchMaterials { materials });
}

/// Keep one mesh entity per visible patch, or one for a baked cube.
///
/// A root seen for the first time emits [`AsteroidBounds`] and gets its
/// whole frontier spawned; after that only queued transitions are applied,
/// unless the root asks for a rebuild.
pub fn sync_patch_entities(
  mut commands: Commands,
  mut roots: Query<(Entity, &mut AsteroidRoot)>,
  mut entity_map: ResMut<PatchEntityMap>,
  mut meshes: ResMut<Assets<Mesh>>,
  materials: Res<PatchMaterials>,
  mut bounds_events: EventWriter<AsteroidBounds>,
) {
  for (root_entity, mut root) in &mut roots {
    let AsteroidRoot { cube, pending, rebuild } = &mut *root;
    let first_sync = !entity_map.is_tracked(root_entity);

    if first_sync {
      let bounds = cube.body_bounds();
      bounds_events.write(AsteroidBounds {
        root: root_entity,
        center: Vec3::from_array(bounds.center.to_array()),
        radius: bounds.radius,
      });
    }

    if cube.is_baked() {
      pending.clear();
      *rebuild = false;
      if entity_map.baked_entity(root_entity).is_some() {
        continue;
      }
      for entity in entity_map.take_patches(root_entity) {
        commands.entity(entity).despawn();
      }
      if let Some(baked) = cube.baked_mesh() {
        let entity = commands
          .spawn((
            Mesh3d(meshes.add(mesh_output_to_bevy(baked))),
            MeshMaterial3d(materials.get(0)),
            Transform::IDENTITY,
            AsteroidBakedMesh,
            ChildOf(root_entity),
          ))
          .id();
        entity_map.baked.insert(root_entity, entity);
        info!("Baked asteroid {:?} into one mesh entity", root_entity);
      }
      continue;
    }

    let full_spawn = first_sync || *rebuild;
    if *rebuild {
      for entity in entity_map.take_patches(root_entity) {
        commands.entity(entity).despawn();
      }
      *rebuild = false;
    }

    let live = entity_map.roots.entry(root_entity).or_default();
    let mut presenter = EntityPresenter {
      commands: &mut commands,
      meshes: &mut *meshes,
      materials: &*materials,
      cube: &*cube,
      root: root_entity,
    };

    if full_spawn {
      for id in cube.leaves() {
        let entity = presenter.spawn(id);
        live.insert(id, entity);
      }
      info!("Spawned {} patch entities for asteroid {:?}", live.len(), root_entity);
    } else if !pending.is_empty() {
      apply_transitions(live, pending, &mut presenter);
    }
    pending.clear();
  }
}

/// Drop map entries of asteroid roots that were despawned.
///
/// Patch and baked entities are children of the root and go with it.
pub fn forget_despawned_roots(
  mut removed: RemovedComponents<AsteroidRoot>,
  mut entity_map: ResMut<PatchEntityMap>,
  live_roots: Query<(), With<AsteroidRoot>>,
) {
  if removed.read().next().is_none() {
    return;
  }
  let orphaned: Vec<Entity> = entity_map
    .tracked_roots()
    .filter(|&root| live_roots.get(root).is_err())
    .collect();
  for root in orphaned {
    entity_map.remove_root(root);
  }
}

/// Convert a core MeshOutput to a Bevy Mesh.
pub fn mesh_output_to_bevy(output: &MeshOutput) -> Mesh {
  let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());

  if output.is_empty() {
    return mesh;
  }

  mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, output.positions.clone());
  mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, output.normals.clone());
  if output.uvs.len() == output.positions.len() {
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, output.uvs.clone());
  }
  mesh.insert_indices(Indices::U32(output.indices.clone()));

  mesh
}

/// Mesh for one patch in the cube's local space.
pub fn patch_mesh(patch: &Patch) -> Mesh {
  mesh_output_to_bevy(&patch.to_output())
}

#[cfg(test)]
#[path = "entities_test.rs"]
mod entities_test;
