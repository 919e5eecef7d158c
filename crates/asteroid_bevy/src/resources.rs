//! Bevy resources for asteroid patch presentation.

use std::collections::HashMap;

use asteroid_plugin::patch::PatchId;
use bevy::prelude::*;

/// Debug colours by patch depth; deeper patches clamp to the last entry.
pub const DEPTH_PALETTE: [[u8; 3]; 8] = [
  [0x04, 0x04, 0x04],
  [0x00, 0x00, 0xff],
  [0x00, 0xff, 0x00],
  [0x00, 0xff, 0xff],
  [0xff, 0x00, 0x00],
  [0xff, 0x00, 0xff],
  [0xff, 0xff, 0x00],
  [0xff, 0xff, 0xff],
];

/// Depth-coloured materials for patch entities.
#[derive(Resource)]
pub struct PatchMaterials {
  pub materials: Vec<Handle<StandardMaterial>>,
}

impl PatchMaterials {
  pub fn get(&self, depth: u32) -> Handle<StandardMaterial> {
    let idx = (depth as usize).min(self.materials.len().saturating_sub(1));
    self.materials.get(idx).cloned().unwrap_or_default()
  }
}

/// Patch entities per asteroid root entity, plus the baked mesh entity of
/// baked roots.
#[derive(Resource, Default)]
pub struct PatchEntityMap {
  pub roots: HashMap<Entity, HashMap<PatchId, Entity>>,
  pub baked: HashMap<Entity, Entity>,
}

impl PatchEntityMap {
  pub fn get(&self, root: Entity, patch: PatchId) -> Option<Entity> {
    self.roots.get(&root).and_then(|patches| patches.get(&patch).copied())
  }

  pub fn is_tracked(&self, root: Entity) -> bool {
    self.roots.contains_key(&root)
  }

  /// Drain a root's patch entities; the root stays tracked.
  pub fn take_patches(&mut self, root: Entity) -> Vec<Entity> {
    self.roots.entry(root).or_default().drain().map(|(_, entity)| entity).collect()
  }

  pub fn baked_entity(&self, root: Entity) -> Option<Entity> {
    self.baked.get(&root).copied()
  }

  /// Stop tracking a root, returning its patch and baked entities.
  pub fn remove_root(&mut self, root: Entity) -> Vec<Entity> {
    let mut entities: Vec<Entity> = self
      .roots
      .remove(&root)
      .map(|patches| patches.into_values().collect())
      .unwrap_or_default();
    entities.extend(self.baked.remove(&root));
    entities
  }

  pub fn tracked_roots(&self) -> impl Iterator<Item = Entity> + '_ {
    self.roots.keys().copied()
  }

  pub fn total_patches(&self) -> usize {
    self.roots.values().map(HashMap::len).sum()
  }
}
