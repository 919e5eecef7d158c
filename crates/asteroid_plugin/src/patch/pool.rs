//! PatchArena - patch storage with a recycle pool.
//!
//! Patches live in a flat slot vector addressed by [`PatchId`]. Merging
//! pushes retired slots onto a free stack; splitting pops from it before
//! growing the vector.

use glam::Vec2;
use smallvec::SmallVec;

use super::face::CubeFace;
use super::node::{Patch, PatchId, PatchState};

#[derive(Default)]
pub struct PatchArena {
  slots: Vec<Patch>,
  free: Vec<PatchId>,
}

impl PatchArena {
  pub fn new() -> Self {
    Self::default()
  }

  /// Take a slot for a new patch, reusing a retired one when possible.
  ///
  /// Returns the id and whether the slot was recycled. A recycled slot is
  /// reset; its positions are stale until the caller fills them.
  pub fn acquire(&mut self, face: CubeFace, offset: Vec2, width: f32, depth: u32) -> (PatchId, bool) {
    if let Some(id) = self.free.pop() {
      self.slots[id.index()].reset(face, offset, width, depth);
      return (id, true);
    }
    self.slots.push(Patch::new(face, offset, width, depth));
    (PatchId(self.slots.len() as u32 - 1), false)
  }

  /// Retire `id` and its whole subtree, children first.
  ///
  /// Returns the number of slots pushed onto the free stack.
  pub fn retire(&mut self, id: PatchId) -> usize {
    let mut stack: SmallVec<[PatchId; 16]> = SmallVec::new();
    let mut order: SmallVec<[PatchId; 16]> = SmallVec::new();
    stack.push(id);
    while let Some(next) = stack.pop() {
      order.push(next);
      if let PatchState::Split { children } = self.slots[next.index()].state() {
        stack.extend(children);
      }
    }
    // Deepest first so a parent never sits in the pool above its children
    for &retired in order.iter().rev() {
      self.slots[retired.index()].set_state(PatchState::Leaf);
      self.free.push(retired);
    }
    order.len()
  }

  pub fn get(&self, id: PatchId) -> Option<&Patch> {
    self.slots.get(id.index())
  }

  pub fn get_mut(&mut self, id: PatchId) -> Option<&mut Patch> {
    self.slots.get_mut(id.index())
  }

  /// Slots currently in use.
  pub fn live_count(&self) -> usize {
    self.slots.len() - self.free.len()
  }

  /// Slots waiting in the recycle pool.
  pub fn free_count(&self) -> usize {
    self.free.len()
  }

  /// Slots ever allocated.
  pub fn capacity(&self) -> usize {
    self.slots.len()
  }

  pub fn is_free(&self, id: PatchId) -> bool {
    self.free.contains(&id)
  }
}

impl std::ops::Index<PatchId> for PatchArena {
  type Output = Patch;

  fn index(&self, id: PatchId) -> &Patch {
    &self.slots[id.index()]
  }
}

impl std::ops::IndexMut<PatchId> for PatchArena {
  fn index_mut(&mut self, id: PatchId) -> &mut Patch {
    &mut self.slots[id.index()]
  }
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod pool_test;
