//! Quadtree update driven by angular size.
//!
//! Each frame every root is visited once. A patch's angular size is the world
//! length of one grid segment divided by its distance from the viewer:
//!
//! ```text
//! theta = scale * width / SEGMENTS_PER_SIDE / |transform(center) - viewer|
//! ```
//!
//! - `theta > split`: split (unless at max depth) and recurse into children
//! - `theta <= merge`: merge if split; the retired subtree is not visited
//! - in between: no change here, but children are still visited
//!
//! Split and merge thresholds differ, so a viewer hovering near one boundary
//! never makes a patch flip back and forth.

use glam::{Affine3A, Vec2, Vec3};
use smallvec::SmallVec;

use super::config::PatchLodConfig;
use super::grid::{copy_quadrant, HALF, SEGMENTS_PER_SIDE};
use super::node::{Patch, PatchId, PatchState};
use super::pool::PatchArena;
use crate::noise::HashNoise;

/// Kind of quadtree change.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionKind {
  /// 1 leaf -> 4 children (finer detail)
  Split,
  /// Subtree -> its root (coarser detail)
  Merge,
}

/// One frontier change, keyed by the parent patch.
///
/// Transitions are reported in traversal order and must be applied in that
/// order: a slot retired by a merge may be handed out again by a later split
/// in the same update.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
  pub kind: TransitionKind,

  /// The patch that split or merged.
  pub parent: PatchId,

  /// Patches joining the frontier.
  /// - Split: the 4 children
  /// - Merge: the parent
  pub added: SmallVec<[PatchId; 4]>,

  /// Patches leaving the frontier.
  /// - Split: the parent
  /// - Merge: every leaf of the retired subtree
  pub removed: SmallVec<[PatchId; 4]>,
}

/// Counters for one update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LodStats {
  pub splits: usize,
  pub merges: usize,
  /// Child slots taken from the recycle pool.
  pub patches_reused: usize,
  /// Child slots that grew the arena.
  pub patches_allocated: usize,
  /// Slots returned to the pool by merges.
  pub patches_retired: usize,
}

/// Result of one `update_resolution` call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LodUpdate {
  pub transitions: Vec<Transition>,
  pub stats: LodStats,
}

impl LodUpdate {
  pub fn is_empty(&self) -> bool {
    self.transitions.is_empty()
  }
}

/// Where the tree is placed and where it is seen from.
#[derive(Clone, Copy, Debug)]
pub struct LodView {
  pub transform: Affine3A,
  pub viewer: Vec3,
}

impl LodView {
  pub fn new(transform: Affine3A, viewer: Vec3) -> Self {
    Self { transform, viewer }
  }

  /// Uniform scale of the transform (length of its x axis).
  #[inline]
  pub fn scale(&self) -> f32 {
    self.transform.matrix3.x_axis.length()
  }
}

/// Angular size of one grid segment of `patch` in radians (small angle).
pub fn angular_size(patch: &Patch, view: &LodView) -> f32 {
  let world_center = view.transform.transform_point3(patch.center());
  let distance = world_center.distance(view.viewer);
  view.scale() * patch.width() / SEGMENTS_PER_SIDE as f32 / distance
}

/// Child quadrants: offset direction and first parent sample.
const QUADRANTS: [(Vec2, usize, usize); 4] = [
  (Vec2::new(-1.0, -1.0), 0, 0),
  (Vec2::new(1.0, -1.0), HALF, 0),
  (Vec2::new(-1.0, 1.0), 0, HALF),
  (Vec2::new(1.0, 1.0), HALF, HALF),
];

/// Update the subtree under `id` for one frame.
pub fn update_resolution(
  arena: &mut PatchArena,
  id: PatchId,
  view: &LodView,
  config: &PatchLodConfig,
  noise: &HashNoise,
  out: &mut LodUpdate,
) {
  let patch = &arena[id];
  let theta = angular_size(patch, view);

  if theta > config.split_threshold {
    if patch.depth() >= config.max_depth {
      return;
    }
    let children = match patch.children() {
      Some(children) => children,
      None => split(arena, id, noise, out),
    };
    for child in children {
      update_resolution(arena, child, view, config, noise, out);
    }
  } else if theta <= config.merge_threshold {
    if !patch.is_leaf() {
      merge(arena, id, out);
    }
  } else if let Some(children) = patch.children() {
    for child in children {
      update_resolution(arena, child, view, config, noise, out);
    }
  }
}

/// Replace leaf `id` by four children stitched from its samples.
///
/// An already split patch keeps its children and reports nothing.
pub fn split(arena: &mut PatchArena, id: PatchId, noise: &HashNoise, out: &mut LodUpdate) -> [PatchId; 4] {
  let parent = &arena[id];
  if let Some(children) = parent.children() {
    return children;
  }
  let (face, offset, width, depth) = (parent.face(), parent.offset(), parent.width(), parent.depth());
  let source = *parent.positions();
  let quarter = width / 4.0;

  let mut children = [PatchId(0); 4];
  for (slot, (direction, col_start, row_start)) in children.iter_mut().zip(QUADRANTS) {
    let (child_id, reused) = arena.acquire(face, offset + direction * quarter, width / 2.0, depth + 1);
    if reused {
      out.stats.patches_reused += 1;
    } else {
      out.stats.patches_allocated += 1;
    }

    let child = &mut arena[child_id];
    copy_quadrant(&source, child.positions_mut(), col_start, row_start);
    child.apply_noise(noise, false);
    child.compute_normals();
    *slot = child_id;
  }

  arena[id].set_state(PatchState::Split { children });
  out.stats.splits += 1;
  out.transitions.push(Transition {
    kind: TransitionKind::Split,
    parent: id,
    added: SmallVec::from_buf(children),
    removed: smallvec::smallvec![id],
  });
  children
}

/// Retire every descendant of `id` and make it a leaf again.
pub fn merge(arena: &mut PatchArena, id: PatchId, out: &mut LodUpdate) {
  let Some(children) = arena[id].children() else {
    return;
  };
  let removed = frontier_under(arena, id);
  for child in children {
    out.stats.patches_retired += arena.retire(child);
  }
  arena[id].set_state(PatchState::Leaf);

  out.stats.merges += 1;
  out.transitions.push(Transition {
    kind: TransitionKind::Merge,
    parent: id,
    added: smallvec::smallvec![id],
    removed,
  });
}

/// Leaves of the subtree rooted at `id`, in depth-first quadrant order.
pub fn frontier_under(arena: &PatchArena, id: PatchId) -> SmallVec<[PatchId; 4]> {
  let mut leaves = SmallVec::new();
  let mut stack: SmallVec<[PatchId; 16]> = smallvec::smallvec![id];
  while let Some(next) = stack.pop() {
    match arena[next].state() {
      PatchState::Leaf => leaves.push(next),
      // Reversed so children pop in quadrant order
      PatchState::Split { children } => stack.extend(children.into_iter().rev()),
    }
  }
  leaves
}

#[cfg(test)]
#[path = "lod_test.rs"]
mod lod_test;
