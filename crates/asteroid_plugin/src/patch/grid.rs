//! Fixed topology shared by every patch.
//!
//! A patch is a 9x9 vertex grid (8 segments per side). Vertex `(col, row)`
//! lives at `col + row * 9`; columns run along face space `x`, rows along
//! face space `y`. The index list never changes, only positions do.

use glam::Vec3;

pub const SEGMENTS_PER_SIDE: usize = 8;
pub const VERTICES_PER_SIDE: usize = SEGMENTS_PER_SIDE + 1;
pub const VERTEX_COUNT: usize = VERTICES_PER_SIDE * VERTICES_PER_SIDE;

/// Two triangles per cell, three indices each.
pub const INDEX_COUNT: usize = SEGMENTS_PER_SIDE * SEGMENTS_PER_SIDE * 6;

/// First column/row of the upper half of the grid.
pub const HALF: usize = SEGMENTS_PER_SIDE / 2;

/// Sample the patch's LOD test and position are taken from.
pub const CENTER_INDEX: usize = grid_index(HALF, HALF);

/// Position buffer of one patch.
pub type GridPositions = [Vec3; VERTEX_COUNT];

#[inline]
pub const fn grid_index(col: usize, row: usize) -> usize {
  col + row * VERTICES_PER_SIDE
}

/// True for samples on the outer ring of the grid.
#[inline]
pub const fn is_boundary(col: usize, row: usize) -> bool {
  col == 0 || row == 0 || col == SEGMENTS_PER_SIDE || row == SEGMENTS_PER_SIDE
}

const fn build_indices() -> [u32; INDEX_COUNT] {
  let mut indices = [0u32; INDEX_COUNT];
  let mut i = 0;
  let mut row = 0;
  while row < SEGMENTS_PER_SIDE {
    let mut col = 0;
    while col < SEGMENTS_PER_SIDE {
      let a = grid_index(col, row) as u32;
      let b = grid_index(col + 1, row) as u32;
      let c = grid_index(col + 1, row + 1) as u32;
      let d = grid_index(col, row + 1) as u32;
      indices[i] = a;
      indices[i + 1] = b;
      indices[i + 2] = c;
      indices[i + 3] = a;
      indices[i + 4] = c;
      indices[i + 5] = d;
      i += 6;
      col += 1;
    }
    row += 1;
  }
  indices
}

/// Triangle list of the grid, counter-clockwise in face space.
pub static GRID_INDICES: [u32; INDEX_COUNT] = build_indices();

/// Fill `child` from one quadrant of `parent`.
///
/// `(col_start, row_start)` is the quadrant's first parent sample, one of
/// `0` or [`HALF`] on each axis. Three passes, in this order:
/// 1. even columns of even rows are copied from the parent at double stride;
/// 2. even columns of odd rows are the average of the rows above and below;
/// 3. odd columns of every row are the average of their left and right
///    neighbours.
///
/// Every child sample on an even row and even column is a parent sample. The
/// others on the outer ring are averages of two parent samples along that
/// ring, so two siblings compute their shared seam from the same inputs.
pub fn copy_quadrant(parent: &GridPositions, child: &mut GridPositions, col_start: usize, row_start: usize) {
  for row in 0..=HALF {
    for col in 0..=HALF {
      child[grid_index(col * 2, row * 2)] = parent[grid_index(col_start + col, row_start + row)];
    }
  }

  for row in (1..VERTICES_PER_SIDE).step_by(2) {
    for col in (0..VERTICES_PER_SIDE).step_by(2) {
      let below = child[grid_index(col, row - 1)];
      let above = child[grid_index(col, row + 1)];
      child[grid_index(col, row)] = below.lerp(above, 0.5);
    }
  }

  for row in 0..VERTICES_PER_SIDE {
    for col in (1..VERTICES_PER_SIDE).step_by(2) {
      let left = child[grid_index(col - 1, row)];
      let right = child[grid_index(col + 1, row)];
      child[grid_index(col, row)] = left.lerp(right, 0.5);
    }
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
