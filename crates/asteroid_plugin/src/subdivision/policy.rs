//! Per-triangle stopping criteria for a subdivision pass.

use glam::Vec3;

use super::primitives::Triangle;
use crate::types::Vertex;

/// Decides, independently per triangle, whether it splits in this pass.
pub trait SubdivisionPolicy {
  fn should_subdivide(&self, triangle: &Triangle, vertices: &[Vertex]) -> bool;
}

/// Split every triangle whose area is at least `min_area`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformArea {
  pub min_area: f32,
}

impl SubdivisionPolicy for UniformArea {
  #[inline]
  fn should_subdivide(&self, triangle: &Triangle, vertices: &[Vertex]) -> bool {
    triangle.area(vertices) >= self.min_area
  }
}

/// Finer near `point`, coarser far away.
///
/// `min_area = reference_area * |a - point|`, measured from the triangle's
/// first corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceWeighted {
  pub point: Vec3,
  pub reference_area: f32,
}

impl SubdivisionPolicy for DistanceWeighted {
  #[inline]
  fn should_subdivide(&self, triangle: &Triangle, vertices: &[Vertex]) -> bool {
    let corner = vertices[triangle.a.index()].position;
    let min_area = self.reference_area * corner.distance(self.point);
    triangle.area(vertices) >= min_area
  }
}

impl<F> SubdivisionPolicy for F
where
  F: Fn(&Triangle, &[Vertex]) -> bool,
{
  fn should_subdivide(&self, triangle: &Triangle, vertices: &[Vertex]) -> bool {
    self(triangle, vertices)
  }
}
