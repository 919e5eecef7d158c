//! Ray cast targets for the shrink-wrap pass.
//!
//! A target answers one question: how far from its center does a ray in a
//! given direction leave the surface for the last time. Taking the farthest
//! hit keeps concave targets and targets enclosing their own center working.

use glam::{Affine3A, Vec3};

use crate::types::MeshOutput;

/// Determinant below which a ray is treated as parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Surface that patch vertices can be projected onto.
///
/// `Sync` so the shrink-wrap pass can cast from several threads at once.
pub trait SurfaceTarget: Sync {
  /// World-space point rays are cast from.
  fn center(&self) -> Vec3;

  /// Largest distance of the surface from [`SurfaceTarget::center`].
  fn bounding_radius(&self) -> f32;

  /// Distance along `dir` to the farthest intersection in front of `origin`.
  fn farthest_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32>;
}

/// Double-sided Moller-Trumbore test. Returns the ray parameter `t >= 0`.
#[inline]
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
  let edge1 = b - a;
  let edge2 = c - a;
  let h = dir.cross(edge2);
  let det = edge1.dot(h);
  if !det.is_finite() || det.abs() <= PARALLEL_EPSILON {
    return None;
  }

  let inv_det = 1.0 / det;
  let s = origin - a;
  let u = inv_det * s.dot(h);
  if !(0.0..=1.0).contains(&u) {
    return None;
  }

  let q = s.cross(edge1);
  let v = inv_det * dir.dot(q);
  if v < 0.0 || u + v > 1.0 {
    return None;
  }

  let t = inv_det * edge2.dot(q);
  (t.is_finite() && t >= 0.0).then_some(t)
}

/// Indexed triangle mesh placed in the world by an affine transform.
pub struct TriangleSoupTarget {
  positions: Vec<Vec3>,
  indices: Vec<u32>,
  center: Vec3,
  radius: f32,
}

impl TriangleSoupTarget {
  /// Target in its own local space.
  pub fn new(mesh: MeshOutput) -> Self {
    Self::with_transform(mesh, Affine3A::IDENTITY)
  }

  /// Target transformed into world space. The center is the translation.
  pub fn with_transform(mesh: MeshOutput, transform: Affine3A) -> Self {
    let positions: Vec<Vec3> = mesh
      .positions
      .iter()
      .map(|p| transform.transform_point3(Vec3::from(*p)))
      .collect();
    let center = Vec3::from(transform.translation);
    let radius = positions.iter().map(|p| p.distance(center)).fold(0.0, f32::max);
    Self {
      positions,
      indices: mesh.indices,
      center,
      radius,
    }
  }

  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }
}

impl SurfaceTarget for TriangleSoupTarget {
  fn center(&self) -> Vec3 {
    self.center
  }

  fn bounding_radius(&self) -> f32 {
    self.radius
  }

  fn farthest_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
    self
      .indices
      .chunks_exact(3)
      .filter_map(|tri| {
        let a = *self.positions.get(tri[0] as usize)?;
        let b = *self.positions.get(tri[1] as usize)?;
        let c = *self.positions.get(tri[2] as usize)?;
        ray_triangle(origin, dir, a, b, c)
      })
      .reduce(f32::max)
  }
}

/// Analytic sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereTarget {
  pub center: Vec3,
  pub radius: f32,
}

impl SphereTarget {
  pub fn new(center: Vec3, radius: f32) -> Self {
    Self { center, radius }
  }
}

impl SurfaceTarget for SphereTarget {
  fn center(&self) -> Vec3 {
    self.center
  }

  fn bounding_radius(&self) -> f32 {
    self.radius
  }

  fn farthest_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
    let dir = dir.try_normalize()?;
    let to_origin = origin - self.center;
    let b = to_origin.dot(dir);
    let c = to_origin.length_squared() - self.radius * self.radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
      return None;
    }
    // Far root; the near one is never larger
    let t = -b + discriminant.sqrt();
    (t >= 0.0).then_some(t)
  }
}

#[cfg(test)]
#[path = "raycast_test.rs"]
mod raycast_test;
