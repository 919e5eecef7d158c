use super::*;
use crate::shapes;
use crate::subdivision::{FractalMesh, SubdivisionConfig};

fn icosahedron_target(radius: f32, transform: Affine3A) -> TriangleSoupTarget {
  let input = shapes::icosahedron(radius);
  let output = MeshOutput {
    positions: input.positions,
    normals: input.normals,
    uvs: Vec::new(),
    indices: input.indices.unwrap_or_default(),
  };
  TriangleSoupTarget::with_transform(output, transform)
}

#[test]
fn test_ray_triangle_hits_both_sides() {
  let (a, b, c) = (Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));

  let front = ray_triangle(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z, a, b, c);
  let back = ray_triangle(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, a, b, c);

  assert_eq!(front, Some(2.0));
  assert_eq!(back, Some(3.0));
}

#[test]
fn test_ray_triangle_misses() {
  let (a, b, c) = (Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));

  // Outside the triangle
  assert_eq!(ray_triangle(Vec3::new(5.0, 0.0, 2.0), Vec3::NEG_Z, a, b, c), None);
  // Pointing away
  assert_eq!(ray_triangle(Vec3::new(0.0, 0.0, 2.0), Vec3::Z, a, b, c), None);
  // Parallel
  assert_eq!(ray_triangle(Vec3::new(0.0, 0.0, 2.0), Vec3::X, a, b, c), None);
}

/// From inside a convex target every direction hits between the inscribed
/// and the circumscribed radius.
#[test]
fn test_soup_farthest_hit_from_center() {
  let target = icosahedron_target(2.0, Affine3A::IDENTITY);
  assert!((target.bounding_radius() - 2.0).abs() < 1e-5);

  for dir in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE.normalize(), Vec3::new(-0.3, 0.8, -0.1).normalize()] {
    let t = target.farthest_hit(target.center(), dir).unwrap();
    assert!(t <= 2.0 + 1e-4, "Hit {t} beyond circumradius");
    assert!(t >= 2.0 * 0.79, "Hit {t} inside the inradius");
  }
}

#[test]
fn test_soup_transform_moves_center_and_scales_radius() {
  let transform = Affine3A::from_scale_rotation_translation(
    Vec3::splat(3.0),
    glam::Quat::from_rotation_y(0.4),
    Vec3::new(10.0, -2.0, 5.0),
  );
  let target = icosahedron_target(1.0, transform);

  assert_eq!(target.center(), Vec3::new(10.0, -2.0, 5.0));
  assert!((target.bounding_radius() - 3.0).abs() < 1e-4);
  assert!(target.farthest_hit(target.center(), Vec3::Y).is_some());
}

/// From outside, the farthest hit is the exit point, not the entry point.
#[test]
fn test_soup_farthest_hit_takes_exit_point() {
  let target = icosahedron_target(1.0, Affine3A::IDENTITY);
  let t = target.farthest_hit(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();
  assert!(t > 5.0);
}

#[test]
fn test_soup_miss_returns_none() {
  let target = icosahedron_target(1.0, Affine3A::IDENTITY);
  assert_eq!(target.farthest_hit(Vec3::new(0.0, 0.0, 5.0), Vec3::Z), None);
  assert_eq!(target.triangle_count(), 20);
}

#[test]
fn test_subdivided_target_stays_hit() {
  let mut rock = FractalMesh::from_input(&shapes::icosahedron(2.0), SubdivisionConfig::default()).unwrap();
  rock.subdivide(0.0).unwrap();
  let target = TriangleSoupTarget::new(rock.to_output());

  for dir in [Vec3::X, Vec3::NEG_Y, Vec3::new(0.2, -0.5, 0.7).normalize()] {
    assert!(target.farthest_hit(Vec3::ZERO, dir).is_some());
  }
}

#[test]
fn test_sphere_target() {
  let sphere = SphereTarget::new(Vec3::new(1.0, 0.0, 0.0), 2.0);

  assert_eq!(sphere.farthest_hit(sphere.center(), Vec3::Y), Some(2.0));
  let t = sphere.farthest_hit(Vec3::new(-5.0, 0.0, 0.0), Vec3::X).unwrap();
  assert!((t - 8.0).abs() < 1e-5);
  assert_eq!(sphere.farthest_hit(Vec3::new(-5.0, 0.0, 0.0), Vec3::NEG_X), None);
  assert_eq!(sphere.farthest_hit(Vec3::new(0.0, 5.0, 0.0), Vec3::X), None);
}
