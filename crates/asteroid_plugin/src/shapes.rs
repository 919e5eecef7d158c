//! Base meshes for free-form subdivision and shrink-wrap targets.

use glam::Vec3;

use crate::types::MeshInput;

/// Icosahedron faces, counter-clockwise seen from outside.
const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
  // Around vertex 0
  [0, 11, 5],
  [0, 5, 1],
  [0, 1, 7],
  [0, 7, 10],
  [0, 10, 11],
  // Upper band
  [1, 5, 9],
  [5, 11, 4],
  [11, 10, 2],
  [10, 7, 6],
  [7, 1, 8],
  // Around vertex 3
  [3, 9, 4],
  [3, 4, 2],
  [3, 2, 6],
  [3, 6, 8],
  [3, 8, 9],
  // Lower band
  [4, 9, 5],
  [2, 4, 11],
  [6, 2, 10],
  [8, 6, 7],
  [9, 8, 1],
];

/// Indexed icosahedron with all vertices at `radius` from the origin.
///
/// 12 shared vertices, 20 triangles, normals pointing outward.
pub fn icosahedron(radius: f32) -> MeshInput {
  let phi = (1.0 + 5.0f32.sqrt()) * 0.5;
  let len = (1.0 + phi * phi).sqrt();
  let (a, b) = (1.0 / len, phi / len);

  let directions = [
    Vec3::new(-a, b, 0.0),
    Vec3::new(a, b, 0.0),
    Vec3::new(-a, -b, 0.0),
    Vec3::new(a, -b, 0.0),
    Vec3::new(0.0, -a, b),
    Vec3::new(0.0, a, b),
    Vec3::new(0.0, -a, -b),
    Vec3::new(0.0, a, -b),
    Vec3::new(b, 0.0, -a),
    Vec3::new(b, 0.0, a),
    Vec3::new(-b, 0.0, -a),
    Vec3::new(-b, 0.0, a),
  ];

  let positions = directions.iter().map(|d| (*d * radius).to_array()).collect();
  let normals = directions.iter().map(|d| d.to_array()).collect();
  let indices = ICOSAHEDRON_FACES.iter().flatten().copied().collect();

  MeshInput::new(positions, normals, indices)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_icosahedron_counts() {
    let mesh = icosahedron(1.0);
    assert_eq!(mesh.positions.len(), 12);
    assert_eq!(mesh.normals.len(), 12);
    assert_eq!(mesh.indices.as_ref().map(Vec::len), Some(60));
  }

  #[test]
  fn test_icosahedron_radius() {
    let mesh = icosahedron(2.0);
    for p in &mesh.positions {
      assert!((Vec3::from(*p).length() - 2.0).abs() < 1e-5);
    }
  }

  /// Every face normal points away from the origin.
  #[test]
  fn test_icosahedron_winding_is_outward() {
    let mesh = icosahedron(1.0);
    let p = |i: u32| Vec3::from(mesh.positions[i as usize]);
    for face in ICOSAHEDRON_FACES {
      let [a, b, c] = face.map(p);
      let normal = (b - a).cross(c - a);
      let centroid = (a + b + c) / 3.0;
      assert!(normal.dot(centroid) > 0.0, "Face {face:?} winds inward");
    }
  }

  /// Each of the 30 edges is shared by exactly two faces.
  #[test]
  fn test_icosahedron_is_closed() {
    let mut edges = std::collections::HashMap::new();
    for [a, b, c] in ICOSAHEDRON_FACES {
      for (u, v) in [(a, b), (b, c), (c, a)] {
        *edges.entry((u.min(v), u.max(v))).or_insert(0) += 1;
      }
    }
    assert_eq!(edges.len(), 30);
    assert!(edges.values().all(|&n| n == 2));
  }
}
