use super::*;
use crate::noise::{Displacement, Displacer};

/// Topology with one CCW triangle in the XY plane, normals +Z.
fn triangle_topology(mode: Displacement) -> (Topology, Triangle) {
  let mut topo = Topology::new(Displacer::new(mode));
  let a = topo.add_vertex(Vertex::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Z));
  let b = topo.add_vertex(Vertex::new(Vec3::new(2.0, 0.0, 0.0), Vec3::Z));
  let c = topo.add_vertex(Vertex::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Z));
  let ab = topo.add_edge(a, b);
  let bc = topo.add_edge(b, c);
  let ca = topo.add_edge(c, a);
  let tri = Triangle {
    ab,
    bc,
    ca,
    a,
    b,
    c,
    uvs: None,
  };
  (topo, tri)
}

// =========================================================================
// Edge caches
// =========================================================================

/// Repeated midpoint requests return the same vertex.
#[test]
fn test_midpoint_is_memoized() {
  let (mut topo, tri) = triangle_topology(Displacement::default());
  let first = topo.midpoint(tri.ab);
  let count = topo.vertices().len();
  let second = topo.midpoint(tri.ab);

  assert_eq!(first, second);
  assert_eq!(topo.vertices().len(), count, "No new vertex on cache hit");
}

#[test]
fn test_flat_midpoint_is_exact_center() {
  let (mut topo, tri) = triangle_topology(Displacement::Flat);
  let mid = topo.midpoint(tri.ab);

  assert_eq!(topo.vertex(mid).position, Vec3::new(1.0, 0.0, 0.0));
  assert_eq!(topo.vertex(mid).normal, Vec3::Z);
}

/// Displacement stays along the normal and within half the edge length.
#[test]
fn test_displaced_midpoint_moves_along_normal() {
  let (mut topo, tri) = triangle_topology(Displacement::HashNoise {
    amount: 1.0,
    seed: 11,
  });
  let mid = topo.midpoint(tri.bc);
  let p = topo.vertex(mid).position;

  assert_eq!(p.x, 1.0);
  assert_eq!(p.y, 1.0);
  let edge_length = 8.0f32.sqrt();
  assert!(p.z.abs() <= 0.5 * edge_length);
}

#[test]
fn test_children_are_memoized() {
  let (mut topo, tri) = triangle_topology(Displacement::Flat);
  let first = topo.children(tri.ab);
  let second = topo.children(tri.ab);

  assert_eq!(first, second);
  assert_eq!(topo.edge(tri.ab).cached_children(), Some(first));
}

#[test]
fn test_children_run_from_endpoints_to_midpoint() {
  let (mut topo, tri) = triangle_topology(Displacement::Flat);
  let [c1, c2] = topo.children(tri.ab);
  let mid = topo.edge(tri.ab).cached_midpoint().unwrap();

  assert_eq!(topo.edge(c1).v1, tri.a);
  assert_eq!(topo.edge(c1).v2, mid);
  assert_eq!(topo.edge(c2).v1, tri.b);
  assert_eq!(topo.edge(c2).v2, mid);
}

#[test]
fn test_child_edge_by_endpoint() {
  let (mut topo, tri) = triangle_topology(Displacement::Flat);
  let [c1, c2] = topo.children(tri.ca);

  assert_eq!(topo.child_edge(tri.ca, tri.c), Ok(c1));
  assert_eq!(topo.child_edge(tri.ca, tri.a), Ok(c2));
}

/// A vertex that is not an endpoint is a fatal consistency error.
#[test]
fn test_child_edge_rejects_foreign_vertex() {
  let (mut topo, tri) = triangle_topology(Displacement::Flat);
  let err = topo.child_edge(tri.ab, tri.c).unwrap_err();

  assert_eq!(
    err,
    ConsistencyError::NotAnEndpoint {
      edge: tri.ab.0,
      vertex: tri.c.0,
    }
  );
}

// =========================================================================
// Triangle
// =========================================================================

#[test]
fn test_area() {
  let (topo, tri) = triangle_topology(Displacement::Flat);
  assert_eq!(tri.area(topo.vertices()), 2.0);
}

/// Flat subdivision: children tile the parent exactly, each a quarter.
#[test]
fn test_subdivide_area_sums_to_parent() {
  let (mut topo, tri) = triangle_topology(Displacement::Flat);
  let parent_area = tri.area(topo.vertices());
  let children = tri.subdivide(&mut topo).unwrap();

  let total: f32 = children.iter().map(|t| t.area(topo.vertices())).sum();
  assert!((total - parent_area).abs() < 1e-5);
  for child in &children {
    assert!(child.area(topo.vertices()) <= parent_area / 2.0);
  }
}

#[test]
fn test_subdivide_corners_keep_parent_vertices() {
  let (mut topo, tri) = triangle_topology(Displacement::Flat);
  let [_, ca, cb, cc] = tri.subdivide(&mut topo).unwrap();

  assert_eq!(ca.a, tri.a);
  assert_eq!(cb.b, tri.b);
  assert_eq!(cc.c, tri.c);
}

/// Corner triangles reuse the parent edges' cached children.
#[test]
fn test_subdivide_reuses_child_edges() {
  let (mut topo, tri) = triangle_topology(Displacement::Flat);
  let [_, ca, cb, cc] = tri.subdivide(&mut topo).unwrap();

  let [ab_a, ab_b] = topo.edge(tri.ab).cached_children().unwrap();
  let [bc_b, bc_c] = topo.edge(tri.bc).cached_children().unwrap();
  let [ca_c, ca_a] = topo.edge(tri.ca).cached_children().unwrap();

  assert_eq!(ca.ab, ab_a);
  assert_eq!(ca.ca, ca_a);
  assert_eq!(cb.ab, ab_b);
  assert_eq!(cb.bc, bc_b);
  assert_eq!(cc.bc, bc_c);
  assert_eq!(cc.ca, ca_c);
}

/// Every child triangle keeps the parent's winding.
#[test]
fn test_subdivide_preserves_winding() {
  let (mut topo, tri) = triangle_topology(Displacement::Flat);
  let children = tri.subdivide(&mut topo).unwrap();

  for child in &children {
    let [a, b, c] = child.positions(topo.vertices());
    assert!((b - a).cross(c - a).z > 0.0);
  }
}

#[test]
fn test_subdivide_interpolates_uvs() {
  let (mut topo, mut tri) = triangle_topology(Displacement::Flat);
  tri.uvs = Some([Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]);
  let [middle, corner_a, _, _] = tri.subdivide(&mut topo).unwrap();

  assert_eq!(
    middle.uvs,
    Some([Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.0), Vec2::new(0.5, 0.5)])
  );
  assert_eq!(corner_a.uvs.unwrap()[0], Vec2::ZERO);
}

/// A degenerate triangle subdivides into zero-area children without error.
#[test]
fn test_degenerate_triangle_subdivides() {
  let mut topo = Topology::new(Displacer::new(Displacement::Flat));
  let a = topo.add_vertex(Vertex::new(Vec3::ZERO, Vec3::Z));
  let b = topo.add_vertex(Vertex::new(Vec3::X, Vec3::Z));
  let c = topo.add_vertex(Vertex::new(Vec3::X * 2.0, Vec3::Z));
  let tri = Triangle {
    ab: topo.add_edge(a, b),
    bc: topo.add_edge(b, c),
    ca: topo.add_edge(c, a),
    a,
    b,
    c,
    uvs: None,
  };

  let children = tri.subdivide(&mut topo).unwrap();
  for child in &children {
    assert_eq!(child.area(topo.vertices()), 0.0);
  }
}
