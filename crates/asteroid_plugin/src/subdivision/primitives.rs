//! Vertex/Edge/Triangle primitives stored in index arenas.
//!
//! Edges own their lazily computed midpoint and child edges. The cache key is
//! the edge id, never the endpoint coordinates: two triangles that share an
//! edge id get the same midpoint vertex, which is what keeps the refined
//! surface free of cracks.

use glam::{Vec2, Vec3};

use crate::error::ConsistencyError;
use crate::noise::Displacer;
use crate::types::Vertex;

/// Index of a vertex in [`Topology::vertices`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

/// Index of an edge in [`Topology::edges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl VertexId {
  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl EdgeId {
  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Ordered pair of vertices with memoized subdivision results.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
  pub v1: VertexId,
  pub v2: VertexId,
  midpoint: Option<VertexId>,
  /// `[v1 -> midpoint, v2 -> midpoint]`
  children: Option<[EdgeId; 2]>,
}

impl Edge {
  pub fn new(v1: VertexId, v2: VertexId) -> Self {
    Self {
      v1,
      v2,
      midpoint: None,
      children: None,
    }
  }

  /// Cached midpoint, if it was requested before.
  pub fn cached_midpoint(&self) -> Option<VertexId> {
    self.midpoint
  }

  /// Cached children, if they were requested before.
  pub fn cached_children(&self) -> Option<[EdgeId; 2]> {
    self.children
  }
}

/// Vertex and edge arenas plus the displacement source for new midpoints.
pub struct Topology {
  pub(crate) vertices: Vec<Vertex>,
  pub(crate) edges: Vec<Edge>,
  pub(crate) displacer: Displacer,
}

impl Topology {
  pub(crate) fn new(displacer: Displacer) -> Self {
    Self {
      vertices: Vec::new(),
      edges: Vec::new(),
      displacer,
    }
  }

  pub fn vertices(&self) -> &[Vertex] {
    &self.vertices
  }

  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  #[inline]
  pub fn vertex(&self, id: VertexId) -> &Vertex {
    &self.vertices[id.index()]
  }

  #[inline]
  pub fn edge(&self, id: EdgeId) -> &Edge {
    &self.edges[id.index()]
  }

  pub(crate) fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
    self.vertices.push(vertex);
    VertexId(self.vertices.len() as u32 - 1)
  }

  pub(crate) fn add_edge(&mut self, v1: VertexId, v2: VertexId) -> EdgeId {
    self.edges.push(Edge::new(v1, v2));
    EdgeId(self.edges.len() as u32 - 1)
  }

  /// Memoized midpoint of an edge.
  ///
  /// The first call interpolates position and normal and displaces the point
  /// along the normal by `amount * |v1 - v2| * f`, `f` in `[-0.5, 0.5]`.
  /// Later calls return the same vertex id.
  pub fn midpoint(&mut self, id: EdgeId) -> VertexId {
    let edge = &self.edges[id.index()];
    if let Some(mid) = edge.midpoint {
      return mid;
    }
    let a = self.vertices[edge.v1.index()];
    let b = self.vertices[edge.v2.index()];

    let center = a.position.lerp(b.position, 0.5);
    let normal = a.normal.lerp(b.normal, 0.5).normalize_or_zero();
    let length = a.position.distance(b.position);
    let offset = normal * (length * self.displacer.factor(center));

    let mid = self.add_vertex(Vertex::new(center + offset, normal));
    self.edges[id.index()].midpoint = Some(mid);
    mid
  }

  /// Memoized child edges `[v1 -> mid, v2 -> mid]`.
  pub fn children(&mut self, id: EdgeId) -> [EdgeId; 2] {
    if let Some(children) = self.edges[id.index()].children {
      return children;
    }
    let mid = self.midpoint(id);
    let (v1, v2) = {
      let edge = &self.edges[id.index()];
      (edge.v1, edge.v2)
    };
    let children = [self.add_edge(v1, mid), self.add_edge(v2, mid)];
    self.edges[id.index()].children = Some(children);
    children
  }

  /// Child edge starting at `endpoint`.
  ///
  /// Fails when `endpoint` is neither `v1` nor `v2` of the edge.
  pub fn child_edge(&mut self, id: EdgeId, endpoint: VertexId) -> Result<EdgeId, ConsistencyError> {
    let [first, second] = self.children(id);
    if self.edges[first.index()].v1 == endpoint {
      Ok(first)
    } else if self.edges[second.index()].v1 == endpoint {
      Ok(second)
    } else {
      Err(ConsistencyError::NotAnEndpoint {
        edge: id.0,
        vertex: endpoint.0,
      })
    }
  }
}

/// Triangle referencing three edges and three vertices of a [`Topology`].
///
/// Edges run `ab`, `bc`, `ca`. UVs, when present, belong to `a`, `b`, `c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
  pub ab: EdgeId,
  pub bc: EdgeId,
  pub ca: EdgeId,
  pub a: VertexId,
  pub b: VertexId,
  pub c: VertexId,
  pub uvs: Option<[Vec2; 3]>,
}

impl Triangle {
  pub fn corners(&self) -> [VertexId; 3] {
    [self.a, self.b, self.c]
  }

  /// Half the magnitude of `(b - a) x (c - a)`.
  pub fn area(&self, vertices: &[Vertex]) -> f32 {
    let a = vertices[self.a.index()].position;
    let b = vertices[self.b.index()].position;
    let c = vertices[self.c.index()].position;
    (b - a).cross(c - a).length() * 0.5
  }

  /// Corner positions in `a`, `b`, `c` order.
  pub fn positions(&self, vertices: &[Vertex]) -> [Vec3; 3] {
    [
      vertices[self.a.index()].position,
      vertices[self.b.index()].position,
      vertices[self.c.index()].position,
    ]
  }

  /// Split into `[middle, corner_a, corner_b, corner_c]`.
  ///
  /// Corner triangles reuse the cached child edges of the two parent edges
  /// touching that corner, so a neighbour that already split the shared edge
  /// sees the exact same vertices.
  pub fn subdivide(&self, topo: &mut Topology) -> Result<[Triangle; 4], ConsistencyError> {
    let ab_mid = topo.midpoint(self.ab);
    let bc_mid = topo.midpoint(self.bc);
    let ca_mid = topo.midpoint(self.ca);

    // Inner edges are private to this triangle
    let a_edge = topo.add_edge(ab_mid, ca_mid);
    let b_edge = topo.add_edge(ab_mid, bc_mid);
    let c_edge = topo.add_edge(bc_mid, ca_mid);

    let uvs = self.uvs.map(|[ua, ub, uc]| {
      let uab = ua.lerp(ub, 0.5);
      let ubc = ub.lerp(uc, 0.5);
      let uca = uc.lerp(ua, 0.5);
      [
        [uca, uab, ubc],
        [ua, uab, uca],
        [uab, ub, ubc],
        [uca, ubc, uc],
      ]
    });
    let uv = |i: usize| uvs.map(|u| u[i]);

    let middle = Triangle {
      ab: a_edge,
      bc: b_edge,
      ca: c_edge,
      a: ca_mid,
      b: ab_mid,
      c: bc_mid,
      uvs: uv(0),
    };
    let corner_a = Triangle {
      ab: topo.child_edge(self.ab, self.a)?,
      bc: a_edge,
      ca: topo.child_edge(self.ca, self.a)?,
      a: self.a,
      b: ab_mid,
      c: ca_mid,
      uvs: uv(1),
    };
    let corner_b = Triangle {
      ab: topo.child_edge(self.ab, self.b)?,
      bc: topo.child_edge(self.bc, self.b)?,
      ca: b_edge,
      a: ab_mid,
      b: self.b,
      c: bc_mid,
      uvs: uv(2),
    };
    let corner_c = Triangle {
      ab: c_edge,
      bc: topo.child_edge(self.bc, self.c)?,
      ca: topo.child_edge(self.ca, self.c)?,
      a: ca_mid,
      b: bc_mid,
      c: self.c,
      uvs: uv(3),
    };

    Ok([middle, corner_a, corner_b, corner_c])
  }
}

#[cfg(test)]
#[path = "primitives_test.rs"]
mod primitives_test;
