//! FractalMesh - free-form edge-cached subdivision mesh.
//!
//! Built once from a triangulated input mesh, then refined in place by
//! subdivision passes. A pass walks the current triangle list once and
//! replaces it with the next generation: every triangle either survives
//! unchanged or is replaced by its four children.
//!
//! The base graph merges coincident input vertices through a quantized spatial
//! hash, then looks up shared edges by the unordered pair of merged vertex
//! indices. From there on, sharing is carried by edge ids alone.

use std::collections::HashMap;

use glam::{Vec2, Vec3};

use super::config::SubdivisionConfig;
use super::policy::{DistanceWeighted, SubdivisionPolicy, UniformArea};
use super::primitives::{EdgeId, Topology, Triangle, VertexId};
use crate::error::{ConsistencyError, ConstructionError};
use crate::noise::Displacer;
use crate::types::{MeshInput, MeshOutput, Vertex};

/// Triangle mesh refined by edge-cached 1-to-4 subdivision.
pub struct FractalMesh {
  topology: Topology,
  triangles: Vec<Triangle>,
  base_vertex_count: usize,
  generation: u32,
  config: SubdivisionConfig,
}

/// Quantized position used to merge coincident input vertices.
fn cluster_key(p: [f32; 3], tolerance: f32) -> [i64; 3] {
  let inv = 1.0 / tolerance.max(f32::MIN_POSITIVE) as f64;
  [
    (p[0] as f64 * inv).round() as i64,
    (p[1] as f64 * inv).round() as i64,
    (p[2] as f64 * inv).round() as i64,
  ]
}

fn validate_input(input: &MeshInput) -> Result<&[u32], ConstructionError> {
  let indices = input.indices.as_deref().ok_or(ConstructionError::MissingIndex)?;
  if indices.len() % 3 != 0 {
    return Err(ConstructionError::IndexNotTriangulated { len: indices.len() });
  }
  let vertex_count = input.positions.len();
  if input.normals.len() != vertex_count {
    return Err(ConstructionError::AttributeCountMismatch {
      attribute: "normal",
      expected: vertex_count,
      actual: input.normals.len(),
    });
  }
  if let Some(uvs) = &input.uvs {
    if uvs.len() != vertex_count {
      return Err(ConstructionError::AttributeCountMismatch {
        attribute: "uv",
        expected: vertex_count,
        actual: uvs.len(),
      });
    }
  }
  if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
    return Err(ConstructionError::IndexOutOfRange { index, vertex_count });
  }
  Ok(indices)
}

impl FractalMesh {
  /// Build the generation-0 graph from a triangulated, indexed mesh.
  ///
  /// The input is fully validated before any work starts.
  pub fn from_input(input: &MeshInput, config: SubdivisionConfig) -> Result<Self, ConstructionError> {
    let indices = validate_input(input)?;

    let mut topology = Topology::new(Displacer::new(config.displacement));

    // Merge coincident vertices; normals of a cluster are averaged
    let mut clusters: HashMap<[i64; 3], VertexId> = HashMap::new();
    let mut normal_sums: Vec<Vec3> = Vec::new();
    let mut slot_to_vertex: Vec<VertexId> = Vec::with_capacity(input.positions.len());
    for (position, normal) in input.positions.iter().zip(&input.normals) {
      let key = cluster_key(*position, config.merge_tolerance);
      let id = *clusters.entry(key).or_insert_with(|| {
        normal_sums.push(Vec3::ZERO);
        topology.add_vertex(Vertex::new(Vec3::from(*position), Vec3::from(*normal)))
      });
      normal_sums[id.index()] += Vec3::from(*normal);
      slot_to_vertex.push(id);
    }
    for (vertex, sum) in topology.vertices.iter_mut().zip(&normal_sums) {
      if let Some(n) = sum.try_normalize() {
        vertex.normal = n;
      }
    }
    let base_vertex_count = topology.vertices.len();

    // Shared edges keyed by the unordered pair of merged vertex indices
    let mut base_edges: HashMap<(VertexId, VertexId), EdgeId> = HashMap::new();
    let mut find_or_make_edge = |topology: &mut Topology, v1: VertexId, v2: VertexId| {
      let key = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
      *base_edges.entry(key).or_insert_with(|| topology.add_edge(v1, v2))
    };

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    for corner in indices.chunks_exact(3) {
      let [ia, ib, ic] = [corner[0] as usize, corner[1] as usize, corner[2] as usize];
      let (a, b, c) = (slot_to_vertex[ia], slot_to_vertex[ib], slot_to_vertex[ic]);
      let ab = find_or_make_edge(&mut topology, a, b);
      let bc = find_or_make_edge(&mut topology, b, c);
      let ca = find_or_make_edge(&mut topology, c, a);
      let uvs = input
        .uvs
        .as_ref()
        .map(|uvs| [Vec2::from(uvs[ia]), Vec2::from(uvs[ib]), Vec2::from(uvs[ic])]);
      triangles.push(Triangle {
        ab,
        bc,
        ca,
        a,
        b,
        c,
        uvs,
      });
    }

    tracing::debug!(
      input_vertices = input.positions.len(),
      base_vertices = base_vertex_count,
      edges = topology.edges.len(),
      triangles = triangles.len(),
      "built subdivision base graph"
    );

    Ok(Self {
      topology,
      triangles,
      base_vertex_count,
      generation: 0,
      config,
    })
  }

  /// Merge several meshes that already share one coordinate space.
  ///
  /// UVs survive only if every part carries them.
  pub fn from_outputs(parts: &[MeshOutput], config: SubdivisionConfig) -> Result<Self, ConstructionError> {
    let mut merged = MeshOutput::new();
    for part in parts {
      merged.append(part);
    }
    let has_uvs = !merged.positions.is_empty() && merged.uvs.len() == merged.positions.len();
    let input = MeshInput {
      positions: merged.positions,
      normals: merged.normals,
      uvs: has_uvs.then_some(merged.uvs),
      indices: Some(merged.indices),
    };
    Self::from_input(&input, config)
  }

  /// One flat pass with an arbitrary per-triangle policy.
  ///
  /// Returns the number of triangles split. On error the triangle list is
  /// left as it was before the pass.
  #[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "subdivision::pass"))]
  pub fn subdivide_with<P: SubdivisionPolicy + ?Sized>(&mut self, policy: &P) -> Result<usize, ConsistencyError> {
    let mut next = Vec::with_capacity(self.triangles.len() * 2);
    let mut split = 0;
    for tri in &self.triangles {
      if !policy.should_subdivide(tri, &self.topology.vertices) {
        next.push(*tri);
        continue;
      }
      next.extend(tri.subdivide(&mut self.topology)?);
      split += 1;
    }
    if split > 0 {
      self.triangles = next;
      self.generation += 1;
    }
    tracing::debug!(
      generation = self.generation,
      split,
      triangles = self.triangles.len(),
      vertices = self.topology.vertices.len(),
      "subdivision pass"
    );
    Ok(split)
  }

  /// Split every triangle with `area >= min_area`.
  pub fn subdivide(&mut self, min_area: f32) -> Result<usize, ConsistencyError> {
    self.subdivide_with(&UniformArea { min_area })
  }

  /// Split with a threshold that grows with distance from `point`.
  pub fn subdivide_near(&mut self, point: Vec3, reference_area: f32) -> Result<usize, ConsistencyError> {
    self.subdivide_with(&DistanceWeighted {
      point,
      reference_area,
    })
  }

  /// Flatten the current triangles into render buffers.
  ///
  /// Output vertices are shared only on an exact bit match of position and
  /// UV, so UV seams stay split.
  pub fn to_output(&self) -> MeshOutput {
    let has_uvs = self.triangles.first().is_some_and(|t| t.uvs.is_some());
    let mut output = MeshOutput::new();
    let mut index_of: HashMap<([u32; 3], [u32; 2]), u32> = HashMap::new();

    for tri in &self.triangles {
      for (corner, id) in tri.corners().into_iter().enumerate() {
        let vertex = self.topology.vertex(id);
        let uv = match (has_uvs, tri.uvs) {
          (true, Some(uvs)) => uvs[corner],
          _ => Vec2::ZERO,
        };
        let p = vertex.position;
        let key = (
          [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()],
          [uv.x.to_bits(), uv.y.to_bits()],
        );
        let index = *index_of.entry(key).or_insert_with(|| {
          output.positions.push(p.to_array());
          output.normals.push(vertex.normal.to_array());
          if has_uvs {
            output.uvs.push(uv.to_array());
          }
          output.positions.len() as u32 - 1
        });
        output.indices.push(index);
      }
    }

    if self.config.recompute_normals {
      output.recompute_normals();
    }
    output
  }

  /// Current generation of triangles.
  pub fn triangles(&self) -> &[Triangle] {
    &self.triangles
  }

  pub fn triangle_count(&self) -> usize {
    self.triangles.len()
  }

  /// Vertices ever created (base vertices plus all cached midpoints).
  pub fn vertex_count(&self) -> usize {
    self.topology.vertices.len()
  }

  /// Distinct vertices referenced by the current triangles.
  pub fn live_vertex_count(&self) -> usize {
    let mut seen = vec![false; self.topology.vertices.len()];
    let mut count = 0;
    for id in self.triangles.iter().flat_map(|t| t.corners()) {
      if !seen[id.index()] {
        seen[id.index()] = true;
        count += 1;
      }
    }
    count
  }

  pub fn base_vertex_count(&self) -> usize {
    self.base_vertex_count
  }

  /// Number of passes that split at least one triangle.
  pub fn generation(&self) -> u32 {
    self.generation
  }

  pub fn vertex(&self, id: VertexId) -> &Vertex {
    self.topology.vertex(id)
  }

  pub fn topology(&self) -> &Topology {
    &self.topology
  }

  pub fn config(&self) -> &SubdivisionConfig {
    &self.config
  }
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
