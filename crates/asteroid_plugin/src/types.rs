//! Core data types shared by the subdivision mesh and the patch LOD.

use glam::Vec3;

/// Immutable position + normal pair.
///
/// Identity lives in the arena index that owns the vertex, not in its value:
/// two vertices with equal coordinates stay distinct unless they were merged
/// while building the base graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
  pub position: Vec3,
  pub normal: Vec3,
}

impl Vertex {
  pub fn new(position: Vec3, normal: Vec3) -> Self {
    Self { position, normal }
  }
}

/// Polygonal input mesh for free-form subdivision.
///
/// Must be triangulated and indexed. A triangle soup is expressed as an index
/// list where every triangle refers to its own three vertex slots; coincident
/// slots are merged during construction.
#[derive(Clone, Debug, Default)]
pub struct MeshInput {
  pub positions: Vec<[f32; 3]>,
  pub normals: Vec<[f32; 3]>,
  pub uvs: Option<Vec<[f32; 2]>>,
  pub indices: Option<Vec<u32>>,
}

impl MeshInput {
  pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
    Self {
      positions,
      normals,
      uvs: None,
      indices: Some(indices),
    }
  }

  pub fn with_uvs(mut self, uvs: Vec<[f32; 2]>) -> Self {
    self.uvs = Some(uvs);
    self
  }

  /// Expand into an unindexed soup: three fresh vertex slots per triangle.
  ///
  /// Returns `None` when there is no index to expand.
  pub fn to_soup(&self) -> Option<Self> {
    let indices = self.indices.as_ref()?;
    let mut soup = Self::default();
    let mut uvs = self.uvs.as_ref().map(|_| Vec::with_capacity(indices.len()));
    for &i in indices {
      let i = i as usize;
      soup.positions.push(*self.positions.get(i)?);
      soup.normals.push(*self.normals.get(i)?);
      if let (Some(out), Some(src)) = (uvs.as_mut(), self.uvs.as_ref()) {
        out.push(*src.get(i)?);
      }
    }
    soup.uvs = uvs;
    soup.indices = Some((0..indices.len() as u32).collect());
    Some(soup)
  }
}

/// Flat render buffers (one entry per output vertex, 3 indices per triangle).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshOutput {
  pub positions: Vec<[f32; 3]>,
  pub normals: Vec<[f32; 3]>,
  /// Empty when the source carried no UVs.
  pub uvs: Vec<[f32; 2]>,
  pub indices: Vec<u32>,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.positions.clear();
    self.normals.clear();
    self.uvs.clear();
    self.indices.clear();
  }

  /// Returns true if no geometry is present.
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Append another buffer, rebasing its indices.
  ///
  /// UVs are kept only while every appended part carries them.
  pub fn append(&mut self, other: &MeshOutput) {
    let base = self.positions.len() as u32;
    let keep_uvs = self.uvs.len() == self.positions.len() && other.uvs.len() == other.positions.len();
    self.positions.extend_from_slice(&other.positions);
    self.normals.extend_from_slice(&other.normals);
    if keep_uvs {
      self.uvs.extend_from_slice(&other.uvs);
    } else {
      self.uvs.clear();
    }
    self.indices.extend(other.indices.iter().map(|i| i + base));
  }

  /// Recompute smooth vertex normals from triangle geometry.
  ///
  /// Face normals are accumulated unnormalized (area weighted), then every
  /// vertex normal is normalized. Unreferenced vertices get a zero normal.
  pub fn recompute_normals(&mut self) {
    let positions: Vec<Vec3> = self.positions.iter().copied().map(Vec3::from).collect();
    let normals = accumulate_normals(&positions, &self.indices);
    self.normals = normals.into_iter().map(|n| n.to_array()).collect();
  }
}

/// Area weighted vertex normals for an indexed triangle list.
pub fn accumulate_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
  let mut normals = vec![Vec3::ZERO; positions.len()];
  for tri in indices.chunks_exact(3) {
    let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
    let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
    normals[a] += face;
    normals[b] += face;
    normals[c] += face;
  }
  for n in &mut normals {
    *n = n.normalize_or_zero();
  }
  normals
}

/// World-space bounding sphere of a managed body.
///
/// Emitted once per body so an external grid index can include it in its
/// enter/exit visibility queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyBounds {
  pub center: Vec3,
  pub radius: f32,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
