//! asteroid_plugin - Framework/engine independent adaptive mesh refinement
//!
//! This crate turns coarse base meshes into crack-free, variable resolution
//! surfaces for procedurally generated celestial bodies. Two cooperating
//! algorithms solve the same problem in different ways:
//!
//! # Features
//!
//! - **Free-form subdivision**: [`FractalMesh`] splits every triangle into
//!   four. Edges memoize their midpoint so neighbouring triangles always agree
//!   on the vertex inserted on a shared edge. Refinement stops per triangle
//!   (area threshold or distance weighted threshold).
//! - **Quadtree patch LOD**: [`PatchCube`] holds six grid patches that form a
//!   cube projected onto a sphere. Patches split or merge every frame based
//!   on their angular size as seen from the viewer, reuse retired patches
//!   from an arena, and stitch child boundaries from the parent's samples.
//! - **Shrink-wrap**: projects patch vertices onto an arbitrary target surface
//!   by ray casting, turning a block-shaped approximation into an irregular
//!   silhouette before LOD refinement starts.
//!
//! # Example
//!
//! ```ignore
//! use asteroid_plugin::{shapes, FractalMesh, PatchCube, PatchLodConfig, SubdivisionConfig};
//! use asteroid_plugin::raycast::TriangleSoupTarget;
//!
//! // Carve an irregular target from an icosahedron
//! let mut rock = FractalMesh::from_input(&shapes::icosahedron(2.0), SubdivisionConfig::default())?;
//! rock.subdivide(0.05)?;
//!
//! // Wrap the patch cube around it and refine towards the viewer
//! let mut cube = PatchCube::new(PatchLodConfig::default())?;
//! cube.shrink_wrap(&TriangleSoupTarget::new(rock.to_output()));
//! let update = cube.update_resolution(viewer_position);
//! ```

pub use glam;

pub mod error;
pub mod noise;
pub mod raycast;
pub mod shapes;
pub mod types;

pub use error::{ConfigError, ConsistencyError, ConstructionError};
pub use noise::{Displacement, HashNoise};
pub use types::{BodyBounds, MeshInput, MeshOutput, Vertex};

// Edge-cached free-form subdivision
pub mod subdivision;
pub use subdivision::{FractalMesh, SubdivisionConfig, SubdivisionPolicy};

// Quadtree patch LOD on a cube sphere
pub mod patch;
pub use patch::{CubeFace, LodUpdate, Patch, PatchCube, PatchId, PatchLodConfig};
