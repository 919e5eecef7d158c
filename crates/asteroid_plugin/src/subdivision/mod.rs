//! Free-form edge-cached subdivision.
//!
//! - [`primitives`]: vertex/edge/triangle arenas with memoized midpoints
//! - [`FractalMesh`]: the current generation of triangles plus its passes
//! - [`SubdivisionPolicy`]: per-triangle stopping criteria

mod config;
mod mesh;
mod policy;
pub mod primitives;

pub use config::{SubdivisionConfig, DEFAULT_MERGE_TOLERANCE};
pub use mesh::FractalMesh;
pub use policy::{DistanceWeighted, SubdivisionPolicy, UniformArea};
pub use primitives::{Edge, EdgeId, Topology, Triangle, VertexId};
