//! Quadtree patch LOD on a cube sphere.
//!
//! # Module Structure
//!
//! - [`face`]: `CubeFace` - the six face rotations
//! - [`grid`]: fixed 9x9 patch topology and the split stitch
//! - [`node`]: `Patch` - one quadtree node and its samples
//! - [`pool`]: `PatchArena` - slot storage with a recycle pool
//! - [`config`]: `PatchLodConfig` - split/merge thresholds
//! - [`lod`]: per-frame split/merge walk
//! - [`shrink_wrap`]: ray cast projection onto a target surface
//! - [`cube`]: `PatchCube` - six roots, transform, bake

pub mod config;
pub mod cube;
pub mod face;
pub mod grid;
pub mod lod;
pub mod node;
pub mod pool;
pub mod shrink_wrap;

// Re-exports
pub use config::PatchLodConfig;
pub use cube::PatchCube;
pub use face::CubeFace;
pub use lod::{angular_size, LodStats, LodUpdate, LodView, Transition, TransitionKind};
pub use node::{Patch, PatchId, PatchState};
pub use pool::PatchArena;
pub use shrink_wrap::ShrinkWrapReport;
