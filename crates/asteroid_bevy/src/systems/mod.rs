//! Bevy systems for asteroid LOD and patch entities.

pub mod entities;
pub mod lod;
