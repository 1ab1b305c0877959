//! Voxterra - Run-length voxel terrain with greedy meshing and quadtree LOD

pub mod core;
pub mod math;
pub mod voxel;
pub mod mesh;
pub mod terrain;
pub mod streaming;
pub mod render;
