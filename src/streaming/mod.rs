//! Quadtree LOD streaming over pooled chunks

pub mod lod;
pub mod quadtree;
pub mod pool;
pub mod config;
pub mod stats;
pub mod manager;

pub use lod::{lod_for_size, skip_factor, column_stride, lod_tint, LOD_TINTS, MAX_TINTED_LOD};
pub use quadtree::{QuadNode, QuadTree};
pub use pool::{ChunkHandle, ChunkPool};
pub use config::{TerrainConfig, MAX_WORLD_SIZE};
pub use stats::{BuildTimings, DiffSummary, TerrainStats};
pub use manager::TerrainManager;
