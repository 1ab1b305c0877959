//! Voxel data structures and traversal

pub mod material;
pub mod run;
pub mod column;
pub mod face;
pub mod iter;
pub mod chunk;

pub use material::Material;
pub use run::{VoxelInterval, VoxelRun};
pub use column::{ChunkDims, ColumnStore};
pub use face::Face;
pub use iter::{BoundaryPolicy, ColumnCursor, RunIterator};
pub use chunk::{Chunk, ChunkKey, ChunkState};
