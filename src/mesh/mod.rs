//! Surface extraction from run-length encoded chunks

pub mod buffers;
pub mod greedy;
pub mod naive;
pub mod skirt;

pub use buffers::{MeshBuffers, Quad};
pub use greedy::GreedyMesher;

use serde::{Deserialize, Serialize};

/// How chunk surfaces are extracted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshMode {
    /// Merged quads tinted by level of detail
    #[default]
    Greedy,
    /// One quad per exposed voxel face, coloured by material
    Naive,
}
