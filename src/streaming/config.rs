//! Terrain streaming configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::mesh::MeshMode;
use crate::voxel::column::ChunkDims;
use crate::voxel::iter::BoundaryPolicy;

/// Largest world whose node corners are all exact in `f32`
pub const MAX_WORLD_SIZE: u32 = 1 << 24;

/// Configuration for the terrain manager
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Side length of the square world, starting at the origin
    pub world_size: u32,
    /// Smallest quadtree leaf (LOD 1 footprint)
    pub min_node_size: u32,
    /// Columns per chunk along X and along Z
    pub chunk_columns: usize,
    /// Voxels per column
    pub chunk_height: u32,
    /// Leaves farther than this from the camera get no chunk
    pub view_distance: f32,
    /// What lies beyond a chunk's edges when meshing
    pub boundary: BoundaryPolicy,
    /// Surface extraction mode
    pub mesh_mode: MeshMode,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            world_size: 4096,
            min_node_size: 16,
            chunk_columns: 16,
            chunk_height: 128,
            view_distance: 2048.0,
            boundary: BoundaryPolicy::Exposed,
            mesh_mode: MeshMode::Greedy,
        }
    }
}

impl TerrainConfig {
    /// Parse from JSON and validate
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TerrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file and validate
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check every invariant the manager relies on before it allocates anything
    pub fn validate(&self) -> Result<()> {
        if self.chunk_columns == 0 {
            return Err(Error::Config("chunk_columns must be at least 1".into()));
        }
        if self.chunk_height == 0 {
            return Err(Error::Config("chunk_height must be at least 1".into()));
        }
        if self.min_node_size == 0 || !self.min_node_size.is_power_of_two() {
            return Err(Error::Config(format!(
                "min_node_size must be a power of two, got {}",
                self.min_node_size
            )));
        }
        if self.min_node_size as usize % self.chunk_columns != 0 {
            return Err(Error::Config(format!(
                "min_node_size {} is not a multiple of chunk_columns {}",
                self.min_node_size, self.chunk_columns
            )));
        }
        if !self.world_size.is_power_of_two() || self.world_size < self.min_node_size {
            return Err(Error::Config(format!(
                "world_size must be a power of two no smaller than min_node_size {}, got {}",
                self.min_node_size, self.world_size
            )));
        }
        if self.world_size > MAX_WORLD_SIZE {
            return Err(Error::Config(format!(
                "world_size {} exceeds the maximum of {}",
                self.world_size, MAX_WORLD_SIZE
            )));
        }
        if !(self.view_distance > 0.0) || !self.view_distance.is_finite() {
            return Err(Error::Config(format!(
                "view_distance must be positive, got {}",
                self.view_distance
            )));
        }
        if self.view_distance * 2.0 > self.world_size as f32 {
            return Err(Error::Config(format!(
                "view distance {} does not fit in world of size {}",
                self.view_distance, self.world_size
            )));
        }
        Ok(())
    }

    /// Voxel dimensions of every chunk
    pub fn chunk_dims(&self) -> ChunkDims {
        ChunkDims::new(self.chunk_columns, self.chunk_height)
    }

    /// Column spacing of LOD 1 chunks
    pub fn base_stride(&self) -> f32 {
        self.min_node_size as f32 / self.chunk_columns as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = TerrainConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_dims(), ChunkDims::new(16, 128));
        assert_eq!(config.base_stride(), 1.0);
    }

    #[test]
    fn test_view_distance_must_fit_world() {
        let config = TerrainConfig { view_distance: 2049.0, ..Default::default() };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("does not fit"));

        let config = TerrainConfig { view_distance: 0.0, ..Default::default() };
        assert!(config.validate().is_err());
        let config = TerrainConfig { view_distance: f32::NAN, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_sizes() {
        let bad = [
            TerrainConfig { chunk_columns: 0, ..Default::default() },
            TerrainConfig { chunk_height: 0, ..Default::default() },
            TerrainConfig { min_node_size: 24, chunk_columns: 8, ..Default::default() },
            TerrainConfig { min_node_size: 16, chunk_columns: 32, ..Default::default() },
            TerrainConfig { world_size: 3000, ..Default::default() },
            TerrainConfig { world_size: 8, view_distance: 2.0, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{:?}", config);
        }
    }

    #[test]
    fn test_world_size_limit() {
        let largest = TerrainConfig { world_size: MAX_WORLD_SIZE, view_distance: 200.0, ..Default::default() };
        assert!(largest.validate().is_ok());

        let huge = TerrainConfig { world_size: 1 << 30, view_distance: 200.0, ..Default::default() };
        let err = huge.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_from_json_str_partial() {
        let config = TerrainConfig::from_json_str(
            r#"{ "world_size": 1024, "view_distance": 300, "boundary": "occluded" }"#,
        )
        .unwrap();
        assert_eq!(config.world_size, 1024);
        assert_eq!(config.boundary, BoundaryPolicy::Occluded);
        assert_eq!(config.min_node_size, 16);
        assert_eq!(config.mesh_mode, MeshMode::Greedy);
    }

    #[test]
    fn test_from_json_str_rejects_invalid() {
        assert!(matches!(TerrainConfig::from_json_str("{ nope"), Err(Error::Json(_))));
        assert!(matches!(
            TerrainConfig::from_json_str(r#"{ "world_size": 64, "view_distance": 100 }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "chunk_columns": 8, "mesh_mode": "naive" }}"#).unwrap();
        let config = TerrainConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.chunk_columns, 8);
        assert_eq!(config.mesh_mode, MeshMode::Naive);
        assert_eq!(config.base_stride(), 2.0);

        let missing = TerrainConfig::from_json_file("/definitely/not/here.json");
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
