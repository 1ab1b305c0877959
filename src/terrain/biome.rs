//! Height/moisture to surface material classification

use serde::{Deserialize, Serialize};

use crate::voxel::material::Material;

/// Absolute height thresholds (in voxels) separating surface materials
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeLevels {
    pub ocean: f64,
    /// Sand below this height
    pub beach: f64,
    /// Stone or grass above this height, depending on moisture
    pub mountain: f64,
    /// Snow above this height
    pub snow: f64,
    /// Mountains drier than this are bare stone
    pub stone_moisture: f64,
}

impl BiomeLevels {
    /// Thresholds as fractions of a column `height` voxels tall
    pub fn for_height(height: u32) -> Self {
        let h = height as f64;
        let ocean = (h * 0.25).floor();
        Self {
            ocean,
            beach: ocean + 4.0,
            mountain: (h * 0.48).floor(),
            snow: (h * 0.67).floor(),
            stone_moisture: 0.1,
        }
    }

    /// Surface material for a column of the given height and moisture.
    ///
    /// Total over all inputs, NaN included (falls through to grass).
    pub fn classify(&self, height: f64, moisture: f64) -> Material {
        if height < self.beach {
            Material::Sand
        } else if height > self.snow {
            Material::Snow
        } else if height > self.mountain {
            if moisture < self.stone_moisture {
                Material::Stone
            } else {
                Material::Grass
            }
        } else {
            Material::Grass
        }
    }
}

impl Default for BiomeLevels {
    fn default() -> Self {
        Self::for_height(128)
    }
}

/// Classify with the thresholds for 128-voxel columns
pub fn biome(height: f64, moisture: f64) -> Material {
    BiomeLevels::default().classify(height, moisture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_for_default_height() {
        let levels = BiomeLevels::default();
        assert_eq!(levels.ocean, 32.0);
        assert_eq!(levels.beach, 36.0);
        assert_eq!(levels.mountain, 61.0);
        assert_eq!(levels.snow, 85.0);
    }

    #[test]
    fn test_beach_biome() {
        assert_eq!(biome(0.0, 0.0), Material::Sand);
        assert_eq!(biome(10.0, 0.0), Material::Sand);
        assert_eq!(biome(35.9, 1.0), Material::Sand);
        assert_eq!(biome(36.0, 1.0), Material::Grass);
    }

    #[test]
    fn test_high_altitude_biomes() {
        assert_eq!(biome(86.0, 0.0), Material::Snow);
        assert_eq!(biome(85.0, 0.0), Material::Stone);
        assert_eq!(biome(70.0, 0.05), Material::Stone);
        assert_eq!(biome(70.0, 0.5), Material::Grass);
        assert_eq!(biome(61.0, 0.0), Material::Grass);
    }

    #[test]
    fn test_classify_is_total() {
        let levels = BiomeLevels::for_height(64);
        for h in [-1e9, -1.0, 0.0, 16.5, 31.0, 43.0, 1e9, f64::INFINITY, f64::NAN] {
            for m in [-1.0, 0.0, 0.1, 1.0, f64::NAN] {
                let material = levels.classify(h, m);
                assert!(material.is_solid());
            }
        }
    }
}
