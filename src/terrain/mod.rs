//! Terrain height sources

pub mod generator;
pub use generator::{NoiseField, TerrainParams, FbmParams, fractional_brownian_motion, signed_pow};

pub mod biome;
pub use biome::{BiomeLevels, biome};

pub mod height_map;
pub use height_map::HeightMap;

/// Anything that can answer "how tall is the terrain here".
///
/// Heights are in voxels and may be fractional or out of range; callers
/// clamp to the column height.
pub trait HeightSource {
    fn height_at(&self, x: f64, z: f64) -> f64;

    /// Moisture in roughly `[-1, 1]`; dry by default
    fn moisture_at(&self, _x: f64, _z: f64) -> f64 {
        0.0
    }
}

/// Closures work as flat-moisture height sources
impl<F> HeightSource for F
where
    F: Fn(f64, f64) -> f64,
{
    fn height_at(&self, x: f64, z: f64) -> f64 {
        self(x, z)
    }
}
